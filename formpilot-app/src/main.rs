use anyhow::{Context, Result};
use formpilot_common::observability::{init_logging, LogConfig};
use formpilot_config::{EmbedderConfig, FormpilotConfig, FormpilotConfigLoader};
use formpilot_core::{FieldMatcher, FormFiller, Profile, Thresholds};
use formpilot_drivers::form_browser::driver::FormDriver;
use formpilot_embed::{ollama::OllamaEmbedder, openai::OpenAiEmbedder, Embedder};
use std::io::Write;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // 1) Load config (env wins)
    let cfg: FormpilotConfig = FormpilotConfigLoader::new()
        .with_optional_file("formpilot.yaml")
        .load()?;

    init_logging(LogConfig::default())?;

    println!("Loading embedding model...");
    let embedder = build_embedder(&cfg).await?;
    println!("Model ready: {}", embedder.model_name());

    let profile =
        Profile::load(&cfg.profile_path).context("could not load the answer profile")?;
    info!(fields = profile.len(), path = %cfg.profile_path, "profile loaded");

    let matcher = FieldMatcher::new(&profile, embedder).await?;
    let thresholds = Thresholds {
        field_match: cfg.thresholds.field_match,
        option_high: cfg.thresholds.option_high,
        option_floor: cfg.thresholds.option_floor,
    };
    let filler = FormFiller::new(matcher, thresholds);

    let form_url = prompt("Please enter the form URL: ")?;

    let mut driver = FormDriver::connect(&cfg.webdriver_url, cfg.headless).await?;

    // Per-pass containment: whatever happens here, the operator still gets
    // the confirmation prompt and the session is closed.
    match driver.goto(form_url.trim()).await {
        Ok(page) => {
            println!("\nNavigating to form URL: {}", form_url.trim());
            let report = filler.run(&page).await;
            println!("\n{}", report.render());
            println!("\nForm filling completed!");
            println!("Please review the filled form and submit it manually.");
        }
        Err(e) => {
            error!(error = %e, "navigation failed");
            eprintln!("An error occurred: {e}");
        }
    }

    prompt("Press Enter to close the browser...")?;
    driver.close().await?;

    Ok(())
}

async fn build_embedder(cfg: &FormpilotConfig) -> Result<Arc<dyn Embedder>> {
    let embedder: Arc<dyn Embedder> = match &cfg.embedder {
        EmbedderConfig::Ollama { endpoint, model } => {
            Arc::new(OllamaEmbedder::new(endpoint.clone(), model.clone()).await?)
        }
        EmbedderConfig::Openai {
            auth_token,
            model,
            endpoint,
        } => Arc::new(OpenAiEmbedder::new(
            endpoint.clone(),
            auth_token.clone(),
            model.clone(),
        )?),
    };
    Ok(embedder)
}

/// Blocking console prompt. The whole run is operator-paced, so blocking
/// the runtime here is intentional.
fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line)
}
