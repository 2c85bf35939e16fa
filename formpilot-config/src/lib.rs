//! Loader for workspace configuration with YAML + environment overlays.
//!
//! Precedence: `FORMPILOT__`-prefixed environment variables win over file
//! values; `${VAR}` placeholders inside any string value are expanded after
//! merging. Every section carries serde defaults, so an absent or empty
//! config file yields a usable configuration.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

/// Top-level configuration for a fill run.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FormpilotConfig {
    /// Path to the flat JSON profile (field name -> answer value).
    pub profile_path: String,
    /// WebDriver endpoint the browser session connects to.
    pub webdriver_url: String,
    /// Run the browser without a visible window.
    pub headless: bool,
    /// Embedding backend.
    pub embedder: EmbedderConfig,
    /// Similarity thresholds. Three independent knobs; none is derived
    /// from another.
    pub thresholds: Thresholds,
}

impl Default for FormpilotConfig {
    fn default() -> Self {
        Self {
            profile_path: "user_profile.json".into(),
            webdriver_url: default_webdriver_url(),
            headless: false,
            embedder: EmbedderConfig::default(),
            thresholds: Thresholds::default(),
        }
    }
}

fn default_webdriver_url() -> String {
    "http://localhost:9515".into()
}

/// Minimum similarity scores used at the three decision points.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Question-to-field acceptance floor for the matcher.
    pub field_match: f32,
    /// High-confidence gate for the semantic stage of choice widgets.
    pub option_high: f32,
    /// Floor for the best-available fallback stage of choice widgets.
    pub option_floor: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            field_match: 0.5,
            option_high: 0.7,
            option_floor: 0.5,
        }
    }
}

/// The tag is `provider`; defaults follow each backend's conventional
/// local/hosted endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum EmbedderConfig {
    Ollama {
        #[serde(default = "default_ollama_endpoint")]
        endpoint: String,
        #[serde(default = "default_ollama_model")]
        model: String,
    },
    Openai {
        auth_token: String,
        #[serde(default = "default_openai_model")]
        model: String,
        #[serde(default = "default_openai_endpoint")]
        endpoint: String,
    },
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self::Ollama {
            endpoint: default_ollama_endpoint(),
            model: default_ollama_model(),
        }
    }
}

fn default_ollama_endpoint() -> String {
    "http://localhost:11434".into()
}
fn default_ollama_model() -> String {
    "nomic-embed-text".into()
}
fn default_openai_endpoint() -> String {
    "https://api.openai.com/v1".into()
}
fn default_openai_model() -> String {
    "text-embedding-3-small".into()
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct FormpilotConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for FormpilotConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl FormpilotConfigLoader {
    /// Start with sensible defaults: `FORMPILOT__` env overrides only.
    ///
    /// ```
    /// use formpilot_config::FormpilotConfigLoader;
    ///
    /// let config = FormpilotConfigLoader::new()
    ///     .with_yaml_str("headless: true")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert!(config.headless);
    /// assert_eq!(config.webdriver_url, "http://localhost:9515");
    /// ```
    pub fn new() -> Self {
        let builder =
            Config::builder().add_source(Environment::with_prefix("FORMPILOT").separator("__"));
        Self { builder }
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Like [`Self::with_file`], but a missing file is not an error. Used by
    /// the binary so a bare environment-only deployment still starts.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    ///
    /// ```
    /// use formpilot_config::{EmbedderConfig, FormpilotConfigLoader};
    ///
    /// let cfg = FormpilotConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// profile_path: "me.json"
    /// embedder:
    ///   provider: "ollama"
    ///   model: "mxbai-embed-large"
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.profile_path, "me.json");
    /// assert!(matches!(cfg.embedder, EmbedderConfig::Ollama { .. }));
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources into strongly
    /// typed config, expanding `${VAR}` placeholders first.
    ///
    /// ```
    /// use formpilot_config::{EmbedderConfig, FormpilotConfigLoader};
    ///
    /// unsafe { std::env::set_var("EMBED_TOKEN", "injected-from-env"); }
    ///
    /// let config = FormpilotConfigLoader::new()
    ///     .with_yaml_str(r#"
    /// embedder:
    ///   provider: "openai"
    ///   model: "text-embedding-3-large"
    ///   auth_token: "${EMBED_TOKEN}"
    /// "#)
    ///     .load()
    ///     .expect("valid configuration");
    ///
    /// match &config.embedder {
    ///     EmbedderConfig::Openai {
    ///         model,
    ///         auth_token,
    ///         endpoint,
    ///     } => {
    ///         assert_eq!(model, "text-embedding-3-large");
    ///         assert_eq!(auth_token, "injected-from-env");
    ///         assert_eq!(endpoint, "https://api.openai.com/v1");
    ///     }
    ///     _ => panic!("expected OpenAI configuration"),
    /// }
    ///
    /// unsafe { std::env::remove_var("EMBED_TOKEN"); }
    /// ```
    pub fn load(self) -> Result<FormpilotConfig, ConfigError> {
        let cfg = self.builder.build()?;

        // Convert to serde_json::Value first so ${VAR} expansion can walk
        // nested sections uniformly.
        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: FormpilotConfig =
            serde_json::from_value(v).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        Ok(typed)
    }
}
