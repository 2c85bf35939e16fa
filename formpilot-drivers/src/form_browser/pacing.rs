use anyhow::Result;
use fantoccini::elements::Element;
use rand::rngs::OsRng;
use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;

#[derive(Debug, Clone, Default)]
/// Produces short randomized delays and paced typing.
///
/// The target form renders widgets asynchronously; a brief pause after
/// structural interactions (opening a dropdown, scrolling a container into
/// view) lets the client-side rendering settle before the next probe. These
/// delays are heuristic, not correctness-bearing synchronization; explicit
/// waits in [`super::page::FormPage`] carry that load.
pub struct PacingEngine {}

impl PacingEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// Sleep for a random duration between `min` and `max` milliseconds.
    pub async fn random_delay(&self, min: u64, max: u64) {
        let mut rng = OsRng;
        let ms = rng.gen_range(min..=max);
        sleep(Duration::from_millis(ms)).await;
    }

    /// The standard pause after a structural interaction.
    pub async fn settle(&self) {
        self.random_delay(300, 700).await;
    }

    /// Type the provided text with small random delays between characters.
    pub async fn type_text_paced(&self, element: &Element, text: &str) -> Result<()> {
        for ch in text.chars() {
            element.send_keys(&ch.to_string()).await?;
            self.random_delay(30, 150).await;
        }
        Ok(())
    }
}
