use crate::form_browser::pacing::PacingEngine;
use anyhow::Result;
use fantoccini::{elements::Element, Client, Locator};
use serde_json::Value as JsonValue;
use std::time::Duration;
use tracing::debug;

/// High-level page wrapper providing element queries, explicit waits, and
/// script execution.
pub struct FormPage {
    pub(crate) client: Client,
    pub(crate) pacing: PacingEngine,
}

impl FormPage {
    /// Construct a page wrapper around an existing WebDriver client.
    pub fn new(client: Client, pacing: PacingEngine) -> Self {
        Self { client, pacing }
    }

    /// Navigate to `url`.
    pub async fn goto(&mut self, url: &str) -> Result<()> {
        self.pacing.random_delay(300, 1200).await;
        self.client.goto(url).await.map_err(anyhow::Error::from)?;
        Ok(())
    }

    /// Return the page title.
    pub async fn title(&self) -> Result<String> {
        self.client.title().await.map_err(anyhow::Error::from)
    }

    /// Return the current page URL.
    pub async fn url(&self) -> Result<String> {
        self.client
            .current_url()
            .await
            .map(|url| url.to_string())
            .map_err(anyhow::Error::from)
    }

    /// Find zero or more elements by CSS selector.
    pub async fn find_elements(&self, selector: &str) -> Result<Vec<FormElement>> {
        let elements = self.client.find_all(Locator::Css(selector)).await?;
        Ok(self.wrap_all(elements))
    }

    /// Find zero or more elements by XPath.
    pub async fn find_elements_xpath(&self, xpath: &str) -> Result<Vec<FormElement>> {
        let elements = self.client.find_all(Locator::XPath(xpath)).await?;
        Ok(self.wrap_all(elements))
    }

    /// Find a single element by XPath; `Ok(None)` when nothing matches.
    pub async fn find_element_xpath(&self, xpath: &str) -> Result<Option<FormElement>> {
        let mut elements = self.find_elements_xpath(xpath).await?;
        if elements.is_empty() {
            Ok(None)
        } else {
            Ok(Some(elements.remove(0)))
        }
    }

    /// Poll until an element matching `selector` appears, up to `timeout`.
    ///
    /// Replaces fixed post-navigation sleeps with a wait keyed to observable
    /// page state.
    pub async fn wait_for_element(&self, selector: &str, timeout: Duration) -> Result<FormElement> {
        debug!(target: "browser.wait", %selector, ?timeout, "waiting for element");
        let element = self
            .client
            .wait()
            .at_most(timeout)
            .for_element(Locator::Css(selector))
            .await?;
        Ok(FormElement::new(element, &self.pacing))
    }

    /// Like [`Self::wait_for_element`] but with an XPath locator.
    pub async fn wait_for_element_xpath(
        &self,
        xpath: &str,
        timeout: Duration,
    ) -> Result<FormElement> {
        debug!(target: "browser.wait", %xpath, ?timeout, "waiting for element");
        let element = self
            .client
            .wait()
            .at_most(timeout)
            .for_element(Locator::XPath(xpath))
            .await?;
        Ok(FormElement::new(element, &self.pacing))
    }

    /// Execute a JavaScript snippet with the given arguments.
    pub async fn execute(&self, script: &str, args: Vec<JsonValue>) -> Result<JsonValue> {
        self.client
            .execute(script, args)
            .await
            .map_err(anyhow::Error::from)
    }

    /// Scroll `element` into view and let the rendering settle.
    pub async fn scroll_into_view(&self, element: &FormElement) -> Result<()> {
        self.execute(
            "arguments[0].scrollIntoView(true);",
            vec![element.to_script_arg()?],
        )
        .await?;
        self.pacing.settle().await;
        Ok(())
    }

    fn wrap_all(&self, elements: Vec<Element>) -> Vec<FormElement> {
        elements
            .into_iter()
            .map(|element| FormElement::new(element, &self.pacing))
            .collect()
    }
}

// =========================
// FormElement Definition
// =========================

#[derive(Clone)]
/// Wrapper for DOM elements that provides typed helpers consistent with
/// [`FormPage`].
pub struct FormElement {
    pub element: Element,
    pub pacing: PacingEngine,
}

impl FormElement {
    /// Construct an element wrapper.
    pub fn new(element: Element, pacing: &PacingEngine) -> Self {
        Self {
            element,
            pacing: pacing.clone(),
        }
    }

    /// Click the element.
    pub async fn click(&self) -> Result<()> {
        // `Element::click` consumes the handle, so click a clone.
        self.element
            .clone()
            .click()
            .await
            .map(|_| ())
            .map_err(anyhow::Error::from)
    }

    /// Clear the element's current value.
    pub async fn clear(&self) -> Result<()> {
        self.element.clear().await.map_err(anyhow::Error::from)
    }

    /// Send keys directly, without pacing. Used for keyboard sequences where
    /// per-character delays would break segmented entry.
    pub async fn send_keys(&self, text: &str) -> Result<()> {
        self.element
            .send_keys(text)
            .await
            .map_err(anyhow::Error::from)
    }

    /// Type into the element with small randomized inter-key delays.
    pub async fn type_paced(&self, text: &str) -> Result<()> {
        self.pacing.type_text_paced(&self.element, text).await
    }

    /// Find a child element by CSS selector; `Ok(None)` when nothing matches.
    pub async fn find_element(&self, selector: &str) -> Result<Option<FormElement>> {
        let mut found = self.find_elements(selector).await?;
        if found.is_empty() {
            Ok(None)
        } else {
            Ok(Some(found.remove(0)))
        }
    }

    /// Find zero or more child elements by CSS selector.
    pub async fn find_elements(&self, selector: &str) -> Result<Vec<FormElement>> {
        let elements = self.element.find_all(Locator::Css(selector)).await?;
        Ok(elements
            .into_iter()
            .map(|element| FormElement::new(element, &self.pacing))
            .collect())
    }

    /// Find zero or more descendant elements by XPath.
    pub async fn find_elements_xpath(&self, xpath: &str) -> Result<Vec<FormElement>> {
        let elements = self.element.find_all(Locator::XPath(xpath)).await?;
        Ok(elements
            .into_iter()
            .map(|element| FormElement::new(element, &self.pacing))
            .collect())
    }

    /// Return the element's visible text.
    pub async fn text(&self) -> Result<String> {
        self.element.text().await.map_err(anyhow::Error::from)
    }

    /// Read an attribute value.
    pub async fn attr(&self, attribute: &str) -> Result<Option<String>> {
        self.element
            .attr(attribute)
            .await
            .map_err(anyhow::Error::from)
    }

    /// Serialize the element reference for use as an `execute` argument.
    pub fn to_script_arg(&self) -> Result<JsonValue> {
        serde_json::to_value(&self.element).map_err(anyhow::Error::from)
    }
}
