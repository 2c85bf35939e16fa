use formpilot_common::{FormError, Result};
use serde_json::Value;
use std::path::Path;

/// The user's answer set: a flat field-name → answer-value mapping, read
/// once at startup and immutable thereafter.
///
/// File order is preserved so the matcher's first-encountered tie-break is
/// deterministic. No schema validation happens here; a field referenced
/// later that is absent simply fails that one lookup.
#[derive(Debug, Clone)]
pub struct Profile {
    fields: Vec<(String, String)>,
}

impl Profile {
    /// Load the profile from a flat JSON object file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| FormError::Profile(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_json_str(&raw)
    }

    /// Parse a profile from raw JSON text.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| FormError::Profile(format!("invalid JSON: {}", e)))?;

        let object = value
            .as_object()
            .ok_or_else(|| FormError::Profile("profile must be a flat JSON object".into()))?;

        let fields = object
            .iter()
            .map(|(name, v)| {
                let rendered = match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (name.clone(), rendered)
            })
            .collect();

        Ok(Self { fields })
    }

    /// Build a profile from in-memory pairs. Mostly useful in tests.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Iterate (field name, answer value) in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Look up the answer value for a field name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
