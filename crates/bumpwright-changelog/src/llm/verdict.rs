//! Parsing of the model's JSON reply

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use bumpwright_core::error::AnalyzerError;
use bumpwright_core::types::{BumpType, CommitAnalysis};

/// The classification a model returned.
///
/// Every field is optional in the reply; missing or wrongly typed fields take
/// their defaults instead of failing the whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ModelVerdict {
    #[serde(default, deserialize_with = "lenient_bump")]
    pub bump_type: BumpType,
    #[serde(default, deserialize_with = "lenient_list")]
    pub reasons: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub breaking_changes: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub features: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub fixes: Vec<String>,
}

fn lenient_bump<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BumpType, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().map(BumpType::parse_lenient).unwrap_or_default())
}

fn lenient_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let items = match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect(),
        _ => Vec::new(),
    };
    Ok(items)
}

impl ModelVerdict {
    /// Parse raw completion content
    pub fn parse(content: &str) -> Result<Self, AnalyzerError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AnalyzerError::EmptyResponse);
        }
        let value: Value = serde_json::from_str(content)
            .map_err(|e| AnalyzerError::MalformedResponse(e.to_string()))?;
        if !value.is_object() {
            return Err(AnalyzerError::MalformedResponse(
                "expected a JSON object".to_string(),
            ));
        }
        serde_json::from_value(value).map_err(|e| AnalyzerError::MalformedResponse(e.to_string()))
    }

    /// Bump type implied by the category lists alone
    pub fn implied_bump(&self) -> BumpType {
        if !self.breaking_changes.is_empty() {
            BumpType::Major
        } else if !self.features.is_empty() {
            BumpType::Minor
        } else {
            BumpType::Patch
        }
    }

    /// Convert to an analysis (changelog not yet rendered)
    pub fn into_analysis(self) -> CommitAnalysis {
        CommitAnalysis {
            bump_type: self.bump_type,
            changelog: String::new(),
            reasons: self.reasons,
            breaking_changes: self.breaking_changes,
            features: self.features,
            fixes: self.fixes,
        }
    }
}
