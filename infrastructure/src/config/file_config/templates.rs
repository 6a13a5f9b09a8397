//! Phrase template configuration from TOML (`[templates]` section)
//!
//! ```toml
//! [templates]
//! positive = ["%v rules", "%v rocks", "love %v"]
//! negative = ["%v sucks", "%v blows", "hate %v"]
//! ```
//!
//! Either list may be omitted to keep the built-in set.

use serde::{Deserialize, Serialize};
use srom_domain::{ConfigIssue, ConfigIssueCode, Polarity, SentimentTemplates, TemplateSet};

/// Raw template configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTemplatesConfig {
    pub positive: Option<Vec<String>>,
    pub negative: Option<Vec<String>>,
}

impl FileTemplatesConfig {
    /// Build validated template sets.
    ///
    /// A list that fails validation is reported and replaced by the built-in
    /// set for that polarity.
    pub fn to_sentiment_templates(&self) -> (SentimentTemplates, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let mut templates = SentimentTemplates::default();

        for (polarity, raw) in [
            (Polarity::Positive, &self.positive),
            (Polarity::Negative, &self.negative),
        ] {
            let Some(raw) = raw else {
                continue;
            };
            match TemplateSet::new(raw.iter()) {
                Ok(set) => match polarity {
                    Polarity::Positive => templates.positive = set,
                    Polarity::Negative => templates.negative = set,
                },
                Err(e) => {
                    let field = format!("templates.{}", polarity);
                    issues.push(ConfigIssue::error(
                        ConfigIssueCode::InvalidTemplates {
                            field: field.clone(),
                        },
                        format!("{}: {}", field, e),
                    ));
                }
            }
        }

        (templates, issues)
    }
}
