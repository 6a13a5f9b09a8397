//! Search backend configuration from TOML (`[backends]` section)
//!
//! A backend is enabled by the presence of its table:
//!
//! ```toml
//! [backends.google]
//! api_key = "..."
//! custom_search_id = "..."
//!
//! [backends.azure]
//! customer_id = "..."
//! key = "..."
//! ```

use serde::{Deserialize, Serialize};
use srom_domain::{ConfigIssue, ConfigIssueCode};

/// Google Custom Search credentials
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGoogleConfig {
    pub api_key: String,
    pub custom_search_id: String,
}

/// Azure Data Market (Bing) credentials
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAzureConfig {
    pub customer_id: String,
    pub key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendsConfig {
    pub google: Option<FileGoogleConfig>,
    pub azure: Option<FileAzureConfig>,
}

impl FileBackendsConfig {
    pub fn is_empty(&self) -> bool {
        self.google.is_none() && self.azure.is_none()
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.is_empty() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::NoBackends,
                "no [backends.*] section configured, nothing to query",
            ));
        }

        let mut check = |field: &str, value: &str| {
            if value.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyCredential {
                        field: field.to_string(),
                    },
                    format!("{} cannot be empty", field),
                ));
            }
        };

        if let Some(google) = &self.google {
            check("backends.google.api_key", &google.api_key);
            check("backends.google.custom_search_id", &google.custom_search_id);
        }
        if let Some(azure) = &self.azure {
            check("backends.azure.customer_id", &azure.customer_id);
            check("backends.azure.key", &azure.key);
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_sections() {
        let toml_str = r#"
[backends.google]
api_key = "AIza-test"
custom_search_id = "0123:abc"

[backends.azure]
customer_id = "customer"
key = "secret"
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        let google = config.backends.google.as_ref().unwrap();
        assert_eq!(google.api_key, "AIza-test");
        assert_eq!(config.backends.azure.as_ref().unwrap().key, "secret");
        assert!(config.backends.validate().is_empty());
    }

    #[test]
    fn test_no_backends_is_warning() {
        let issues = FileBackendsConfig::default().validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ConfigIssueCode::NoBackends);
        assert!(!issues[0].is_error());
    }

    #[test]
    fn test_empty_credential_is_error() {
        let config: super::super::FileConfig =
            toml::from_str("[backends.google]\napi_key = \"k\"\n").unwrap();
        let issues = config.backends.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
        assert_eq!(
            issues[0].code,
            ConfigIssueCode::EmptyCredential {
                field: "backends.google.custom_search_id".to_string()
            }
        );
    }
}
