//! Phrase templates for sentiment queries
//!
//! A [`TemplateSet`] is an ordered, validated list of phrase templates, each
//! holding exactly one [`TERM_SLOT`]. [`SentimentTemplates`] pairs a positive
//! and a negative set and is handed to the evaluator at construction time.

use super::polarity::Polarity;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Placeholder replaced by the term in every template
pub const TERM_SLOT: &str = "%v";

const DEFAULT_POSITIVE: [&str; 3] = ["%v rules", "%v rocks", "love %v"];
const DEFAULT_NEGATIVE: [&str; 3] = ["%v sucks", "%v blows", "hate %v"];

/// Ordered, non-empty set of phrase templates (Value Object)
///
/// # Example
///
/// ```
/// use srom_domain::TemplateSet;
///
/// let set = TemplateSet::new(["%v rules", "%v rocks"]).unwrap();
/// assert_eq!(set.templates().len(), 2);
///
/// assert!(TemplateSet::new(Vec::<String>::new()).is_err());
/// assert!(TemplateSet::new(["rules"]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct TemplateSet {
    templates: Vec<String>,
}

impl TemplateSet {
    /// Create a template set, validating every template
    pub fn new<I, S>(templates: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let templates: Vec<String> = templates.into_iter().map(Into::into).collect();
        if templates.is_empty() {
            return Err(DomainError::EmptyTemplateSet);
        }
        for template in &templates {
            match template.matches(TERM_SLOT).count() {
                0 => return Err(DomainError::MissingSlot(template.clone())),
                1 => {}
                count => {
                    return Err(DomainError::ExtraSlots {
                        template: template.clone(),
                        count,
                    });
                }
            }
        }
        Ok(Self { templates })
    }

    /// Built-in favorable phrases
    pub fn default_positive() -> Self {
        Self {
            templates: DEFAULT_POSITIVE.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Built-in unfavorable phrases
    pub fn default_negative() -> Self {
        Self {
            templates: DEFAULT_NEGATIVE.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn templates(&self) -> &[String] {
        &self.templates
    }

    /// Substitute the term into every template, in order
    pub fn render<'a>(&'a self, term: &'a str) -> impl Iterator<Item = String> + 'a {
        self.templates
            .iter()
            .map(move |template| template.replacen(TERM_SLOT, term, 1))
    }
}

impl TryFrom<Vec<String>> for TemplateSet {
    type Error = DomainError;

    fn try_from(templates: Vec<String>) -> Result<Self, Self::Error> {
        TemplateSet::new(templates)
    }
}

impl From<TemplateSet> for Vec<String> {
    fn from(set: TemplateSet) -> Self {
        set.templates
    }
}

/// Positive and negative template sets used for one evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentTemplates {
    pub positive: TemplateSet,
    pub negative: TemplateSet,
}

impl SentimentTemplates {
    pub fn new(positive: TemplateSet, negative: TemplateSet) -> Self {
        Self { positive, negative }
    }

    /// Get the template set for a polarity
    pub fn for_polarity(&self, polarity: Polarity) -> &TemplateSet {
        match polarity {
            Polarity::Positive => &self.positive,
            Polarity::Negative => &self.negative,
        }
    }
}

impl Default for SentimentTemplates {
    fn default() -> Self {
        Self {
            positive: TemplateSet::default_positive(),
            negative: TemplateSet::default_negative(),
        }
    }
}
