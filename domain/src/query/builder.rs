//! Composed query construction

use super::template::TemplateSet;
use crate::core::term::Term;
use serde::{Deserialize, Serialize};

/// Combinator placed between quoted phrase alternatives
pub const OR_SEPARATOR: &str = " OR ";

/// A disjunction of quoted phrases, ready to hand to a search backend
///
/// Write-only: nothing downstream parses the term back out of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComposedQuery(String);

impl ComposedQuery {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ComposedQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Build one query string from a term and a template set.
///
/// Every rendered phrase is wrapped in double quotes and the phrases are
/// joined with [`OR_SEPARATOR`].
///
/// # Example
///
/// ```
/// use srom_domain::{Term, TemplateSet, compose};
///
/// let term = Term::new("foobar").unwrap();
/// let templates = TemplateSet::new(["%v rules", "%v rocks"]).unwrap();
/// assert_eq!(
///     compose(&term, &templates).as_str(),
///     "\"foobar rules\" OR \"foobar rocks\""
/// );
/// ```
pub fn compose(term: &Term, templates: &TemplateSet) -> ComposedQuery {
    let query = templates
        .render(term.as_str())
        .map(|phrase| format!("\"{}\"", phrase))
        .collect::<Vec<_>>()
        .join(OR_SEPARATOR);
    ComposedQuery(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(s: &str) -> Term {
        Term::new(s).unwrap()
    }

    #[test]
    fn test_compose_two_templates() {
        let templates = TemplateSet::new(["%v rules", "%v rocks"]).unwrap();
        let query = compose(&term("foobar"), &templates);
        assert_eq!(query.as_str(), "\"foobar rules\" OR \"foobar rocks\"");
    }

    #[test]
    fn test_compose_single_template_has_no_separator() {
        let templates = TemplateSet::new(["love %v"]).unwrap();
        let query = compose(&term("tea"), &templates);
        assert_eq!(query.as_str(), "\"love tea\"");
    }

    #[test]
    fn test_separator_and_substitution_counts() {
        let sets = [
            vec!["%v rules"],
            vec!["%v rules", "%v rocks"],
            vec!["%v sucks", "%v blows", "hate %v", "%v is crap", "%v doesn't work"],
        ];
        for templates in sets {
            let set = TemplateSet::new(templates.clone()).unwrap();
            let query = compose(&term("zanzibar"), &set);
            assert_eq!(
                query.as_str().matches(OR_SEPARATOR).count(),
                templates.len() - 1
            );
            assert_eq!(query.as_str().matches("zanzibar").count(), templates.len());
        }
    }

    #[test]
    fn test_slot_in_middle_of_template() {
        let templates = TemplateSet::new(["I adore %v so much"]).unwrap();
        let query = compose(&term("ed lee"), &templates);
        assert_eq!(query.as_str(), "\"I adore ed lee so much\"");
    }
}
