//! Query composition
//!
//! Turns a [`Term`](crate::Term) and a phrase [`TemplateSet`] into a single
//! [`ComposedQuery`]. Pure functions, no I/O.

pub mod builder;
pub mod polarity;
pub mod template;

pub use builder::{ComposedQuery, OR_SEPARATOR, compose};
pub use polarity::Polarity;
pub use template::{SentimentTemplates, TERM_SLOT, TemplateSet};
