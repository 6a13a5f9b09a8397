//! Domain layer for srom (Sucks-Rules-O-Meter)
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! A [`Term`] is evaluated by substituting it into two [`TemplateSet`]s, one
//! positive and one negative. Each set becomes a single [`ComposedQuery`]
//! (a disjunction of quoted phrases) that is sent to every search backend.
//!
//! Each backend yields a pair of [`BackendOutcome`]s. The pair becomes a
//! [`PerBackendResult`] whose [`BackendRatio`] is `positive / negative`, or an
//! exclusion when a query failed or both counts were zero. The included ratios
//! are averaged into an [`EvaluationResult`].

pub mod config;
pub mod core;
pub mod query;
pub mod sentiment;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use crate::core::{error::DomainError, term::Term};
pub use query::{ComposedQuery, Polarity, SentimentTemplates, TERM_SLOT, TemplateSet, compose};
pub use sentiment::{
    AggregateRatio, BackendOutcome, BackendRatio, EvaluationResult, ExclusionReason,
    FailureReason, PerBackendResult, Sentiment, Verdict,
};
