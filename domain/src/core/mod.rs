//! Core domain concepts shared across all subdomains.
//!
//! - [`term::Term`] - the subject under evaluation
//! - [`error::DomainError`] - domain-level errors

pub mod error;
pub mod term;
