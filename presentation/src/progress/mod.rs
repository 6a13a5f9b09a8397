//! Progress reporters for the terminal

pub mod reporter;
