//! Analytics errors
//!
//! Only structurally invalid input is an error. Data insufficiency and
//! numeric degeneracy are normal output states, reported as absent fields.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("missing product identifier")]
    MissingIdentifier,

    #[error("missing raw history container for {asin}")]
    MissingHistory { asin: String },
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;
