//! The module contains the errors the engine can return.
//!
//! The engine is built around total functions: malformed schedules cost
//! nothing and unknown ids are ignored. The errors below are the few cases a
//! caller has to react to:
//!
//! - [`DomainFull`] returned when a [`LifeDomain`] already holds the maximum
//!   number of goals.
//! - [`InvalidInput`] returned by input normalization helpers.
//! - [`Document`] returned when a plan document cannot be (de)serialized.
//!
//!  [`DomainFull`]: EngineError::DomainFull
//!  [`InvalidInput`]: EngineError::InvalidInput
//!  [`Document`]: EngineError::Document
//!  [`LifeDomain`]: super::LifeDomain
use thiserror::Error;

use crate::LifeDomain;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Domain \"{0}\" already has the maximum number of goals")]
    DomainFull(LifeDomain),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid plan document: {0}")]
    Document(#[from] serde_json::Error),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::DomainFull(a), Self::DomainFull(b)) => a == b,
            (Self::InvalidInput(a), Self::InvalidInput(b)) => a == b,
            (Self::Document(a), Self::Document(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
