//! Core types, the repository trait and the use-case layer for the HRM
//! candidate tracker.
//!
//! This crate is free of storage dependencies. Backends implement
//! [`store::CandidateRepository`]; the CLI drives [`usecases::UseCases`].

pub mod candidate;
pub mod error;
pub mod store;
pub mod usecases;

pub use error::{Error, Result};
