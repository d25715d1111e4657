//! Shared types and models for the Crop Recommendation Platform
//!
//! This crate contains the domain models, the crop scoring algorithm and
//! input validation shared by the backend and its tests.

pub mod models;
pub mod scoring;
pub mod types;
pub mod validation;

pub use models::*;
pub use scoring::*;
pub use types::*;
pub use validation::*;
