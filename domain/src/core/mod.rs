//! Core domain concepts shared across all subdomains.
//!
//! - [`role::ActorRole`]: the five scripted participants of a discussion
//! - [`topic::Topic`]: a validated discussion topic
//! - [`model::Model`] / [`model::ModelParams`]: the local model and its sampling parameters
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
pub mod role;
pub mod string;
pub mod topic;
