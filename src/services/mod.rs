//! Service layer for business logic
//!
//! The HTTP API calls into these services with already-parsed input.

pub mod id_generator;
mod link_service;

pub use id_generator::{IdGenerator, MAX_ID_LENGTH, MIN_ID_LENGTH, RandomIdGenerator};
pub use link_service::*;
