//! clicktrail - URL shortener with per-visit analytics
//!
//! A long URL goes in, a short URL-safe id comes out; resolving the id
//! redirects to the original URL and appends a timestamped visit that the
//! analytics endpoint reports.
//!
//! # Architecture
//! - `services`: id generation and the `LinkService` use cases
//! - `storage`: the `LinkStore` trait with SeaORM and in-memory backends
//! - `api`: actix-web routes and middleware
//! - `config`: static configuration (TOML + environment)
//! - `runtime`: startup wiring and the server mode
//! - `system`: logging

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
