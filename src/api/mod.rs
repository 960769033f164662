//! HTTP surface
//!
//! actix-web handlers that translate requests into `LinkService` calls and
//! `ClicktrailError`s into responses.

pub mod middleware;
pub mod services;
