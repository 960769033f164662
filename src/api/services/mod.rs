pub mod helpers;
pub mod links;

pub use links::{LinkApi, links_routes};
