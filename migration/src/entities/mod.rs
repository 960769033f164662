pub mod link;
pub mod link_visit;
