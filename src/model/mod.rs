// File: ./src/model/mod.rs
pub mod listing;
pub mod plan;

pub use listing::{Listing, Metric, RawListing, RawNumber};
pub use plan::{ItemKind, ItemStatus, PlanItem};
