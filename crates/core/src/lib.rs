#![forbid(unsafe_code)]

pub mod catalog;
pub mod model;
pub mod time;
pub mod tracker;

pub use catalog::{Catalog, CatalogError, Week};
pub use time::Clock;
pub use tracker::{ProgressSummary, ProgressTracker, TrackerError};
