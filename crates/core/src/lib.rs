//! Core business logic for parish-admin.

pub mod listing;
pub mod services;

pub use listing::{Searchable, SummaryTile, TileValue};
pub use services::*;
