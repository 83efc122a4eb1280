//! Core engine for a weekly volunteer scheduling app: compresses grid
//! selections into minimal time ranges, aggregates many submitters into a
//! per-slot density map, and overlays an externally optimized schedule.
//!
//! The optimizer itself, authentication and the storage backend are
//! external collaborators; this crate prepares the optimizer's input,
//! interprets its output, and owns every interval computation in between.

pub mod assignment;
pub mod board;
#[cfg(feature = "client")]
pub mod client;
pub mod color;
pub mod heatmap;
pub mod selection;
pub mod store;
pub mod submission;
pub mod time;
pub mod week;
