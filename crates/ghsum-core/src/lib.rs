//! Core domain logic for the GitHub activity summarizer.
//!
//! This crate contains the types and logic for:
//! - Event decoding: the subset of the public events feed we report on
//! - Classification: assigning in-window events to reporting categories
//! - Aggregation: collapsing per-PR timelines into a day's summary
//! - Rendering: the markdown view of a summary

pub mod aggregate;
pub mod classify;
pub mod event;
pub mod render;

pub use aggregate::{Summary, summarize};
pub use classify::{Classified, DayWindow, PrAction, classify};
pub use event::{PrUrl, RawEvent};
pub use render::{CommentStyle, to_markdown};
