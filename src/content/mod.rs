//! Post-processing of model replies: markup stripping and math segmentation.
//!
//! Both functions are pure and cheap, so callers re-run them on every
//! render instead of caching the result next to the record.

mod sanitize;
mod segment;

pub use sanitize::sanitize;
pub use segment::{segment, Segment, SegmentKind};
