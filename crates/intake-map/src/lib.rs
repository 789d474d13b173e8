//! Template mapping engine for the permit intake pipeline.

mod engine;
mod targets;

pub use engine::{WriteResult, write_templates};
pub use targets::{Target, parse_targets};
