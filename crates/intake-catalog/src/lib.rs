//! Catalog and configuration loading for the permit intake pipeline.
//!
//! Both sources are parsed into explicit structured records at load time
//! and treated as immutable for the rest of the run.

mod catalog;
mod mapping;
mod shared;
mod steps;

pub use catalog::{FieldCatalog, load_field_catalog};
pub use mapping::load_mapping_config;
pub use shared::SharedCatalog;
pub use steps::{StepGroup, build_step_groups};
