//! Argh Site Definition Compiler
//!
//! This crate compiles JSON site definition files into a validated
//! `SiteRegistry`, and writes registries back out in the same format.

pub mod parser;
pub mod builder;

pub use builder::{build_domain_config, build_registry, compile_sites, export_definitions, export_sites};
pub use parser::{parse_site_definitions, OrderedMap, SiteDefinition};

use argh_core::RegistryError;

/// Error type for site definition compilation.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("Invalid site definitions: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
