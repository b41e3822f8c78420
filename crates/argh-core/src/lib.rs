//! Argh Core Library
//!
//! This crate provides the site resolution engine for the Argh comment blocker.
//! Given the URL of the page a content script runs in, it answers which
//! registered site the page belongs to, which page type is being viewed and
//! which DOM selectors apply to that combination.
//!
//! # Architecture
//!
//! The registry is static configuration: one `DomainConfig` per exact host,
//! with every pattern compiled when the config is built. Resolution is a
//! chain of pure lookups (host -> domain -> page type -> containers/content)
//! that never allocates patterns and never fails; unknown input resolves to
//! `None`.
//!
//! # Modules
//!
//! - `behaviour`: Per-site block hook invoked by the DOM layer
//! - `registry`: Site registry, domain configs and load-time validation
//! - `resolver`: Page resolution over a registry
//! - `sites`: Built-in site table
//! - `types`: Shared type definitions
//! - `url`: Scheme and host extraction without allocations

pub mod behaviour;
pub mod registry;
pub mod resolver;
pub mod sites;
pub mod types;
pub mod url;

// Re-export commonly used types
pub use behaviour::{BlockBehaviour, BlockElement, BlockHook, ParentTheme, RootClassBehaviour};
pub use registry::{DomainConfig, DomainConfigBuilder, RegistryError, SiteRegistry};
pub use resolver::{check_paths, get_page_domain, get_page_info, get_page_type};
pub use types::{BlockSelectors, ContainerContent, ContainerDescriptor, PageInfo, DEFAULT_PAGE_TYPE};
