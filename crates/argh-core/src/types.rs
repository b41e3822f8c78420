//! Core type definitions for Argh
//!
//! Plain data shared by the registry, the resolver and the site definition
//! loader. Serde field names follow the site definition file format.

use serde::{Deserialize, Serialize};

/// Page type every domain table must define.
pub const DEFAULT_PAGE_TYPE: &str = "_default";

// =============================================================================
// Selectors
// =============================================================================

/// Region of a page where blockable content lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerDescriptor {
    /// CSS selector (may be a selector list)
    pub selector: String,
}

impl ContainerDescriptor {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
        }
    }
}

/// Selectors for individual blocks inside a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSelectors {
    /// Selector of a single content block
    pub block: String,
    /// Selector of the block's text, relative to the block
    pub text: String,
    /// Extra classes for the placeholder that replaces a block
    #[serde(default)]
    pub additional_fake_block_classes: Vec<String>,
    /// Extra classes for the placeholder's controls
    #[serde(default)]
    pub additional_fake_block_controls_classes: Vec<String>,
}

/// Content bundle for one page type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerContent {
    pub comment: BlockSelectors,
}

// =============================================================================
// Page Info
// =============================================================================

/// Result of resolving a URL against a registry.
///
/// Borrows from the registry it was resolved against. When `domain` is `None`
/// every other field is `None` as well.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo<'a> {
    pub domain: Option<&'a str>,
    pub page_type: Option<&'a str>,
    pub page_containers: Option<&'a [ContainerDescriptor]>,
    pub container_content: Option<&'a ContainerContent>,
}

impl PageInfo<'_> {
    /// True if the URL belongs to a registered site.
    pub fn is_known(&self) -> bool {
        self.domain.is_some()
    }
}
