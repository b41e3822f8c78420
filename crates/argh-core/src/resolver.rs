//! Page Resolution
//!
//! URL -> registered domain -> page type -> container and content selectors.
//! Every step is a pure read of the registry and degrades to `None` (or
//! `false` for the path gate) on unknown input.

use crate::registry::{DomainConfig, PageTypeMatcher, SiteRegistry};
use crate::types::{ContainerContent, ContainerDescriptor, PageInfo, DEFAULT_PAGE_TYPE};
use crate::url::extract_host;

impl SiteRegistry {
    /// Registered domain of a URL.
    ///
    /// A URL whose host is not a registry key resolves like a string that is
    /// not a URL at all.
    pub fn page_domain(&self, url: &str) -> Option<&str> {
        let host = extract_host(url)?;
        self.key(host)
    }

    fn lookup(&self, url: &str) -> Option<&DomainConfig> {
        self.get(extract_host(url)?)
    }

    /// Path relevance gate.
    ///
    /// Unknown domains are out of scope; domains without path filters are
    /// in scope everywhere; otherwise any filter must match the full URL.
    pub fn check_paths(&self, url: &str) -> bool {
        let Some(config) = self.lookup(url) else {
            return false;
        };

        match config.paths() {
            Some(filters) => filters.iter().any(|filter| filter.is_match(url)),
            None => true,
        }
    }

    /// First page type, in declaration order, whose matcher hits the URL.
    ///
    /// Falls back to `_default` when nothing matches. Returns `None` for an
    /// empty URL or a domain that is missing or unregistered.
    pub fn page_type(&self, url: &str, domain: Option<&str>) -> Option<&str> {
        if url.is_empty() {
            return None;
        }
        let config = self.get(domain?)?;

        let label = config
            .page_types()
            .iter()
            .find(|matcher| {
                let hit = matcher.is_match(url);
                log::trace!("{}: page type '{}' match={}", config.domain(), matcher.label(), hit);
                hit
            })
            .map(PageTypeMatcher::label)
            .unwrap_or(DEFAULT_PAGE_TYPE);

        Some(label)
    }

    /// Container selectors for an exact page type.
    pub fn page_containers(&self, domain: Option<&str>, page_type: Option<&str>) -> Option<&[ContainerDescriptor]> {
        self.get(domain?)?.page_containers(page_type?)
    }

    /// Content bundle for an exact page type.
    pub fn container_content(&self, domain: Option<&str>, page_type: Option<&str>) -> Option<&ContainerContent> {
        self.get(domain?)?.container_content(page_type?)
    }

    /// Resolve everything the DOM layer needs for a URL.
    ///
    /// The path gate is not applied here; see `check_paths`.
    pub fn page_info(&self, url: &str) -> PageInfo<'_> {
        let domain = self.page_domain(url);
        let page_type = self.page_type(url, domain);
        let info = PageInfo {
            domain,
            page_type,
            page_containers: self.page_containers(domain, page_type),
            container_content: self.container_content(domain, page_type),
        };

        match info.domain {
            Some(domain) => log::debug!("Resolved {url} to {domain} ({})", info.page_type.unwrap_or_default()),
            None => log::debug!("No registered site for {url}"),
        }
        info
    }
}

// =============================================================================
// Built-in Registry Shortcuts
// =============================================================================

/// `SiteRegistry::page_domain` on the built-in table.
pub fn get_page_domain(url: &str) -> Option<&'static str> {
    SiteRegistry::builtin().page_domain(url)
}

/// `SiteRegistry::check_paths` on the built-in table.
pub fn check_paths(url: &str) -> bool {
    SiteRegistry::builtin().check_paths(url)
}

/// `SiteRegistry::page_type` on the built-in table.
pub fn get_page_type(url: &str, domain: Option<&str>) -> Option<&'static str> {
    SiteRegistry::builtin().page_type(url, domain)
}

/// `SiteRegistry::page_info` on the built-in table.
pub fn get_page_info(url: &str) -> PageInfo<'static> {
    SiteRegistry::builtin().page_info(url)
}
