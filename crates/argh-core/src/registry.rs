//! Site Registry
//!
//! One `DomainConfig` per registered host, keyed by the exact host string.
//! Every pattern is compiled when a config is built, so a registry that
//! exists is a registry that resolves: no lookup ever compiles or fails.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::behaviour::{BlockBehaviour, BlockHook, RootClassBehaviour};
use crate::types::{ContainerContent, ContainerDescriptor, DEFAULT_PAGE_TYPE};
use crate::url::is_host_delimiter;

/// Error type for registry construction.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Empty domain key")]
    EmptyDomain,
    #[error("Domain '{0}' contains a URL delimiter and can never match")]
    InvalidDomain(String),
    #[error("Domain '{domain}' has no '_default' entry in {table}")]
    MissingDefault { domain: String, table: &'static str },
    #[error("Domain '{domain}' declares page type '{label}' more than once")]
    DuplicatePageType { domain: String, label: String },
    #[error("Domain '{domain}' has an invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        domain: String,
        pattern: String,
        source: regex::Error,
    },
    #[error("Domain '{0}' is registered more than once")]
    DuplicateDomain(String),
}

// =============================================================================
// Matchers
// =============================================================================

/// Page-type label with its compiled full-URL matcher.
#[derive(Debug, Clone)]
pub struct PageTypeMatcher {
    label: String,
    fragment: String,
    regex: Regex,
}

impl PageTypeMatcher {
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Fragment as authored, without the domain prefix.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Unanchored match against the full URL.
    #[inline]
    pub fn is_match(&self, url: &str) -> bool {
        self.regex.is_match(url)
    }
}

/// Compiled path relevance filter.
#[derive(Debug, Clone)]
pub struct PathFilter {
    fragment: String,
    regex: Regex,
}

impl PathFilter {
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    #[inline]
    pub fn is_match(&self, url: &str) -> bool {
        self.regex.is_match(url)
    }
}

// =============================================================================
// Domain Config
// =============================================================================

/// Configuration of one registered domain.
#[derive(Debug, Clone)]
pub struct DomainConfig {
    domain: String,
    page_types: Vec<PageTypeMatcher>,
    paths: Option<Vec<PathFilter>>,
    page_containers: HashMap<String, Vec<ContainerDescriptor>>,
    container_content: HashMap<String, ContainerContent>,
    block_hook: Option<BlockHook>,
}

impl DomainConfig {
    pub fn builder(domain: impl Into<String>) -> DomainConfigBuilder {
        DomainConfigBuilder::new(domain)
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Page-type matchers in declaration order.
    pub fn page_types(&self) -> &[PageTypeMatcher] {
        &self.page_types
    }

    /// Path filters, or `None` when the domain has no path gate.
    pub fn paths(&self) -> Option<&[PathFilter]> {
        self.paths.as_deref()
    }

    pub fn page_containers(&self, page_type: &str) -> Option<&[ContainerDescriptor]> {
        self.page_containers.get(page_type).map(Vec::as_slice)
    }

    pub fn container_content(&self, page_type: &str) -> Option<&ContainerContent> {
        self.container_content.get(page_type)
    }

    /// All container tables, sorted by page type.
    pub fn page_container_entries(&self) -> Vec<(&str, &[ContainerDescriptor])> {
        let mut entries: Vec<_> = self
            .page_containers
            .iter()
            .map(|(label, containers)| (label.as_str(), containers.as_slice()))
            .collect();
        entries.sort_by_key(|(label, _)| *label);
        entries
    }

    /// All content bundles, sorted by page type.
    pub fn container_content_entries(&self) -> Vec<(&str, &ContainerContent)> {
        let mut entries: Vec<_> = self
            .container_content
            .iter()
            .map(|(label, content)| (label.as_str(), content))
            .collect();
        entries.sort_by_key(|(label, _)| *label);
        entries
    }

    pub fn block_hook(&self) -> Option<&BlockHook> {
        self.block_hook.as_ref()
    }
}

/// Builder for `DomainConfig`; validation happens in `build`.
#[derive(Debug, Clone, Default)]
pub struct DomainConfigBuilder {
    domain: String,
    page_types: Vec<(String, String)>,
    paths: Option<Vec<String>>,
    page_containers: HashMap<String, Vec<ContainerDescriptor>>,
    container_content: HashMap<String, ContainerContent>,
    block_hook: Option<BlockHook>,
}

impl DomainConfigBuilder {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..Default::default()
        }
    }

    /// Append a page type. Earlier page types win over later ones.
    pub fn page_type(mut self, label: impl Into<String>, fragment: impl Into<String>) -> Self {
        self.page_types.push((label.into(), fragment.into()));
        self
    }

    /// Append a path filter, enabling the path gate for this domain.
    pub fn path(mut self, fragment: impl Into<String>) -> Self {
        self.paths.get_or_insert_with(Vec::new).push(fragment.into());
        self
    }

    /// Replace the path filters. An empty list keeps the gate enabled and
    /// rejects every URL.
    pub fn paths<I, S>(mut self, fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paths = Some(fragments.into_iter().map(Into::into).collect());
        self
    }

    pub fn containers<I>(mut self, page_type: impl Into<String>, containers: I) -> Self
    where
        I: IntoIterator<Item = ContainerDescriptor>,
    {
        self.page_containers
            .insert(page_type.into(), containers.into_iter().collect());
        self
    }

    pub fn content(mut self, page_type: impl Into<String>, content: ContainerContent) -> Self {
        self.container_content.insert(page_type.into(), content);
        self
    }

    pub fn root_classes(self, behaviour: RootClassBehaviour) -> Self {
        self.hook(BlockHook::RootClasses(behaviour))
    }

    pub fn behaviour(self, behaviour: impl BlockBehaviour + 'static) -> Self {
        self.hook(BlockHook::custom(behaviour))
    }

    pub fn hook(mut self, hook: BlockHook) -> Self {
        self.block_hook = Some(hook);
        self
    }

    /// Validate the tables and compile every pattern.
    pub fn build(self) -> Result<DomainConfig, RegistryError> {
        let domain = self.domain;
        if domain.is_empty() {
            return Err(RegistryError::EmptyDomain);
        }
        if domain.bytes().any(is_host_delimiter) {
            return Err(RegistryError::InvalidDomain(domain));
        }

        require_default(&domain, "pageTypes", self.page_types.iter().any(|(label, _)| label == DEFAULT_PAGE_TYPE))?;
        require_default(&domain, "pageContainers", self.page_containers.contains_key(DEFAULT_PAGE_TYPE))?;
        require_default(&domain, "containerContent", self.container_content.contains_key(DEFAULT_PAGE_TYPE))?;

        let escaped = regex::escape(&domain);
        let mut page_types: Vec<PageTypeMatcher> = Vec::with_capacity(self.page_types.len());
        for (label, fragment) in self.page_types {
            if page_types.iter().any(|matcher| matcher.label == label) {
                return Err(RegistryError::DuplicatePageType { domain, label });
            }
            let regex = compile_pattern(&domain, &format!("{escaped}{fragment}"))?;
            page_types.push(PageTypeMatcher { label, fragment, regex });
        }

        let paths = match self.paths {
            Some(fragments) => {
                let mut filters = Vec::with_capacity(fragments.len());
                for fragment in fragments {
                    let regex = compile_pattern(&domain, &fragment)?;
                    filters.push(PathFilter { fragment, regex });
                }
                Some(filters)
            }
            None => None,
        };

        Ok(DomainConfig {
            domain,
            page_types,
            paths,
            page_containers: self.page_containers,
            container_content: self.container_content,
            block_hook: self.block_hook,
        })
    }
}

fn require_default(domain: &str, table: &'static str, present: bool) -> Result<(), RegistryError> {
    if present {
        Ok(())
    } else {
        Err(RegistryError::MissingDefault {
            domain: domain.to_string(),
            table,
        })
    }
}

fn compile_pattern(domain: &str, pattern: &str) -> Result<Regex, RegistryError> {
    Regex::new(pattern).map_err(|source| RegistryError::InvalidPattern {
        domain: domain.to_string(),
        pattern: pattern.to_string(),
        source,
    })
}

// =============================================================================
// Site Registry
// =============================================================================

static BUILTIN_REGISTRY: OnceLock<SiteRegistry> = OnceLock::new();

/// Immutable set of domain configs with exact-host lookup.
#[derive(Debug, Clone, Default)]
pub struct SiteRegistry {
    sites: Vec<DomainConfig>,
    index: HashMap<String, usize>,
}

impl SiteRegistry {
    /// Create a registry. Domains keep the order they are given in.
    pub fn new(sites: Vec<DomainConfig>) -> Result<Self, RegistryError> {
        let mut index = HashMap::with_capacity(sites.len());
        for (i, site) in sites.iter().enumerate() {
            if index.insert(site.domain.clone(), i).is_some() {
                return Err(RegistryError::DuplicateDomain(site.domain.clone()));
            }
        }

        log::info!("Site registry built with {} domains", sites.len());
        Ok(Self { sites, index })
    }

    /// The built-in site table, built on first use.
    pub fn builtin() -> &'static SiteRegistry {
        BUILTIN_REGISTRY.get_or_init(|| {
            crate::sites::builtin_sites()
                .and_then(SiteRegistry::new)
                .expect("built-in site table is valid")
        })
    }

    pub fn get(&self, domain: &str) -> Option<&DomainConfig> {
        self.index.get(domain).map(|&i| &self.sites[i])
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.index.contains_key(domain)
    }

    /// The registry's own copy of a domain key.
    pub fn key(&self, domain: &str) -> Option<&str> {
        self.get(domain).map(DomainConfig::domain)
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DomainConfig> {
        self.sites.iter()
    }

    /// Block hook of a domain, for the DOM layer to apply.
    pub fn block_behaviour(&self, domain: &str) -> Option<&dyn BlockBehaviour> {
        self.get(domain)?
            .block_hook()
            .map(|hook| hook as &dyn BlockBehaviour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behaviour::tests::TestBlock;
    use crate::types::BlockSelectors;

    fn content() -> ContainerContent {
        ContainerContent {
            comment: BlockSelectors {
                block: ".comment".to_string(),
                text: ".text".to_string(),
                additional_fake_block_classes: Vec::new(),
                additional_fake_block_controls_classes: Vec::new(),
            },
        }
    }

    fn minimal(domain: &str) -> DomainConfigBuilder {
        DomainConfig::builder(domain)
            .page_type(DEFAULT_PAGE_TYPE, "/")
            .containers(DEFAULT_PAGE_TYPE, [ContainerDescriptor::new("#comments")])
            .content(DEFAULT_PAGE_TYPE, content())
    }

    #[test]
    fn test_build_minimal() {
        let config = minimal("example.com").build().unwrap();
        assert_eq!(config.domain(), "example.com");
        assert_eq!(config.page_types().len(), 1);
        assert!(config.paths().is_none());
        assert_eq!(config.page_containers(DEFAULT_PAGE_TYPE).unwrap()[0].selector, "#comments");
        assert!(config.page_containers("thread").is_none());
        assert!(config.container_content(DEFAULT_PAGE_TYPE).is_some());
        assert!(config.block_hook().is_none());
    }

    #[test]
    fn test_missing_default_tables() {
        let err = DomainConfig::builder("example.com")
            .page_type("thread", "/t/")
            .containers(DEFAULT_PAGE_TYPE, [ContainerDescriptor::new("#c")])
            .content(DEFAULT_PAGE_TYPE, content())
            .build()
            .unwrap_err();
        assert!(matches!(err, RegistryError::MissingDefault { table: "pageTypes", .. }));

        let err = DomainConfig::builder("example.com")
            .page_type(DEFAULT_PAGE_TYPE, "/")
            .content(DEFAULT_PAGE_TYPE, content())
            .build()
            .unwrap_err();
        assert!(matches!(err, RegistryError::MissingDefault { table: "pageContainers", .. }));

        let err = DomainConfig::builder("example.com")
            .page_type(DEFAULT_PAGE_TYPE, "/")
            .containers(DEFAULT_PAGE_TYPE, [ContainerDescriptor::new("#c")])
            .build()
            .unwrap_err();
        assert!(matches!(err, RegistryError::MissingDefault { table: "containerContent", .. }));
    }

    #[test]
    fn test_invalid_domains() {
        assert!(matches!(minimal("").build(), Err(RegistryError::EmptyDomain)));
        assert!(matches!(minimal("example.com:8080").build(), Err(RegistryError::InvalidDomain(_))));
        assert!(matches!(minimal("example.com/path").build(), Err(RegistryError::InvalidDomain(_))));
    }

    #[test]
    fn test_invalid_patterns() {
        let err = minimal("example.com").page_type("broken", "/(").build().unwrap_err();
        match err {
            RegistryError::InvalidPattern { domain, pattern, .. } => {
                assert_eq!(domain, "example.com");
                assert_eq!(pattern, r"example\.com/(");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = minimal("example.com").path("[").build().unwrap_err();
        assert!(matches!(err, RegistryError::InvalidPattern { .. }));
    }

    #[test]
    fn test_duplicate_page_type() {
        let err = minimal("example.com")
            .page_type(DEFAULT_PAGE_TYPE, "/other")
            .build()
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicatePageType { .. }));
    }

    #[test]
    fn test_domain_dots_are_literal() {
        let config = minimal("www.example.com").build().unwrap();
        let matcher = &config.page_types()[0];
        assert!(matcher.is_match("https://www.example.com/"));
        assert!(!matcher.is_match("https://wwwxexample.com/"));
        assert_eq!(matcher.fragment(), "/");
    }

    #[test]
    fn test_registry_lookup() {
        let registry = SiteRegistry::new(vec![
            minimal("a.example").build().unwrap(),
            minimal("b.example").build().unwrap(),
        ])
        .unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("a.example"));
        assert!(!registry.contains("A.example"));
        assert_eq!(registry.key("b.example"), Some("b.example"));
        let domains: Vec<_> = registry.iter().map(DomainConfig::domain).collect();
        assert_eq!(domains, vec!["a.example", "b.example"]);
    }

    #[test]
    fn test_registry_duplicate_domain() {
        let err = SiteRegistry::new(vec![
            minimal("a.example").build().unwrap(),
            minimal("a.example").build().unwrap(),
        ])
        .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateDomain(domain) if domain == "a.example"));
    }

    #[test]
    fn test_block_behaviour_lookup() {
        let registry = SiteRegistry::new(vec![
            minimal("a.example")
                .root_classes(RootClassBehaviour::new(["argh-root"]))
                .build()
                .unwrap(),
            minimal("b.example").build().unwrap(),
        ])
        .unwrap();

        let mut block = TestBlock::default();
        registry.block_behaviour("a.example").unwrap().apply(&mut block);
        assert_eq!(block.classes, vec!["argh-root"]);
        assert!(registry.block_behaviour("b.example").is_none());
        assert!(registry.block_behaviour("c.example").is_none());
    }

    #[test]
    fn test_entries_sorted() {
        let config = minimal("example.com")
            .containers("thread", [ContainerDescriptor::new("#thread")])
            .content("thread", content())
            .build()
            .unwrap();
        let labels: Vec<_> = config.page_container_entries().into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec![DEFAULT_PAGE_TYPE, "thread"]);
        assert_eq!(config.container_content_entries().len(), 2);
    }
}
