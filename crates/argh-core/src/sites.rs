//! Built-in site table
//!
//! Adding a site means adding one entry here (or shipping it in a site
//! definition file); the resolver has no per-site code.

use crate::behaviour::RootClassBehaviour;
use crate::registry::{DomainConfig, RegistryError};
use crate::types::{BlockSelectors, ContainerContent, ContainerDescriptor, DEFAULT_PAGE_TYPE};

/// Fragment matching any path on the domain.
const ANY_PATH: &str = "/";

/// Build the configs of every built-in site, in registry order.
pub fn builtin_sites() -> Result<Vec<DomainConfig>, RegistryError> {
    Ok(vec![youtube()?, twitter()?, reddit()?, disqus()?])
}

fn comment_content(block: &str, text: &str, site: &str) -> ContainerContent {
    ContainerContent {
        comment: BlockSelectors {
            block: block.to_string(),
            text: text.to_string(),
            additional_fake_block_classes: vec![format!("argh-fakeContent--{site}")],
            additional_fake_block_controls_classes: vec![format!("argh-controls--{site}")],
        },
    }
}

fn youtube() -> Result<DomainConfig, RegistryError> {
    DomainConfig::builder("www.youtube.com")
        .page_type(DEFAULT_PAGE_TYPE, ANY_PATH)
        .path("/watch")
        .containers(DEFAULT_PAGE_TYPE, [ContainerDescriptor::new("#watch-discussion, #comments")])
        .content(
            DEFAULT_PAGE_TYPE,
            comment_content(
                ".comment-renderer:not([behave]), \
                 ytd-comment-renderer.ytd-comment-thread-renderer:not([behave]), \
                 ytd-comment-renderer.ytd-comment-replies-renderer:not([behave])",
                ".comment-renderer-text-content, yt-formatted-string.ytd-comment-renderer#content-text",
                "youtube",
            ),
        )
        .build()
}

fn twitter() -> Result<DomainConfig, RegistryError> {
    DomainConfig::builder("twitter.com")
        .page_type(DEFAULT_PAGE_TYPE, ANY_PATH)
        .containers(DEFAULT_PAGE_TYPE, [ContainerDescriptor::new(".stream")])
        .content(
            DEFAULT_PAGE_TYPE,
            comment_content(
                ".tweet.js-stream-tweet > .content:not([behave])",
                ".js-tweet-text-container",
                "twitter",
            ),
        )
        .root_classes(RootClassBehaviour::new(["argh-root", "argh-root--twitter"]))
        .build()
}

fn reddit() -> Result<DomainConfig, RegistryError> {
    DomainConfig::builder("www.reddit.com")
        .page_type(DEFAULT_PAGE_TYPE, ANY_PATH)
        .path("/r/")
        .containers(DEFAULT_PAGE_TYPE, [ContainerDescriptor::new(".commentarea")])
        .content(
            DEFAULT_PAGE_TYPE,
            comment_content(".entry.unvoted:not([behave])", ".usertext-body", "reddit"),
        )
        .root_classes(
            RootClassBehaviour::new(["argh-root", "argh-root--reddit"])
                .with_theme("rgb(245, 245, 245)", "argh-root--reddit-theme"),
        )
        .build()
}

fn disqus() -> Result<DomainConfig, RegistryError> {
    DomainConfig::builder("disqus.com")
        .page_type(DEFAULT_PAGE_TYPE, ANY_PATH)
        .path("/embed/comments/")
        .containers(DEFAULT_PAGE_TYPE, [ContainerDescriptor::new("#conversation")])
        .content(
            DEFAULT_PAGE_TYPE,
            comment_content(r#"div[data-role="post-content"]:not([behave])"#, ".post-message", "disqus"),
        )
        .build()
}
