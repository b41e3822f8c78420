use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use argh_core::{ContainerContent, ContainerDescriptor, RootClassBehaviour};

use crate::CompileError;

/// JSON object that keeps its keys in document order.
///
/// Page types are matched first-come-first-served, so their order is part of
/// the configuration. Duplicate keys are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedMap<T>(pub Vec<(String, T)>);

impl<T> OrderedMap<T> {
    pub fn get(&self, key: &str) -> Option<&T> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T> Default for OrderedMap<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> IntoIterator for OrderedMap<T> {
    type Item = (String, T);
    type IntoIter = std::vec::IntoIter<(String, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<T: Serialize> Serialize for OrderedMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct OrderedMapVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<T> {
    type Value = OrderedMap<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries: Vec<(String, T)> = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(key) = access.next_key::<String>()? {
            if entries.iter().any(|(k, _)| *k == key) {
                return Err(de::Error::custom(format!("duplicate key '{key}'")));
            }
            let value = access.next_value()?;
            entries.push((key, value));
        }
        Ok(OrderedMap(entries))
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for OrderedMap<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

/// One site as written in a site definition file.
///
/// The domain is the key of the enclosing object, not a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SiteDefinition {
    #[serde(skip)]
    pub domain: String,
    pub page_types: OrderedMap<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paths: Option<Vec<String>>,
    pub page_containers: OrderedMap<Vec<ContainerDescriptor>>,
    pub container_content: OrderedMap<ContainerContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_block_behaviour: Option<RootClassBehaviour>,
}

/// Parse a site definition file: a JSON object keyed by domain.
pub fn parse_site_definitions(text: &str) -> Result<Vec<SiteDefinition>, CompileError> {
    let sites: OrderedMap<SiteDefinition> = serde_json::from_str(text)?;

    Ok(sites
        .into_iter()
        .map(|(domain, mut definition)| {
            definition.domain = domain;
            definition
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORUM: &str = r##"{
        "forum.example.org": {
            "pageTypes": { "thread": "/t/\\d+", "_default": "/" },
            "paths": ["/t/", "/b/"],
            "pageContainers": { "_default": [{ "selector": "#main" }] },
            "containerContent": {
                "_default": {
                    "comment": {
                        "block": ".post:not([behave])",
                        "text": ".body",
                        "additionalFakeBlockClasses": ["argh-fakeContent--forum"],
                        "additionalFakeBlockControlsClasses": ["argh-controls--forum"]
                    }
                }
            },
            "additionalBlockBehaviour": {
                "rootClasses": ["argh-root"],
                "theme": { "parentBackground": "rgb(0, 0, 0)", "className": "argh-root--dark" }
            }
        },
        "a.example": {
            "pageTypes": { "_default": "/" },
            "pageContainers": { "_default": [{ "selector": "#c" }] },
            "containerContent": { "_default": { "comment": { "block": ".c", "text": ".t" } } }
        }
    }"##;

    #[test]
    fn test_parse_keeps_document_order() {
        let sites = parse_site_definitions(FORUM).unwrap();
        let domains: Vec<_> = sites.iter().map(|s| s.domain.as_str()).collect();
        assert_eq!(domains, vec!["forum.example.org", "a.example"]);

        let labels: Vec<_> = sites[0].page_types.0.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["thread", "_default"]);
        assert_eq!(sites[0].page_types.get("thread").map(String::as_str), Some(r"/t/\d+"));
        assert_eq!(sites[0].page_containers.get("_default").unwrap()[0].selector, "#main");
    }

    #[test]
    fn test_parse_optional_fields() {
        let sites = parse_site_definitions(FORUM).unwrap();
        assert_eq!(sites[0].paths.as_deref(), Some(&["/t/".to_string(), "/b/".to_string()][..]));
        let behaviour = sites[0].additional_block_behaviour.as_ref().unwrap();
        assert_eq!(behaviour.theme.as_ref().unwrap().class_name, "argh-root--dark");

        assert!(sites[1].paths.is_none());
        assert!(sites[1].additional_block_behaviour.is_none());
        let content = sites[1].container_content.get("_default").unwrap();
        assert!(content.comment.additional_fake_block_classes.is_empty());
    }

    #[test]
    fn test_parse_rejects_duplicate_keys() {
        let text = r##"{
            "a.example": {
                "pageTypes": { "_default": "/", "_default": "/x" },
                "pageContainers": { "_default": [] },
                "containerContent": { "_default": { "comment": { "block": ".c", "text": ".t" } } }
            }
        }"##;
        let err = parse_site_definitions(text).unwrap_err();
        assert!(err.to_string().contains("duplicate key '_default'"), "{err}");
    }

    #[test]
    fn test_parse_rejects_unknown_fields() {
        let text = r##"{ "a.example": { "pageType": { "_default": "/" } } }"##;
        assert!(matches!(parse_site_definitions(text), Err(CompileError::Json(_))));
    }

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(parse_site_definitions("[]").is_err());
        assert!(parse_site_definitions("").is_err());
    }

    #[test]
    fn test_parse_empty_object() {
        assert!(parse_site_definitions("{}").unwrap().is_empty());
    }
}
