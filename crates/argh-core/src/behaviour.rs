//! Per-site block behaviour
//!
//! Some sites need extra treatment of every block the DOM layer takes over,
//! typically extra classes so the placeholder styles fit the host page. The
//! resolver never runs these hooks; it only hands them out.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// DOM element a behaviour is applied to.
pub trait BlockElement {
    /// Add a class to the element's class list.
    fn add_class(&mut self, class: &str);

    /// Computed `background-color` of the element's parent, if it has one.
    fn parent_background_color(&self) -> Option<String>;
}

/// Hook applied by the DOM layer to each matched block element.
pub trait BlockBehaviour: Send + Sync {
    fn apply(&self, block: &mut dyn BlockElement);
}

impl<F> BlockBehaviour for F
where
    F: Fn(&mut dyn BlockElement) + Send + Sync,
{
    fn apply(&self, block: &mut dyn BlockElement) {
        self(block)
    }
}

// =============================================================================
// Root Classes
// =============================================================================

/// Theme class added when the block's parent has a given background.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentTheme {
    /// Computed color string, compared verbatim (e.g. `rgb(245, 245, 245)`)
    pub parent_background: String,
    pub class_name: String,
}

/// Data-only behaviour: mark the block as an Argh root.
///
/// The theme class, when it applies, is added before the root classes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootClassBehaviour {
    pub root_classes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<ParentTheme>,
}

impl RootClassBehaviour {
    pub fn new<I, S>(root_classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            root_classes: root_classes.into_iter().map(Into::into).collect(),
            theme: None,
        }
    }

    pub fn with_theme(mut self, parent_background: impl Into<String>, class_name: impl Into<String>) -> Self {
        self.theme = Some(ParentTheme {
            parent_background: parent_background.into(),
            class_name: class_name.into(),
        });
        self
    }
}

impl BlockBehaviour for RootClassBehaviour {
    fn apply(&self, block: &mut dyn BlockElement) {
        if let Some(theme) = &self.theme {
            if block.parent_background_color().as_deref() == Some(theme.parent_background.as_str()) {
                block.add_class(&theme.class_name);
            }
        }
        for class in &self.root_classes {
            block.add_class(class);
        }
    }
}

// =============================================================================
// Block Hook
// =============================================================================

/// Behaviour slot of a domain config.
#[derive(Clone)]
pub enum BlockHook {
    /// Serializable root-class behaviour
    RootClasses(RootClassBehaviour),
    /// Caller-supplied behaviour; not representable in site definition files
    Custom(Arc<dyn BlockBehaviour>),
}

impl BlockHook {
    pub fn custom(behaviour: impl BlockBehaviour + 'static) -> Self {
        Self::Custom(Arc::new(behaviour))
    }

    /// The data form of this hook, if it has one.
    pub fn as_root_classes(&self) -> Option<&RootClassBehaviour> {
        match self {
            Self::RootClasses(behaviour) => Some(behaviour),
            Self::Custom(_) => None,
        }
    }
}

impl BlockBehaviour for BlockHook {
    fn apply(&self, block: &mut dyn BlockElement) {
        match self {
            Self::RootClasses(behaviour) => behaviour.apply(block),
            Self::Custom(behaviour) => behaviour.apply(block),
        }
    }
}

impl fmt::Debug for BlockHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootClasses(behaviour) => f.debug_tuple("RootClasses").field(behaviour).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<RootClassBehaviour> for BlockHook {
    fn from(behaviour: RootClassBehaviour) -> Self {
        Self::RootClasses(behaviour)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[derive(Debug, Default)]
    pub(crate) struct TestBlock {
        pub classes: Vec<String>,
        pub parent_background: Option<String>,
    }

    impl BlockElement for TestBlock {
        fn add_class(&mut self, class: &str) {
            self.classes.push(class.to_string());
        }

        fn parent_background_color(&self) -> Option<String> {
            self.parent_background.clone()
        }
    }

    #[test]
    fn test_root_classes_in_order() {
        let behaviour = RootClassBehaviour::new(["argh-root", "argh-root--twitter"]);
        let mut block = TestBlock::default();
        behaviour.apply(&mut block);
        assert_eq!(block.classes, vec!["argh-root", "argh-root--twitter"]);
    }

    #[test]
    fn test_theme_class_added_first_on_match() {
        let behaviour = RootClassBehaviour::new(["argh-root", "argh-root--reddit"])
            .with_theme("rgb(245, 245, 245)", "argh-root--reddit-theme");

        let mut block = TestBlock {
            parent_background: Some("rgb(245, 245, 245)".to_string()),
            ..Default::default()
        };
        behaviour.apply(&mut block);
        assert_eq!(
            block.classes,
            vec!["argh-root--reddit-theme", "argh-root", "argh-root--reddit"]
        );

        let mut plain = TestBlock {
            parent_background: Some("rgb(255, 255, 255)".to_string()),
            ..Default::default()
        };
        behaviour.apply(&mut plain);
        assert_eq!(plain.classes, vec!["argh-root", "argh-root--reddit"]);

        let mut orphan = TestBlock::default();
        behaviour.apply(&mut orphan);
        assert_eq!(orphan.classes, vec!["argh-root", "argh-root--reddit"]);
    }

    #[test]
    fn test_custom_hook_from_closure() {
        let hook = BlockHook::custom(|block: &mut dyn BlockElement| block.add_class("custom"));
        let mut block = TestBlock::default();
        hook.apply(&mut block);
        assert_eq!(block.classes, vec!["custom"]);
        assert!(hook.as_root_classes().is_none());
        assert_eq!(format!("{hook:?}"), "Custom(..)");
    }
}
