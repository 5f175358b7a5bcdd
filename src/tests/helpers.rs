//! Shared test utilities for menu testing

use crate::{
    error::LinkError,
    link::{Link, LinkArgs, LinkResolver},
    menu::{MenuId, MenuTree},
};
use std::collections::BTreeSet;

/// Initialize logging for tests
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

/// Resolver turning `Presenter:action` into `/presenter/action`, with arguments appended as a
/// query string in key order.
#[derive(Debug, Default)]
pub struct FakeLinks {
    pub current: Option<String>,
    /// Targets the resolver refuses to evaluate.
    pub invalid: BTreeSet<String>,
    /// Targets that only produce a degraded link.
    pub degraded: BTreeSet<String>,
}

impl FakeLinks {
    pub fn current(target: &str) -> Self {
        FakeLinks {
            current: Some(target.to_string()),
            ..Default::default()
        }
    }

    pub fn with_invalid(mut self, target: &str) -> Self {
        self.invalid.insert(target.to_string());
        self
    }

    pub fn with_degraded(mut self, target: &str) -> Self {
        self.degraded.insert(target.to_string());
        self
    }
}

impl LinkResolver for FakeLinks {
    fn link(&self, target: &str, args: &LinkArgs) -> Result<String, LinkError> {
        if self.invalid.contains(target) {
            return Err(LinkError::InvalidLink(target.to_string()));
        }
        if self.degraded.contains(target) {
            return Err(LinkError::Degraded(target.to_string()));
        }
        let mut url = format!("/{}", target.replace(':', "/").to_lowercase());
        let query = args
            .iter()
            .map(|(key, value)| match value.as_str() {
                Some(text) => format!("{key}={text}"),
                None => format!("{key}={value}"),
            })
            .collect::<Vec<_>>();
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query.join("&"));
        }
        Ok(url)
    }

    fn is_link_current(&self, target: &str) -> Result<bool, LinkError> {
        if self.invalid.contains(target) {
            return Err(LinkError::InvalidLink(target.to_string()));
        }
        Ok(self.current.as_deref() == Some(target))
    }
}

/// Ids of the items of [`create_sample_tree`].
#[derive(Debug, Clone, Copy)]
pub struct Sample {
    pub root: MenuId,
    pub a: MenuId,
    pub a1: MenuId,
    pub b: MenuId,
}

/// Root (`Homepage:default`) with children A (`Article:default`) and B (`About:default`);
/// A has a child A1 (`Article:show`).
pub fn create_sample_tree() -> (MenuTree, Sample) {
    init_logging();

    let mut tree = MenuTree::new("Home", Some(Link::parse("Homepage:default")));
    let root = tree.root();
    let a = tree
        .add_child(
            root,
            "Articles",
            Some(Link::parse("Article:default")),
            LinkArgs::new(),
            Some("a"),
        )
        .unwrap();
    let a1 = tree
        .add_child(
            a,
            "Article",
            Some(Link::parse("Article:show")),
            LinkArgs::new(),
            Some("a1"),
        )
        .unwrap();
    let b = tree
        .add_child(
            root,
            "About",
            Some(Link::parse("About:default")),
            LinkArgs::new(),
            Some("b"),
        )
        .unwrap();
    (tree, Sample { root, a, a1, b })
}

/// Add an item without a link under `parent`.
pub fn add_plain(tree: &mut MenuTree, parent: MenuId, name: &str) -> MenuId {
    tree.add_child(parent, name, None, LinkArgs::new(), Some(name))
        .unwrap()
}

/// Every item of `tree`, root first.
pub fn all_items(tree: &MenuTree) -> Vec<MenuId> {
    let root = tree.root();
    std::iter::once(root).chain(tree.descendants(root)).collect()
}
