//! Context types for looking at an item together with its tree and request.
//!
//! - [`MenuItem`]: borrowed view of one item, handed to show/class/icon closures and
//!   link-parameter preprocessors
//! - [`MenuContext`]: the collaborators of the request being served

use std::ops::Deref;

use super::{MenuId, MenuNode, MenuTree};
use crate::{auth::Authorizer, link::LinkResolver};

#[derive(Debug, Clone, Copy)]
pub struct MenuItem<'a> {
    tree: &'a MenuTree,
    id: MenuId,
}

impl<'a> MenuItem<'a> {
    pub(super) fn new(tree: &'a MenuTree, id: MenuId) -> Self {
        MenuItem { tree, id }
    }

    pub fn id(&self) -> MenuId {
        self.id
    }

    pub fn tree(&self) -> &'a MenuTree {
        self.tree
    }

    pub fn node(&self) -> &'a MenuNode {
        self.tree.node(self.id)
    }

    pub fn parent(&self) -> Option<MenuItem<'a>> {
        self.tree
            .parent(self.id)
            .map(|parent| MenuItem::new(self.tree, parent))
    }

    pub fn children(&self) -> Vec<MenuItem<'a>> {
        self.tree
            .children(self.id)
            .into_iter()
            .map(|child| MenuItem::new(self.tree, child))
            .collect()
    }

    pub fn path(&self) -> Vec<MenuItem<'a>> {
        self.tree
            .path(self.id)
            .into_iter()
            .map(|id| MenuItem::new(self.tree, id))
            .collect()
    }

    pub fn depth(&self) -> usize {
        self.tree.depth(self.id)
    }

    pub fn is_root(&self) -> bool {
        self.id == self.tree.root()
    }
}

impl Deref for MenuItem<'_> {
    type Target = MenuNode;

    fn deref(&self) -> &MenuNode {
        self.node()
    }
}

/// Collaborators of the request a menu is rendered for.
#[derive(Clone, Copy)]
pub struct MenuContext<'a> {
    pub links: &'a dyn LinkResolver,
    pub authorizer: &'a dyn Authorizer,
}

impl<'a> MenuContext<'a> {
    pub fn new(links: &'a dyn LinkResolver, authorizer: &'a dyn Authorizer) -> Self {
        MenuContext { links, authorizer }
    }
}
