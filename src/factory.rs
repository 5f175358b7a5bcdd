//! Factories used to assemble menus.
//!
//! - [`SubmenuFactory`] builds the single item behind [`MenuTree::add_child`]
//! - [`MenuFactory`] builds a reusable sub-tree for [`MenuTree::add_child_from_factory`]

use std::sync::Arc;

use crate::{
    error::MenuError,
    link::{Link, LinkArgs},
    menu::{MenuNode, MenuTree},
    translate::Translator,
};

pub trait SubmenuFactory: Send + Sync {
    fn create_submenu(&self, title: &str, link: Option<Link>, link_args: LinkArgs) -> MenuNode;
}

/// Creates plain items sharing one optional translator.
#[derive(Clone, Default)]
pub struct DefaultSubmenuFactory {
    translator: Option<Arc<dyn Translator>>,
}

impl DefaultSubmenuFactory {
    pub fn new(translator: Option<Arc<dyn Translator>>) -> Self {
        DefaultSubmenuFactory { translator }
    }
}

impl SubmenuFactory for DefaultSubmenuFactory {
    fn create_submenu(&self, title: &str, link: Option<Link>, link_args: LinkArgs) -> MenuNode {
        let mut node = MenuNode::new(title, link, link_args);
        node.set_translator(self.translator.clone());
        node
    }
}

pub trait MenuFactory {
    fn create(&self) -> Result<MenuTree, MenuError>;
}

impl<F> MenuFactory for F
where
    F: Fn() -> Result<MenuTree, MenuError>,
{
    fn create(&self) -> Result<MenuTree, MenuError> {
        self()
    }
}
