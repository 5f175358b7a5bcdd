//! Declarative menu definitions.
//!
//! A [`MenuDefinition`] describes a menu (or a reusable sub-tree) in TOML:
//!
//! ```toml
//! title = "Main"
//!
//! [[items]]
//! name = "articles"
//! title = "Articles"
//! link = "Article:default"
//!
//! [[items.items]]
//! name = "detail"
//! title = "Article detail"
//! link = "Article:show"
//! param = { key = "article" }
//! authorization = { resource = "article", privilege = "view" }
//! ```
//!
//! Closures (callback links, computed show/class/icon, preprocessors) cannot be expressed in
//! a definition and are attached to the built tree afterwards.

use std::{fs::read_to_string, path::Path, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{
    auth::Authorization,
    error::MenuError,
    factory::{DefaultSubmenuFactory, MenuFactory},
    link::{Link, LinkArgs, ParamValue},
    menu::{MenuId, MenuNode, MenuTree, DEFAULT_LINK_PARAM_NAME},
    translate::Translator,
};

fn default_true() -> bool {
    true
}

fn default_param_name() -> String {
    DEFAULT_LINK_PARAM_NAME.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDefinition {
    pub key: String,
    #[serde(default)]
    pub default: Option<ParamValue>,
    #[serde(default = "default_param_name")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuDefinition {
    #[serde(default)]
    pub name: Option<String>,
    pub title: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub args: LinkArgs,
    #[serde(default = "default_true")]
    pub show: bool,
    #[serde(default = "default_true")]
    pub currentable: bool,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub disable_translation: bool,
    #[serde(default)]
    pub authorization: Option<Authorization>,
    #[serde(default)]
    pub param: Option<ParamDefinition>,
    #[serde(default)]
    pub items: Vec<MenuDefinition>,
}

impl MenuDefinition {
    pub fn from_toml_str(content: &str) -> Result<Self, MenuError> {
        let definition: MenuDefinition = toml::from_str(content)?;
        Ok(definition)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, MenuError> {
        tracing::debug!("Reading menu definition from {:?}", path.as_ref());
        let content = read_to_string(path)?;
        MenuDefinition::from_toml_str(&content)
    }

    /// Build the described tree. `translator`, when given, is used by every item.
    pub fn build(&self, translator: Option<Arc<dyn Translator>>) -> Result<MenuTree, MenuError> {
        let mut root = MenuNode::new(&self.title, self.link(), self.args.clone());
        root.set_translator(translator.clone());
        self.configure(&mut root);
        let mut tree =
            MenuTree::with_factory(root, Arc::new(DefaultSubmenuFactory::new(translator)));
        if let Some(name) = &self.name {
            tree.set_root_name(name)?;
        }
        let root = tree.root();
        for item in &self.items {
            item.add_to(&mut tree, root)?;
        }
        tracing::debug!("Built menu '{}' with {} item(s)", tree.name(root), tree.len());
        Ok(tree)
    }

    fn link(&self) -> Option<Link> {
        self.link.as_deref().map(Link::parse)
    }

    fn add_to(&self, tree: &mut MenuTree, parent: MenuId) -> Result<MenuId, MenuError> {
        let id = tree.add_child(
            parent,
            &self.title,
            self.link(),
            self.args.clone(),
            self.name.as_deref(),
        )?;
        self.configure(tree.node_mut(id));
        for item in &self.items {
            item.add_to(tree, id)?;
        }
        Ok(id)
    }

    fn configure(&self, node: &mut MenuNode) {
        node.set_show(self.show)
            .set_currentable(self.currentable)
            .disable_translation(self.disable_translation);
        if let Some(class) = &self.class {
            node.set_class(class);
        }
        if let Some(icon) = &self.icon {
            node.set_icon(icon);
        }
        if let Some(auth) = &self.authorization {
            node.set_authorization(auth.resource.as_deref(), auth.privilege.as_deref());
        }
        if let Some(param) = &self.param {
            node.set_link_param_needed(&param.key, param.default.clone(), &param.name);
        }
    }
}

impl MenuFactory for MenuDefinition {
    fn create(&self) -> Result<MenuTree, MenuError> {
        self.build(None)
    }
}

/// A definition paired with the translator its items are built with, for grafting into a
/// translated menu through [`MenuTree::add_child_from_factory`].
#[derive(Clone)]
pub struct DefinitionFactory<'a> {
    definition: &'a MenuDefinition,
    translator: Option<Arc<dyn Translator>>,
}

impl MenuDefinition {
    pub fn factory(&self, translator: Option<Arc<dyn Translator>>) -> DefinitionFactory<'_> {
        DefinitionFactory {
            definition: self,
            translator,
        }
    }
}

impl MenuFactory for DefinitionFactory<'_> {
    fn create(&self) -> Result<MenuTree, MenuError> {
        self.definition.build(self.translator.clone())
    }
}
