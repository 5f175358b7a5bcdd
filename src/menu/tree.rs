//! The menu arena and the algorithms operating on it.

use std::{fmt, sync::Arc};

use petgraph::{graph::NodeIndex, visit::EdgeRef, Direction, Graph};

use super::{node::LINK_PARAM_PROCESSOR_ALL, MenuItem, MenuNode};
use crate::{
    auth::Authorizer,
    error::MenuError,
    factory::{DefaultSubmenuFactory, MenuFactory, SubmenuFactory},
    link::{is_absolute_url, Link, LinkArgs, LinkResolver, ParamValue},
    translate::Translator,
};

/// Base of generated item names: `menu`, `menu_1`, `menu_2`, ...
pub const GENERATED_NAME_BASE: &str = "menu";

/// Handle of an item within its [`MenuTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MenuId(NodeIndex);

impl MenuId {
    pub fn index(&self) -> usize {
        self.0.index()
    }
}

impl fmt::Display for MenuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0.index())
    }
}

/// How far [`MenuTree::set_in_path`] walks up from the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InPathScope {
    /// Only the item itself.
    SelfOnly,
    /// The item and this many ancestors.
    Ancestors(usize),
    /// The item and every ancestor up to the root.
    #[default]
    ToRoot,
}

/// A menu: items stored in a graph whose edges run parent → child and carry the child's
/// position among its siblings.
///
/// Items have exactly one parent (except the root) and are never removed, so a [`MenuId`]
/// stays valid for the lifetime of the tree. Methods taking a [`MenuId`] panic when given a
/// handle from another tree.
#[derive(Clone)]
pub struct MenuTree {
    graph: Graph<MenuNode, u16>,
    root: NodeIndex,
    factory: Arc<dyn SubmenuFactory>,
}

impl MenuTree {
    /// A tree made of a single root item named `menu`.
    pub fn new(title: &str, link: Option<Link>) -> Self {
        MenuTree::with_factory(
            MenuNode::new(title, link, LinkArgs::new()),
            Arc::new(DefaultSubmenuFactory::default()),
        )
    }

    /// Like [`MenuTree::new`], with `translator` used by the root and every item created
    /// through [`MenuTree::add_child`].
    pub fn with_translator(
        title: &str,
        link: Option<Link>,
        translator: Arc<dyn Translator>,
    ) -> Self {
        let mut root = MenuNode::new(title, link, LinkArgs::new());
        root.set_translator(Some(translator.clone()));
        MenuTree::with_factory(root, Arc::new(DefaultSubmenuFactory::new(Some(translator))))
    }

    pub fn with_factory(mut root: MenuNode, factory: Arc<dyn SubmenuFactory>) -> Self {
        if root.name.is_empty() {
            root.name = GENERATED_NAME_BASE.to_string();
        }
        let mut graph = Graph::new();
        let root = graph.add_node(root);
        MenuTree {
            graph,
            root,
            factory,
        }
    }

    pub fn root(&self) -> MenuId {
        MenuId(self.root)
    }

    /// The root has no siblings, so it is the only item that may be renamed.
    pub fn set_root_name(&mut self, name: &str) -> Result<(), MenuError> {
        if name.is_empty() {
            return Err(MenuError::Config("empty root item name".to_string()));
        }
        self.graph[self.root].name = name.to_string();
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains(&self, id: MenuId) -> bool {
        self.graph.node_weight(id.0).is_some()
    }

    pub fn node(&self, id: MenuId) -> &MenuNode {
        &self.graph[id.0]
    }

    pub fn node_mut(&mut self, id: MenuId) -> &mut MenuNode {
        &mut self.graph[id.0]
    }

    pub fn item(&self, id: MenuId) -> MenuItem<'_> {
        MenuItem::new(self, id)
    }

    pub fn name(&self, id: MenuId) -> &str {
        self.node(id).name()
    }

    pub fn title(&self, id: MenuId) -> String {
        self.node(id).title()
    }

    pub fn submenu_factory(&self) -> &Arc<dyn SubmenuFactory> {
        &self.factory
    }

    pub fn parent(&self, id: MenuId) -> Option<MenuId> {
        self.graph
            .neighbors_directed(id.0, Direction::Incoming)
            .next()
            .map(MenuId)
    }

    /// Direct children in insertion order.
    pub fn children(&self, id: MenuId) -> Vec<MenuId> {
        let mut children = self
            .graph
            .edges_directed(id.0, Direction::Outgoing)
            .map(|edge| (*edge.weight(), edge.target()))
            .collect::<Vec<_>>();
        children.sort_by_key(|(order, _)| *order);
        children.into_iter().map(|(_, idx)| MenuId(idx)).collect()
    }

    /// Every item below `id`, in pre-order. `id` itself is not included.
    pub fn descendants(&self, id: MenuId) -> Vec<MenuId> {
        let mut result = Vec::new();
        let mut stack = self.children(id);
        stack.reverse();
        while let Some(next) = stack.pop() {
            result.push(next);
            let mut children = self.children(next);
            children.reverse();
            stack.extend(children);
        }
        result
    }

    /// Direct child of `id` called `name`.
    pub fn child(&self, id: MenuId, name: &str) -> Option<MenuId> {
        self.children(id)
            .into_iter()
            .find(|child| self.name(*child) == name)
    }

    fn generate_child_name(&self, id: MenuId) -> String {
        let mut trial = GENERATED_NAME_BASE.to_string();
        let mut count = 1;
        while self.child(id, &trial).is_some() {
            trial = format!("{GENERATED_NAME_BASE}_{count}");
            count += 1;
        }
        trial
    }

    fn attach(
        &mut self,
        parent: MenuId,
        mut node: MenuNode,
        name: Option<&str>,
    ) -> Result<MenuId, MenuError> {
        let name = match name {
            Some("") => {
                return Err(MenuError::Config(format!(
                    "empty item name under '{}'",
                    self.name(parent)
                )));
            }
            Some(name) => {
                if self.child(parent, name).is_some() {
                    return Err(MenuError::DuplicateName {
                        parent: self.name(parent).to_string(),
                        name: name.to_string(),
                    });
                }
                name.to_string()
            }
            None => self.generate_child_name(parent),
        };
        let siblings = self
            .graph
            .edges_directed(parent.0, Direction::Outgoing)
            .count();
        let order = u16::try_from(siblings).map_err(|_| {
            MenuError::Config(format!("too many children under '{}'", self.name(parent)))
        })?;
        node.name = name;
        let idx = self.graph.add_node(node);
        self.graph.add_edge(parent.0, idx, order);
        Ok(MenuId(idx))
    }

    /// Append a new item under `parent`, built by this tree's [`SubmenuFactory`].
    ///
    /// Without `name` one is generated. An explicit `name` already used by a sibling is a
    /// [`MenuError::DuplicateName`].
    pub fn add_child(
        &mut self,
        parent: MenuId,
        title: &str,
        link: Option<Link>,
        link_args: LinkArgs,
        name: Option<&str>,
    ) -> Result<MenuId, MenuError> {
        let node = self.factory.create_submenu(title, link, link_args);
        self.attach(parent, node, name)
    }

    /// Append the sub-tree built by `factory` under `parent`. Returns the id of its root.
    pub fn add_child_from_factory(
        &mut self,
        parent: MenuId,
        factory: &dyn MenuFactory,
        name: Option<&str>,
    ) -> Result<MenuId, MenuError> {
        let subtree = factory.create()?;
        self.graft(parent, subtree, name)
    }

    /// Copy `subtree` under `parent`, keeping its shape, order and item configuration. The
    /// sub-tree's root is renamed to `name` (or a generated name).
    ///
    /// Only items are copied: later [`MenuTree::add_child`] calls below the grafted items use
    /// this tree's [`SubmenuFactory`], not the one `subtree` was built with.
    pub fn graft(
        &mut self,
        parent: MenuId,
        subtree: MenuTree,
        name: Option<&str>,
    ) -> Result<MenuId, MenuError> {
        let sub_root = subtree.root();
        let grafted = self.attach(parent, subtree.node(sub_root).clone(), name)?;
        let mut pending = vec![(sub_root, grafted)];
        while let Some((source, target)) = pending.pop() {
            for child in subtree.children(source) {
                let node = subtree.node(child).clone();
                let name = node.name.clone();
                let copied = self.attach(target, node, Some(&name))?;
                pending.push((child, copied));
            }
        }
        tracing::debug!(
            "Grafted {} item(s) under '{}' as '{}'",
            subtree.len(),
            self.name(parent),
            self.name(grafted)
        );
        Ok(grafted)
    }

    /// Search the whole sub-tree below `id` for an item called `name`.
    ///
    /// When nothing matches, `required` turns the miss into [`MenuError::NotFound`].
    pub fn find_descendant_by_name(
        &self,
        id: MenuId,
        name: &str,
        required: bool,
    ) -> Result<Option<MenuId>, MenuError> {
        let found = self
            .descendants(id)
            .into_iter()
            .find(|candidate| self.name(*candidate) == name);
        if found.is_none() && required {
            return Err(MenuError::NotFound(format!(
                "no item '{name}' below '{}'",
                self.name(id)
            )));
        }
        Ok(found)
    }

    /// Items from the root down to `id`, inclusive.
    pub fn path(&self, id: MenuId) -> Vec<MenuId> {
        let mut path = vec![id];
        let mut current = self.parent(id);
        while let Some(parent) = current {
            path.push(parent);
            current = self.parent(parent);
        }
        path.reverse();
        path
    }

    pub fn depth(&self, id: MenuId) -> usize {
        self.path(id).len() - 1
    }

    /// Items below `id` (pre-order) that are current.
    pub fn find_current(&self, id: MenuId) -> Vec<MenuId> {
        self.descendants(id)
            .into_iter()
            .filter(|candidate| self.node(*candidate).is_current())
            .collect()
    }

    /// Path of the first current item of the tree, or just `[id]` when nothing is current.
    pub fn current_path(&self, id: MenuId) -> Vec<MenuId> {
        match self.find_current(self.root()).first() {
            Some(current) => self.path(*current),
            None => vec![id],
        }
    }

    /// The "back" target for the current item: the nearest currentable ancestor with a URL
    /// that differs from the current one.
    ///
    /// Ancestors are scanned from the parent upwards, the root excluded. When the scan finds
    /// nothing, the root is returned, unless the last ancestor looked at links to the same
    /// URL as the current item.
    pub fn find_upper(&self, links: &dyn LinkResolver) -> Option<MenuId> {
        let current = *self.find_current(self.root()).first()?;
        let url = self.url(current, links);
        let path = self.path(current);
        if path.len() == 1 {
            return None;
        }
        let mut node_url = None;
        for node in path[1..path.len() - 1].iter().rev() {
            node_url = self.url(*node, links);
            if self.node(*node).is_currentable() && node_url.is_some() && node_url != url {
                return Some(*node);
            }
        }
        if node_url == url {
            return None;
        }
        Some(path[0])
    }

    /// The URL of `id`, or `None` when it cannot be formed.
    ///
    /// Absolute `http(s)://` links are returned as they are, even when held as a target.
    /// Nothing is cached. Resolver failures are never raised: a link that cannot be generated
    /// simply has no URL.
    pub fn url(&self, id: MenuId, links: &dyn LinkResolver) -> Option<String> {
        let node = self.node(id);
        match node.link()? {
            Link::Callback(callback) => callback(),
            Link::Url(url) => Some(url.clone()),
            Link::Target(target) if is_absolute_url(target) => Some(target.clone()),
            Link::Target(target) => {
                let mut args = node.link_args().clone();
                if let Some(param) = node.link_param() {
                    let value = node.link_param_value()?;
                    args.insert(param.name.clone(), value.clone());
                }
                match links.link(target, &args) {
                    Ok(url) if !url.is_empty() => Some(url),
                    Ok(_) => {
                        tracing::debug!("Empty link for '{}' ({target})", node.name());
                        None
                    }
                    Err(e) => {
                        tracing::debug!("No link for '{}' ({target}): {e}", node.name());
                        None
                    }
                }
            }
        }
    }

    /// Recompute `active` and `in_path` for the whole tree against the current request.
    pub fn refresh_active_state(&mut self, links: &dyn LinkResolver) -> Result<(), MenuError> {
        self.refresh_active_state_from(self.root(), links)
    }

    /// Recompute `active` for `id` and everything below it. Active items mark their ancestors
    /// as in-path; flags elsewhere are left as they are.
    ///
    /// A target the resolver cannot evaluate is a broken menu entry and aborts the refresh
    /// with [`MenuError::LinkResolution`].
    pub fn refresh_active_state_from(
        &mut self,
        id: MenuId,
        links: &dyn LinkResolver,
    ) -> Result<(), MenuError> {
        let active = match self.node(id).link() {
            Some(Link::Target(target)) if !is_absolute_url(target) => {
                links
                    .is_link_current(target)
                    .map_err(|e| MenuError::LinkResolution {
                        name: self.name(id).to_string(),
                        target: target.clone(),
                        reason: e.to_string(),
                    })?
            }
            _ => false,
        };
        self.set_active(id, active);
        if active {
            tracing::debug!("Menu item '{}' is active", self.name(id));
            self.set_in_path(id, true, InPathScope::ToRoot);
        }
        for child in self.children(id) {
            self.refresh_active_state_from(child, links)?;
        }
        Ok(())
    }

    pub fn set_active(&mut self, id: MenuId, active: bool) {
        self.node_mut(id).active = active;
    }

    /// Set `in_path` of `id` to `value` and mark ancestors within `scope` as in-path.
    pub fn set_in_path(&mut self, id: MenuId, value: bool, scope: InPathScope) {
        self.node_mut(id).in_path = value;
        let mut remaining = match scope {
            InPathScope::SelfOnly => Some(0),
            InPathScope::Ancestors(levels) => Some(levels),
            InPathScope::ToRoot => None,
        };
        let mut current = self.parent(id);
        while let Some(parent) = current {
            if remaining == Some(0) {
                break;
            }
            self.node_mut(parent).in_path = true;
            remaining = remaining.map(|levels| levels - 1);
            current = self.parent(parent);
        }
    }

    /// Cascade a link parameter from `id` to every item below it, self first.
    ///
    /// Each item runs the value through its preprocessor for `key`, then through its wildcard
    /// preprocessor, stores it when it needs `key`, and hands the result on to its children.
    pub fn set_link_param(&mut self, id: MenuId, key: &str, value: ParamValue) {
        let value = {
            let node = self.node(id);
            let item = self.item(id);
            let mut value = value;
            if let Some(preprocessor) = node.preprocessor(key) {
                value = preprocessor(value, key, &item);
            }
            if let Some(preprocessor) = node.preprocessor(LINK_PARAM_PROCESSOR_ALL) {
                value = preprocessor(value, key, &item);
            }
            value
        };
        self.node_mut(id).assign_link_param(key, &value);
        for child in self.children(id) {
            self.set_link_param(child, key, value.clone());
        }
    }

    /// The show flag, ignoring authorization.
    pub fn show(&self, id: MenuId) -> bool {
        self.node(id).show().evaluate(&self.item(id))
    }

    pub fn is_allowed(&self, id: MenuId, authorizer: &dyn Authorizer) -> bool {
        match self.node(id).authorization() {
            None => true,
            Some(auth) => {
                authorizer.is_allowed(auth.resource.as_deref(), auth.privilege.as_deref())
            }
        }
    }

    pub fn is_visible(&self, id: MenuId, authorizer: &dyn Authorizer) -> bool {
        self.show(id) && self.is_allowed(id, authorizer)
    }

    pub fn visible_children(&self, id: MenuId, authorizer: &dyn Authorizer) -> Vec<MenuId> {
        self.children(id)
            .into_iter()
            .filter(|child| self.is_visible(*child, authorizer))
            .collect()
    }

    pub fn class(&self, id: MenuId) -> Option<String> {
        self.node(id).class().evaluate(&self.item(id))
    }

    pub fn icon(&self, id: MenuId) -> Option<String> {
        self.node(id).icon().evaluate(&self.item(id))
    }

    /// Trip the before-render latch of `id`, running its hook the first time only.
    ///
    /// Returns `false` when the latch had already been tripped.
    pub fn call_before_render(&mut self, id: MenuId) -> Result<bool, MenuError> {
        if self.node(id).before_render_called {
            return Ok(false);
        }
        self.node_mut(id).before_render_called = true;
        if let Some(hook) = self.node(id).before_render_hook() {
            tracing::debug!("Running before-render hook of '{}'", self.name(id));
            hook(self, id)?;
        }
        Ok(true)
    }
}

impl fmt::Debug for MenuTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuTree")
            .field("root", &self.root)
            .field("graph", &self.graph)
            .finish_non_exhaustive()
    }
}
