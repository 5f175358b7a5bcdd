//! Resolved snapshots of a menu for an external template engine.
//!
//! Every entry point trips the before-render latch of the item it starts from, then reads
//! the tree without touching its flags. Hidden items (see [`MenuTree::is_visible`]) are left
//! out of child lists.

use serde::{Deserialize, Serialize};

use crate::{
    error::MenuError,
    menu::{MenuContext, MenuId, MenuTree},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemView {
    pub name: String,
    pub title: String,
    pub url: Option<String>,
    pub class: Option<String>,
    pub icon: Option<String>,
    pub active: bool,
    pub in_path: bool,
    pub current: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ItemView>,
}

impl ItemView {
    /// Classes for the item's element: its own class, then `active`, `in-path` and `current`
    /// for the flags that are set.
    pub fn css_classes(&self) -> Vec<&str> {
        let mut classes = Vec::new();
        if let Some(class) = self.class.as_deref() {
            classes.push(class);
        }
        if self.active {
            classes.push("active");
        }
        if self.in_path {
            classes.push("in-path");
        }
        if self.current {
            classes.push("current");
        }
        classes
    }
}

impl MenuTree {
    fn snapshot(&self, id: MenuId, ctx: &MenuContext<'_>) -> ItemView {
        let node = self.node(id);
        ItemView {
            name: node.name().to_string(),
            title: node.title(),
            url: self.url(id, ctx.links),
            class: self.class(id),
            icon: self.icon(id),
            active: node.is_active(),
            in_path: node.is_in_path(),
            current: node.is_current(),
            children: Vec::new(),
        }
    }

    fn snapshot_subtree(&self, id: MenuId, ctx: &MenuContext<'_>) -> ItemView {
        let mut view = self.snapshot(id, ctx);
        view.children = self
            .visible_children(id, ctx.authorizer)
            .into_iter()
            .map(|child| self.snapshot_subtree(child, ctx))
            .collect();
        view
    }

    /// `id` itself, or the item called `name` below it: a direct child first, then anywhere
    /// in the sub-tree.
    fn view_entry(&self, id: MenuId, name: Option<&str>) -> Result<MenuId, MenuError> {
        let Some(name) = name else {
            return Ok(id);
        };
        if let Some(child) = self.child(id, name) {
            return Ok(child);
        }
        self.find_descendant_by_name(id, name, true)?
            .ok_or_else(|| MenuError::NotFound(name.to_string()))
    }

    /// A single item, without children.
    pub fn item_view(
        &mut self,
        id: MenuId,
        ctx: &MenuContext<'_>,
    ) -> Result<ItemView, MenuError> {
        self.call_before_render(id)?;
        Ok(self.snapshot(id, ctx))
    }

    /// The item (or its descendant called `name`) with all visible descendants.
    pub fn tree_view(
        &mut self,
        id: MenuId,
        name: Option<&str>,
        ctx: &MenuContext<'_>,
    ) -> Result<ItemView, MenuError> {
        self.call_before_render(id)?;
        let entry = self.view_entry(id, name)?;
        Ok(self.snapshot_subtree(entry, ctx))
    }

    /// Visible direct children of the item (or of its descendant called `name`).
    pub fn children_view(
        &mut self,
        id: MenuId,
        name: Option<&str>,
        ctx: &MenuContext<'_>,
    ) -> Result<Vec<ItemView>, MenuError> {
        self.call_before_render(id)?;
        let entry = self.view_entry(id, name)?;
        Ok(self
            .visible_children(entry, ctx.authorizer)
            .into_iter()
            .map(|child| self.snapshot(child, ctx))
            .collect())
    }

    /// Breadcrumb: the items of [`MenuTree::current_path`].
    pub fn path_view(
        &mut self,
        id: MenuId,
        ctx: &MenuContext<'_>,
    ) -> Result<Vec<ItemView>, MenuError> {
        self.call_before_render(id)?;
        Ok(self
            .current_path(id)
            .into_iter()
            .map(|item| self.snapshot(item, ctx))
            .collect())
    }

    /// The "back" item of [`MenuTree::find_upper`], if there is one.
    pub fn upper_view(
        &mut self,
        id: MenuId,
        ctx: &MenuContext<'_>,
    ) -> Result<Option<ItemView>, MenuError> {
        self.call_before_render(id)?;
        Ok(self
            .find_upper(ctx.links)
            .map(|upper| self.snapshot(upper, ctx)))
    }
}
