//! # navmenu-core
//!
//! A stateful navigation menu tree for request-driven web applications.
//!
//! ## Overview
//!
//! Every item of a menu is a node in a tree owned top-down by its parent. Rendering markup is
//! left to the host; this crate does the bookkeeping that makes a menu "know where it is":
//!
//! - **Active state**: which items link to the request being served
//! - **In-path propagation**: ancestors of an active item are marked so they can stay open
//! - **Lazy link resolution**: URLs are built on demand through the host's router and are
//!   simply absent when they cannot be built
//! - **Parameter cascade**: a value (e.g. the id of the article being shown) is pushed down a
//!   sub-tree, through per-item preprocessors, into the items that need it
//! - **Path queries**: breadcrumb of the current item, and the nearest distinct "back" target
//!
//! ## Architecture
//!
//! - **[`menu`]**: The tree (`MenuTree`), its items (`MenuNode`) and the state engine
//! - **[`link`]**: Link descriptors, the `LinkResolver` contract and a `RouteTable` resolver
//! - **[`auth`]**: Authorization descriptors and the `Authorizer` contract
//! - **[`translate`]**: The `Translator` contract for titles
//! - **[`factory`]**: Item and sub-tree factories
//! - **[`config`]**: TOML menu definitions
//! - **[`view`]**: Serialisable snapshots for an external template engine
//!
//! ## Quick Start
//!
//! ```rust
//! use navmenu_core::{
//!     auth::AllowAll,
//!     link::{Link, LinkArgs, RouteTable},
//!     menu::{MenuContext, MenuTree},
//!     MenuError,
//! };
//!
//! fn main() -> Result<(), MenuError> {
//!     let mut routes = RouteTable::new()
//!         .route("Homepage:default", "/")
//!         .route("Article:default", "/articles")
//!         .route("Article:show", "/articles/{id}");
//!
//!     let mut menu = MenuTree::new("Home", Some(Link::parse("Homepage:default")));
//!     let root = menu.root();
//!     let articles = menu.add_child(
//!         root,
//!         "Articles",
//!         Some(Link::parse("Article:default")),
//!         LinkArgs::new(),
//!         Some("articles"),
//!     )?;
//!     let detail = menu.add_child(
//!         articles,
//!         "Detail",
//!         Some(Link::parse("Article:show")),
//!         LinkArgs::new(),
//!         Some("detail"),
//!     )?;
//!     menu.node_mut(detail).set_link_param_needed("article", None, "id");
//!
//!     // The request for article 42 is being served
//!     routes.set_current("Article:show", LinkArgs::new());
//!     menu.refresh_active_state(&routes)?;
//!     menu.set_link_param(root, "article", serde_json::json!(42));
//!
//!     assert_eq!(menu.current_path(root), vec![root, articles, detail]);
//!     assert_eq!(menu.url(detail, &routes).as_deref(), Some("/articles/42"));
//!     assert_eq!(menu.find_upper(&routes), Some(articles));
//!
//!     let ctx = MenuContext::new(&routes, &AllowAll);
//!     let breadcrumb = menu.path_view(root, &ctx)?;
//!     assert_eq!(breadcrumb.len(), 3);
//!     Ok(())
//! }
//! ```
//!
//! ## Errors
//!
//! Configuration problems (duplicate names, missing items, links the router cannot evaluate
//! while refreshing the active state) are [`MenuError`]s. A URL that cannot be built yet is
//! not an error: [`menu::MenuTree::url`] returns `None`.
//!
//! ## Features
//!
//! - **default**: The library
//! - **bin**: The `navmenu` CLI

pub mod auth;
pub mod config;
pub mod error;
pub mod factory;
pub mod link;
pub mod menu;
pub mod translate;
pub mod view;

#[cfg(test)]
mod tests;

pub use error::*;
