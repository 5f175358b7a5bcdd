//! Menu module: the navigation tree and its state engine.
//!
//! # Module Organization
//!
//! - [`node`]: Item data (`MenuNode`, `Dynamic`, link parameters, hooks)
//! - [`tree`]: The arena (`MenuTree`) with assembly, active/in-path propagation, path queries
//!   and the parameter cascade
//! - [`context`]: Views for closures and renderers (`MenuItem`, `MenuContext`)
//!
//! # Public API
//!
//! ```rust
//! use navmenu_core::menu::{MenuNode, MenuTree, MenuId, MenuItem, MenuContext};
//! ```

mod context;
mod node;
mod tree;

pub use context::{MenuContext, MenuItem};
pub use node::{
    BeforeRenderHook, Dynamic, LinkParam, LinkParamPreprocessor, MenuNode,
    DEFAULT_LINK_PARAM_NAME, LINK_PARAM_PROCESSOR_ALL,
};
pub use tree::{InPathScope, MenuId, MenuTree, GENERATED_NAME_BASE};
