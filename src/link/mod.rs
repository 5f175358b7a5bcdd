//! Link descriptors and the link-resolution contract.
//!
//! A menu item points somewhere through a [`Link`]. Only [`Link::Target`] links are handed to
//! the host's [`LinkResolver`]; absolute URLs and callbacks are resolved by the item itself.
//!
//! - [`routes`]: [`RouteTable`], a small pattern-based resolver usable without a host framework

mod routes;

pub use routes::{CurrentRequest, RouteTable};

use std::{collections::BTreeMap, fmt, sync::Arc};

use crate::error::LinkError;

/// Value of a link argument. `Null` counts as "no value".
pub type ParamValue = serde_json::Value;

/// Arguments handed to the [`LinkResolver`] together with a target.
pub type LinkArgs = BTreeMap<String, ParamValue>;

pub type LinkCallback = Arc<dyn Fn() -> Option<String> + Send + Sync>;

/// True for strings carrying a literal `http://` or `https://` prefix.
pub fn is_absolute_url(link: &str) -> bool {
    link.starts_with("http://") || link.starts_with("https://")
}

#[derive(Clone)]
pub enum Link {
    /// Absolute URL, returned verbatim and never passed to the resolver.
    Url(String),
    /// Zero-argument callback producing the URL directly.
    Callback(LinkCallback),
    /// Opaque target understood by the [`LinkResolver`], e.g. `"Article:show"`.
    Target(String),
}

impl Link {
    /// Classify a link string: absolute URLs become [`Link::Url`], everything else is a target.
    pub fn parse(link: &str) -> Link {
        if is_absolute_url(link) {
            Link::Url(link.to_string())
        } else {
            Link::Target(link.to_string())
        }
    }

    pub fn callback<F>(callback: F) -> Link
    where
        F: Fn() -> Option<String> + Send + Sync + 'static,
    {
        Link::Callback(Arc::new(callback))
    }

    /// True for absolute URLs, including targets that carry an `http(s)://` prefix.
    pub fn is_direct_url(&self) -> bool {
        match self {
            Link::Url(_) => true,
            Link::Target(target) => is_absolute_url(target),
            Link::Callback(_) => false,
        }
    }

    pub fn target(&self) -> Option<&str> {
        match self {
            Link::Target(target) => Some(target),
            _ => None,
        }
    }
}

impl From<&str> for Link {
    fn from(link: &str) -> Self {
        Link::parse(link)
    }
}

impl From<String> for Link {
    fn from(link: String) -> Self {
        Link::parse(&link)
    }
}

impl fmt::Debug for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Link::Url(url) => f.debug_tuple("Url").field(url).finish(),
            Link::Callback(_) => f.write_str("Callback(..)"),
            Link::Target(target) => f.debug_tuple("Target").field(target).finish(),
        }
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Link::Url(url) => write!(f, "{url}"),
            Link::Callback(_) => write!(f, "<callback>"),
            Link::Target(target) => write!(f, "{target}"),
        }
    }
}

/// The host's routing / link generation, as seen by a menu.
pub trait LinkResolver {
    /// Build the URL for `target` with `args`.
    fn link(&self, target: &str, args: &LinkArgs) -> Result<String, LinkError>;

    /// Does `target` designate the request currently being served?
    fn is_link_current(&self, target: &str) -> Result<bool, LinkError>;
}
