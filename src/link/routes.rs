use std::collections::{BTreeMap, BTreeSet};

use once_cell::sync::Lazy;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use url::{form_urlencoded, Url};

use super::{LinkArgs, LinkResolver, ParamValue};
use crate::error::{LinkError, MenuError};

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern"));

/// Characters escaped in a placeholder value: everything that would end or split a path
/// segment, plus the escape character itself.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Prefix requesting an absolute URL, e.g. `"//Article:show"`.
const ABSOLUTE_PREFIX: &str = "//";
/// Alias for the request currently being served.
const THIS: &str = "this";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentRequest {
    pub target: String,
    #[serde(default)]
    pub args: LinkArgs,
}

/// Pattern-based [`LinkResolver`].
///
/// Targets (`"Presenter:action"`) map to path patterns with `{param}` placeholders. Arguments
/// without a placeholder are appended as a query string. `"Presenter:*"` matches any action of
/// the presenter when asking whether a link is current.
///
/// ```toml
/// base_url = "https://example.org"
///
/// [routes]
/// "Homepage:default" = "/"
/// "Article:show" = "/articles/{id}"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteTable {
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    routes: BTreeMap<String, String>,
    #[serde(default)]
    current: Option<CurrentRequest>,
}

impl RouteTable {
    pub fn new() -> Self {
        RouteTable::default()
    }

    pub fn from_toml_str(content: &str) -> Result<Self, MenuError> {
        let table: RouteTable = toml::from_str(content)?;
        if let Some(base) = &table.base_url {
            Url::parse(base)?;
        }
        tracing::debug!("Loaded route table with {} routes", table.routes.len());
        Ok(table)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, MenuError> {
        Url::parse(base_url)?;
        self.base_url = Some(base_url.to_string());
        Ok(self)
    }

    pub fn route(mut self, target: &str, pattern: &str) -> Self {
        self.routes.insert(target.to_string(), pattern.to_string());
        self
    }

    pub fn set_current(&mut self, target: &str, args: LinkArgs) -> &mut Self {
        self.current = Some(CurrentRequest {
            target: target.to_string(),
            args,
        });
        self
    }

    pub fn current(&self) -> Option<&CurrentRequest> {
        self.current.as_ref()
    }

    fn split_absolute(target: &str) -> (bool, &str) {
        match target.strip_prefix(ABSOLUTE_PREFIX) {
            Some(rest) => (true, rest),
            None => (false, target),
        }
    }

    fn build_path(&self, target: &str, args: &LinkArgs) -> Result<String, LinkError> {
        let pattern = self
            .routes
            .get(target)
            .ok_or_else(|| LinkError::InvalidLink(format!("unknown target '{target}'")))?;

        let mut used = BTreeSet::new();
        let mut missing = Vec::new();
        let path = PLACEHOLDER.replace_all(pattern, |caps: &Captures| {
            let key = &caps[1];
            used.insert(key.to_string());
            match args.get(key).and_then(param_to_string) {
                Some(value) => utf8_percent_encode(&value, PATH_SEGMENT).to_string(),
                None => {
                    missing.push(key.to_string());
                    String::new()
                }
            }
        });
        if !missing.is_empty() {
            return Err(LinkError::InvalidLink(format!(
                "missing parameter(s) {} for '{target}'",
                missing.join(", ")
            )));
        }

        let mut query = form_urlencoded::Serializer::new(String::new());
        let mut has_query = false;
        for (key, value) in args.iter().filter(|(key, _)| !used.contains(*key)) {
            if let Some(value) = param_to_string(value) {
                query.append_pair(key, &value);
                has_query = true;
            }
        }
        if has_query {
            Ok(format!("{path}?{}", query.finish()))
        } else {
            Ok(path.into_owned())
        }
    }
}

impl LinkResolver for RouteTable {
    fn link(&self, target: &str, args: &LinkArgs) -> Result<String, LinkError> {
        let (absolute, target) = Self::split_absolute(target);
        let path = if target == THIS {
            let current = self
                .current
                .as_ref()
                .ok_or_else(|| LinkError::InvalidLink("no current request".to_string()))?;
            let mut merged = current.args.clone();
            merged.extend(args.iter().map(|(k, v)| (k.clone(), v.clone())));
            self.build_path(&current.target, &merged)?
        } else {
            self.build_path(target, args)?
        };

        if !absolute {
            return Ok(path);
        }
        let Some(base) = &self.base_url else {
            return Err(LinkError::Degraded(format!(
                "absolute link to '{target}' requested without a base url"
            )));
        };
        Url::parse(base)
            .and_then(|base| base.join(&path))
            .map(|url| url.to_string())
            .map_err(|e| LinkError::InvalidLink(format!("{e}")))
    }

    fn is_link_current(&self, target: &str) -> Result<bool, LinkError> {
        let (_, target) = Self::split_absolute(target);
        if target == THIS {
            return Ok(self.current.is_some());
        }
        if let Some(presenter) = target.strip_suffix('*') {
            if !self.routes.keys().any(|route| route.starts_with(presenter)) {
                return Err(LinkError::InvalidLink(format!(
                    "no routes for presenter '{presenter}'"
                )));
            }
            return Ok(self
                .current
                .as_ref()
                .is_some_and(|current| current.target.starts_with(presenter)));
        }
        if !self.routes.contains_key(target) {
            return Err(LinkError::InvalidLink(format!("unknown target '{target}'")));
        }
        Ok(self
            .current
            .as_ref()
            .is_some_and(|current| current.target == target))
    }
}

fn param_to_string(value: &ParamValue) -> Option<String> {
    match value {
        ParamValue::Null => None,
        ParamValue::String(s) => Some(s.clone()),
        ParamValue::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
        other => Some(other.to_string()),
    }
}
