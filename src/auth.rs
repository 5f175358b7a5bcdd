//! Authorization descriptors and the authorizer contract.

use serde::{Deserialize, Serialize};

/// Resource + privilege pair a menu item requires. `None` on either side means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authorization {
    #[serde(default)]
    pub resource: Option<String>,
    #[serde(default)]
    pub privilege: Option<String>,
}

impl Authorization {
    pub fn new(resource: Option<&str>, privilege: Option<&str>) -> Self {
        Authorization {
            resource: resource.map(str::to_string),
            privilege: privilege.map(str::to_string),
        }
    }
}

/// Answers allow/deny for the actor of the current request.
pub trait Authorizer {
    fn is_allowed(&self, resource: Option<&str>, privilege: Option<&str>) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl Authorizer for AllowAll {
    fn is_allowed(&self, _resource: Option<&str>, _privilege: Option<&str>) -> bool {
        true
    }
}

/// Allow-list of rules. A rule with `None` for the resource or privilege grants every value.
/// Anything not granted is denied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticAcl {
    #[serde(default)]
    allow: Vec<Authorization>,
}

impl StaticAcl {
    pub fn new() -> Self {
        StaticAcl::default()
    }

    pub fn allow(mut self, resource: Option<&str>, privilege: Option<&str>) -> Self {
        self.allow.push(Authorization::new(resource, privilege));
        self
    }
}

impl Authorizer for StaticAcl {
    fn is_allowed(&self, resource: Option<&str>, privilege: Option<&str>) -> bool {
        self.allow.iter().any(|rule| {
            let resource_ok = rule.resource.is_none() || rule.resource.as_deref() == resource;
            let privilege_ok = rule.privilege.is_none() || rule.privilege.as_deref() == privilege;
            resource_ok && privilege_ok
        })
    }
}
