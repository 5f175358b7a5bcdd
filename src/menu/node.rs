//! The data carried by one menu item.

use std::{collections::BTreeMap, fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use super::{MenuId, MenuItem, MenuTree};
use crate::{
    auth::Authorization,
    error::MenuError,
    link::{Link, LinkArgs, ParamValue},
    translate::Translator,
};

/// Preprocessor key applied to every cascaded parameter, after the key-specific one.
pub const LINK_PARAM_PROCESSOR_ALL: &str = "*";

/// Link argument name used when none is given for a required parameter.
pub const DEFAULT_LINK_PARAM_NAME: &str = "id";

pub type LinkParamPreprocessor =
    Arc<dyn Fn(ParamValue, &str, &MenuItem<'_>) -> ParamValue + Send + Sync>;

pub type BeforeRenderHook =
    Arc<dyn Fn(&mut MenuTree, MenuId) -> Result<(), MenuError> + Send + Sync>;

/// A value that is either fixed or computed from the item it belongs to.
#[derive(Clone)]
pub enum Dynamic<T> {
    Static(T),
    Computed(Arc<dyn Fn(&MenuItem<'_>) -> T + Send + Sync>),
}

impl<T: Clone> Dynamic<T> {
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&MenuItem<'_>) -> T + Send + Sync + 'static,
    {
        Dynamic::Computed(Arc::new(f))
    }

    pub fn evaluate(&self, item: &MenuItem<'_>) -> T {
        match self {
            Dynamic::Static(value) => value.clone(),
            Dynamic::Computed(f) => f(item),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Dynamic<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dynamic::Static(value) => f.debug_tuple("Static").field(value).finish(),
            Dynamic::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// A parameter the link cannot be generated without.
///
/// `key` is what [`MenuTree::set_link_param`] cascades; `name` is the link argument the value
/// is passed as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkParam {
    pub key: String,
    pub name: String,
}

#[derive(Clone)]
pub struct MenuNode {
    pub(super) name: String,
    title: String,
    translator: Option<Arc<dyn Translator>>,
    disable_translation: bool,
    link: Option<Link>,
    link_args: LinkArgs,
    link_param: Option<LinkParam>,
    link_param_value: Option<ParamValue>,
    preprocessors: BTreeMap<String, LinkParamPreprocessor>,
    pub(super) active: bool,
    pub(super) in_path: bool,
    currentable: bool,
    show: Dynamic<bool>,
    authorization: Option<Authorization>,
    class: Dynamic<Option<String>>,
    icon: Dynamic<Option<String>>,
    pub(super) before_render_called: bool,
    before_render: Option<BeforeRenderHook>,
}

impl MenuNode {
    /// A detached item. Its name is assigned when it is attached to a tree.
    pub fn new(title: &str, link: Option<Link>, link_args: LinkArgs) -> Self {
        MenuNode {
            name: String::new(),
            title: title.to_string(),
            translator: None,
            disable_translation: false,
            link,
            link_args,
            link_param: None,
            link_param_value: None,
            preprocessors: BTreeMap::new(),
            active: false,
            in_path: false,
            currentable: true,
            show: Dynamic::Static(true),
            authorization: None,
            class: Dynamic::Static(None),
            icon: Dynamic::Static(None),
            before_render_called: false,
            before_render: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The configured title, untranslated.
    pub fn raw_title(&self) -> &str {
        &self.title
    }

    /// The title as displayed: translated unless there is no translator or translation is
    /// disabled for this item.
    pub fn title(&self) -> String {
        match &self.translator {
            Some(translator) if !self.disable_translation => translator.translate(&self.title),
            _ => self.title.clone(),
        }
    }

    pub fn set_title(&mut self, title: &str) -> &mut Self {
        self.title = title.to_string();
        self
    }

    pub fn set_translator(&mut self, translator: Option<Arc<dyn Translator>>) -> &mut Self {
        self.translator = translator;
        self
    }

    pub fn translator(&self) -> Option<&Arc<dyn Translator>> {
        self.translator.as_ref()
    }

    pub fn disable_translation(&mut self, disable: bool) -> &mut Self {
        self.disable_translation = disable;
        self
    }

    pub fn link(&self) -> Option<&Link> {
        self.link.as_ref()
    }

    pub fn set_link(&mut self, link: Option<Link>) -> &mut Self {
        self.link = link;
        self
    }

    pub fn has_direct_url(&self) -> bool {
        self.link.as_ref().is_some_and(Link::is_direct_url)
    }

    pub fn link_args(&self) -> &LinkArgs {
        &self.link_args
    }

    pub fn set_link_args(&mut self, link_args: LinkArgs) -> &mut Self {
        self.link_args = link_args;
        self
    }

    /// Block URL generation until a value for `key` arrives through the parameter cascade.
    /// The value is passed to the resolver as the `param_name` argument.
    pub fn set_link_param_needed(
        &mut self,
        key: &str,
        default: Option<ParamValue>,
        param_name: &str,
    ) -> &mut Self {
        self.link_param = Some(LinkParam {
            key: key.to_string(),
            name: param_name.to_string(),
        });
        self.link_param_value = default;
        self
    }

    pub fn reset_link_param_needed(&mut self) -> &mut Self {
        self.link_param = None;
        self.link_param_value = None;
        self
    }

    pub fn link_param(&self) -> Option<&LinkParam> {
        self.link_param.as_ref()
    }

    /// Current value of the required parameter. `Null` is reported as missing.
    pub fn link_param_value(&self) -> Option<&ParamValue> {
        self.link_param_value.as_ref().filter(|value| !value.is_null())
    }

    pub(super) fn assign_link_param(&mut self, key: &str, value: &ParamValue) {
        if self.link_param.as_ref().is_some_and(|param| param.key == key) {
            self.link_param_value = Some(value.clone());
        }
    }

    pub fn set_link_param_preprocessor<F>(&mut self, key: &str, preprocessor: F) -> &mut Self
    where
        F: Fn(ParamValue, &str, &MenuItem<'_>) -> ParamValue + Send + Sync + 'static,
    {
        self.preprocessors
            .insert(key.to_string(), Arc::new(preprocessor));
        self
    }

    pub fn remove_link_param_preprocessor(&mut self, key: &str) -> &mut Self {
        self.preprocessors.remove(key);
        self
    }

    pub(super) fn preprocessor(&self, key: &str) -> Option<&LinkParamPreprocessor> {
        self.preprocessors.get(key)
    }

    /// Does this item's link point at the request being served?
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Is this item the user's actual position?
    pub fn is_current(&self) -> bool {
        self.currentable && self.active
    }

    pub fn is_currentable(&self) -> bool {
        self.currentable
    }

    /// Whether this item can ever be the user's actual position.
    pub fn set_currentable(&mut self, currentable: bool) -> &mut Self {
        self.currentable = currentable;
        self
    }

    pub fn is_in_path(&self) -> bool {
        self.in_path
    }

    /// Like [`MenuNode::is_in_path`], but non-currentable items report `false` when
    /// `currentable_only` is set.
    pub fn is_in_path_for(&self, currentable_only: bool) -> bool {
        if currentable_only && !self.currentable {
            return false;
        }
        self.in_path
    }

    pub fn show(&self) -> &Dynamic<bool> {
        &self.show
    }

    pub fn set_show(&mut self, show: bool) -> &mut Self {
        self.show = Dynamic::Static(show);
        self
    }

    pub fn set_show_fn<F>(&mut self, show: F) -> &mut Self
    where
        F: Fn(&MenuItem<'_>) -> bool + Send + Sync + 'static,
    {
        self.show = Dynamic::computed(show);
        self
    }

    pub fn authorization(&self) -> Option<&Authorization> {
        self.authorization.as_ref()
    }

    pub fn set_authorization(
        &mut self,
        resource: Option<&str>,
        privilege: Option<&str>,
    ) -> &mut Self {
        self.authorization = Some(Authorization::new(resource, privilege));
        self
    }

    pub fn reset_authorization(&mut self) -> &mut Self {
        self.authorization = None;
        self
    }

    pub fn class(&self) -> &Dynamic<Option<String>> {
        &self.class
    }

    pub fn set_class(&mut self, class: &str) -> &mut Self {
        self.class = Dynamic::Static(Some(class.to_string()));
        self
    }

    pub fn set_class_fn<F>(&mut self, class: F) -> &mut Self
    where
        F: Fn(&MenuItem<'_>) -> Option<String> + Send + Sync + 'static,
    {
        self.class = Dynamic::computed(class);
        self
    }

    pub fn icon(&self) -> &Dynamic<Option<String>> {
        &self.icon
    }

    pub fn set_icon(&mut self, icon: &str) -> &mut Self {
        self.icon = Dynamic::Static(Some(icon.to_string()));
        self
    }

    pub fn set_icon_fn<F>(&mut self, icon: F) -> &mut Self
    where
        F: Fn(&MenuItem<'_>) -> Option<String> + Send + Sync + 'static,
    {
        self.icon = Dynamic::computed(icon);
        self
    }

    /// Hook run once, the first time any render entry point reaches this item.
    pub fn set_before_render<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&mut MenuTree, MenuId) -> Result<(), MenuError> + Send + Sync + 'static,
    {
        self.before_render = Some(Arc::new(hook));
        self
    }

    pub(super) fn before_render_hook(&self) -> Option<BeforeRenderHook> {
        self.before_render.clone()
    }

    pub fn before_render_called(&self) -> bool {
        self.before_render_called
    }
}

impl fmt::Debug for MenuNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuNode")
            .field("name", &self.name)
            .field("title", &self.title)
            .field("link", &self.link)
            .field("link_args", &self.link_args)
            .field("link_param", &self.link_param)
            .field("link_param_value", &self.link_param_value)
            .field("active", &self.active)
            .field("in_path", &self.in_path)
            .field("currentable", &self.currentable)
            .field("show", &self.show)
            .field("authorization", &self.authorization)
            .finish_non_exhaustive()
    }
}
