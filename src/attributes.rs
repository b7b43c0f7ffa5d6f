//! Ordered HTML attributes and rendering options.
//!
//! [`AttributeMap`] keeps attributes in insertion order, because the order
//! is part of the output contract (`srcset`, `src`, `sizes`, `style`,
//! `width`, `height`, `loading`, then `alt`). Values are stored unescaped and
//! escaped exactly once, when rendered.

use maud::html;
use serde::Serialize;
use serde::ser::Serializer;

/// Insertion-ordered attribute name → value map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap {
    entries: Vec<(String, String)>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name`, keeping its position if it already exists.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    /// Set `name` when there is a value, remove it otherwise.
    pub fn set_opt(&mut self, name: &str, value: Option<impl Into<String>>) {
        match value {
            Some(value) => self.set(name, value),
            None => {
                self.remove(name);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Rename `from` to `to` in place. Does nothing if `from` is absent or
    /// `to` already exists.
    pub fn rename(&mut self, from: &str, to: &str) -> bool {
        if self.contains(to) {
            return false;
        }
        match self.entries.iter_mut().find(|(n, _)| n == from) {
            Some(entry) => {
                entry.0 = to.to_string();
                true
            }
            None => false,
        }
    }

    /// Drop attributes with empty values. `alt` is kept: an empty alt marks
    /// a decorative image.
    pub fn drop_empty(&mut self) {
        self.entries.retain(|(n, v)| n == "alt" || !v.is_empty());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append every attribute of `other`, overwriting existing names in place.
    pub fn extend(&mut self, other: AttributeMap) {
        for (name, value) in other.entries {
            self.set(&name, value);
        }
    }

    /// Render as ` name="value"` pairs with HTML-escaped values.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for (name, value) in self.iter() {
            let escaped = html! { (value) }.into_string();
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escaped);
            out.push('"');
        }
        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AttributeMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = AttributeMap::new();
        for (name, value) in iter {
            map.set(&name.into(), value);
        }
        map
    }
}

impl Serialize for AttributeMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Value of the `loading` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Loading {
    #[default]
    Lazy,
    Eager,
    Auto,
    /// No `loading` attribute.
    Off,
}

impl Loading {
    /// Parse `lazy`, `eager`, `auto`, or `false`/`off`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "lazy" => Some(Self::Lazy),
            "eager" => Some(Self::Eager),
            "auto" => Some(Self::Auto),
            "false" | "off" | "none" => Some(Self::Off),
            _ => None,
        }
    }

    pub fn as_attr(self) -> Option<&'static str> {
        match self {
            Self::Lazy => Some("lazy"),
            Self::Eager => Some("eager"),
            Self::Auto => Some("auto"),
            Self::Off => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnFormat {
    /// Rendered attribute string.
    #[default]
    String,
    /// The attribute map itself.
    Array,
}

/// Options for one rendering call.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderArgs {
    pub attr_width: bool,
    pub attr_height: bool,
    /// Emit `data-srcset` instead of `srcset`.
    pub lazy_srcset: bool,
    /// Emit `data-src` instead of `src`.
    pub lazy_src: bool,
    /// Emit `data-sizes` instead of `sizes`.
    pub lazy_sizes: bool,
    pub loading: Loading,
    /// Pass every URL through WebP conversion.
    pub webp: bool,
    /// Emit the fallback `src` next to a srcset.
    pub src_default: bool,
    pub return_format: ReturnFormat,
    /// Rendering a `<source>` element: `src` becomes `srcset`.
    pub is_source: bool,
}

impl Default for RenderArgs {
    fn default() -> Self {
        Self {
            attr_width: true,
            attr_height: true,
            lazy_srcset: false,
            lazy_src: false,
            lazy_sizes: false,
            loading: Loading::Lazy,
            webp: false,
            src_default: true,
            return_format: ReturnFormat::String,
            is_source: false,
        }
    }
}

impl RenderArgs {
    /// Options for a `<source>` inside `<picture>`: no dimensions, no
    /// loading attribute, no fallback src.
    pub fn for_source(&self, webp: bool) -> Self {
        Self {
            attr_width: false,
            attr_height: false,
            loading: Loading::Off,
            webp,
            src_default: false,
            is_source: true,
            ..self.clone()
        }
    }

    /// Rename the attributes selected for lazy-loading to their `data-`
    /// form.
    pub fn apply_lazy_prefixes(&self, attrs: &mut AttributeMap) {
        for (enabled, name) in [
            (self.lazy_srcset, "srcset"),
            (self.lazy_src, "src"),
            (self.lazy_sizes, "sizes"),
        ] {
            if enabled {
                attrs.rename(name, &format!("data-{name}"));
            }
        }
    }
}

/// Either a rendered attribute string or the map itself, per
/// [`ReturnFormat`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Html(String),
    Map(AttributeMap),
}

impl Rendered {
    pub fn new(attrs: AttributeMap, format: ReturnFormat) -> Self {
        match format {
            ReturnFormat::String => Self::Html(attrs.to_html()),
            ReturnFormat::Array => Self::Map(attrs),
        }
    }
}
