//! Responsive rewriting of images embedded in post content.
//!
//! Two kinds of markup are recognized:
//!
//! - image blocks: `<figure class="wp-block-image size-large">` wrapping an
//!   `<img class="wp-image-42">`. The size comes from the figure.
//! - classic images: `<img class="alignnone size-large wp-image-42">`.
//!
//! Each matching `<img>` is rebuilt from the attributes the resolver returns
//! for `(attachment id, size key)`. Tags that already carry a `srcset`, have
//! no `src`, no id or no size, or that the resolver cannot handle, are left
//! untouched.

use crate::attributes::AttributeMap;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static FIGURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<figure\b[^>]*?\bclass="([^"]*)"[^>]*>.*?</figure>"#).expect("valid regex")
});

static IMG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<img\b[^>]*>").expect("valid regex"));

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s=/>"']+)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid regex")
});

static ATTACHMENT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)wp-image-(\d+)(?:\s|$)").expect("valid regex"));

static SIZE_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)size-(\S+)").expect("valid regex"));

static NUMERIC_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#(?:[xX]([0-9a-fA-F]{1,6})|([0-9]{1,7}));").expect("valid regex"));

/// Decode the entities an attribute value may carry in source markup:
/// numeric references and the named ones `esc_attr` produces. Other named
/// entities are kept as written.
fn decode_entities(value: &str) -> String {
    if !value.contains('&') {
        return value.to_string();
    }
    let numeric = NUMERIC_ENTITY.replace_all(value, |caps: &Captures| {
        let code = match (caps.get(1), caps.get(2)) {
            (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok(),
            (None, Some(dec)) => dec.as_str().parse().ok(),
            (None, None) => None,
        };
        match code.and_then(char::from_u32) {
            Some(c) => c.to_string(),
            None => caps[0].to_string(),
        }
    });
    numeric
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Quoted attributes of a tag, in source order.
fn parse_attributes(tag: &str) -> Vec<(String, String)> {
    ATTRIBUTE
        .captures_iter(tag)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str().to_ascii_lowercase();
            let value = caps.get(2).or_else(|| caps.get(3))?.as_str();
            Some((name, decode_entities(value)))
        })
        .collect()
}

fn attachment_id(class: &str) -> Option<u64> {
    ATTACHMENT_ID.captures(class)?.get(1)?.as_str().parse().ok()
}

fn size_from_class(class: &str) -> Option<&str> {
    Some(SIZE_CLASS.captures(class)?.get(1)?.as_str())
}

fn has_class(class: &str, wanted: &str) -> bool {
    class.split_whitespace().any(|c| c == wanted)
}

/// Rebuild one `<img>` tag, or return it unchanged.
fn rewrite_img<F>(tag: &str, block: Option<(&str, bool)>, resolver: &F) -> String
where
    F: Fn(u64, &str) -> Option<AttributeMap>,
{
    let original = parse_attributes(tag);
    let get = |name: &str| {
        original
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    };

    if get("srcset").is_some() || get("src").is_none_or(|src| src.trim().is_empty()) {
        return tag.to_string();
    }
    let class = get("class").unwrap_or_default();
    let Some(id) = attachment_id(class) else {
        return tag.to_string();
    };
    let (size, resized) = match block {
        Some((size, resized)) => (size, resized),
        None => match size_from_class(class) {
            Some(size) => (size, false),
            None => return tag.to_string(),
        },
    };
    let Some(generated) = resolver(id, size) else {
        return tag.to_string();
    };

    let mut attrs = AttributeMap::new();
    for (name, value) in &original {
        match name.as_str() {
            "src" | "srcset" | "sizes" | "class" => {}
            "alt" => {
                if !value.trim().is_empty() {
                    attrs.set("alt", value.as_str());
                }
            }
            "width" | "height" => {
                if resized {
                    attrs.set(name, value.as_str());
                }
            }
            _ => {
                if !generated.contains(name) {
                    attrs.set(name, value.as_str());
                }
            }
        }
    }
    for (name, value) in generated.iter() {
        if name == "class" || attrs.contains(name) {
            continue;
        }
        attrs.set(name, value);
    }

    let mut classes: Vec<&str> = class.split_whitespace().collect();
    for extra in generated.get("class").unwrap_or_default().split_whitespace() {
        if !classes.contains(&extra) {
            classes.push(extra);
        }
    }
    if !classes.is_empty() {
        attrs.set("class", classes.join(" "));
    }

    format!("<img{}>", attrs.to_html())
}

/// Rewrite every responsive-capable image in `html`.
///
/// `resolver` returns the attributes for an attachment rendered at a size,
/// including `alt`, or `None` when it cannot.
pub fn rewrite<F>(html: &str, resolver: F) -> String
where
    F: Fn(u64, &str) -> Option<AttributeMap>,
{
    let with_blocks = FIGURE.replace_all(html, |figure: &Captures| {
        let class = &figure[1];
        let whole = &figure[0];
        if !has_class(class, "wp-block-image") {
            return whole.to_string();
        }
        let Some(size) = size_from_class(class) else {
            return whole.to_string();
        };
        let resized = has_class(class, "is-resized");
        IMG.replace_all(whole, |img: &Captures| {
            rewrite_img(&img[0], Some((size, resized)), &resolver)
        })
        .into_owned()
    });

    IMG.replace_all(&with_blocks, |img: &Captures| rewrite_img(&img[0], None, &resolver))
        .into_owned()
}
