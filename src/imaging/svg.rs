//! SVG dimension discovery.
//!
//! SVGs are never resized, but their markup still needs `width`/`height`.
//! The natural size comes from the root element's `width` and `height`
//! attributes (unitless or `px`), falling back to the `viewBox`. Relative
//! units such as `%` or `em` carry no pixel size and are ignored.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::path::Path;

/// Natural size of an SVG document in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvgDimensions {
    pub width: f64,
    pub height: f64,
}

impl SvgDimensions {
    /// Rounded pixel size.
    pub fn pixels(self) -> (u32, u32) {
        (self.width.round() as u32, self.height.round() as u32)
    }
}

fn parse_length(value: &str) -> Option<f64> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    number
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n > 0.0)
}

fn parse_view_box(value: &str) -> Option<(f64, f64)> {
    let numbers: Vec<f64> = value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .map(str::parse)
        .collect::<Result<_, _>>()
        .ok()?;
    match numbers[..] {
        [_, _, w, h] if w > 0.0 && h > 0.0 => Some((w, h)),
        _ => None,
    }
}

fn root_dimensions(root: &BytesStart<'_>) -> Option<SvgDimensions> {
    let mut width = None;
    let mut height = None;
    let mut view_box = None;

    for attr in root.attributes().flatten() {
        let value = String::from_utf8_lossy(&attr.value);
        match attr.key.local_name().as_ref() {
            b"width" => width = parse_length(&value),
            b"height" => height = parse_length(&value),
            b"viewBox" => view_box = parse_view_box(&value),
            _ => {}
        }
    }

    let (width, height) = match (width, height, view_box) {
        (Some(w), Some(h), _) => (w, h),
        (Some(w), None, Some((vw, vh))) => (w, w * vh / vw),
        (None, Some(h), Some((vw, vh))) => (h * vw / vh, h),
        (_, _, Some(view_box)) => view_box,
        _ => return None,
    };
    Some(SvgDimensions { width, height })
}

/// Natural size of an SVG document, or `None` if the root `<svg>` element
/// declares none.
pub fn parse_svg_dimensions(source: &str) -> Option<SvgDimensions> {
    let mut reader = Reader::from_str(source);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() != b"svg" {
                    return None;
                }
                return root_dimensions(&e);
            }
            Ok(Event::Eof) | Err(_) => return None,
            // declaration, doctype, comments and whitespace before the root
            Ok(_) => {}
        }
    }
}

/// Read an SVG file and discover its natural size.
pub fn svg_dimensions_from_file(path: &Path) -> std::io::Result<Option<SvgDimensions>> {
    let source = std::fs::read_to_string(path)?;
    Ok(parse_svg_dimensions(&source))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(source: &str) -> Option<(u32, u32)> {
        parse_svg_dimensions(source).map(SvgDimensions::pixels)
    }

    #[test]
    fn width_and_height_attributes() {
        assert_eq!(
            dims(r#"<svg xmlns="http://www.w3.org/2000/svg" width="400" height="200"></svg>"#),
            Some((400, 200))
        );
    }

    #[test]
    fn px_units_are_accepted() {
        assert_eq!(dims(r#"<svg width="400px" height="200px"/>"#), Some((400, 200)));
    }

    #[test]
    fn view_box_fallback() {
        assert_eq!(dims(r#"<svg viewBox="0 0 1000 1000"/>"#), Some((1000, 1000)));
        assert_eq!(dims(r#"<svg viewBox="0,0,300,150"/>"#), Some((300, 150)));
    }

    #[test]
    fn relative_units_fall_back_to_view_box() {
        assert_eq!(
            dims(r#"<svg width="100%" height="100%" viewBox="0 0 400 200"/>"#),
            Some((400, 200))
        );
    }

    #[test]
    fn single_attribute_scales_view_box() {
        assert_eq!(dims(r#"<svg width="800" viewBox="0 0 400 200"/>"#), Some((800, 400)));
        assert_eq!(dims(r#"<svg height="100" viewBox="0 0 400 200"/>"#), Some((200, 100)));
    }

    #[test]
    fn prolog_is_skipped() {
        let source = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- Generator: somebody -->
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">
<svg version="1.1" width="24" height="24"><path d="M0 0h24v24H0z"/></svg>"#;
        assert_eq!(dims(source), Some((24, 24)));
    }

    #[test]
    fn no_dimensions() {
        assert_eq!(dims(r#"<svg xmlns="http://www.w3.org/2000/svg"></svg>"#), None);
        assert_eq!(dims(r#"<svg viewBox="0 0 0 0"/>"#), None);
        assert_eq!(dims(r#"<svg viewBox="garbage"/>"#), None);
    }

    #[test]
    fn non_svg_root() {
        assert_eq!(dims(r#"<html width="10" height="10"/>"#), None);
        assert_eq!(dims("not xml at all"), None);
    }
}
