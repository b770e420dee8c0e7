// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use usvg::roxmltree;

use crate::Size;

/// Resolves the natural size of an SVG document.
///
/// The root `viewBox` is preferred. When it's missing or invalid,
/// `width` and `height` attributes are used, with any unit suffix ignored.
///
/// Returns `None` when the markup is not a well-formed XML
/// or when neither source yields a positive size.
pub fn resolve_intrinsic_size(markup: &str) -> Option<Size> {
    let xml_opt = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };

    let doc = match roxmltree::Document::parse_with_options(markup, xml_opt) {
        Ok(doc) => doc,
        Err(e) => {
            log::debug!("Failed to parse an SVG cause {}.", e);
            return None;
        }
    };

    let root = doc.root_element();

    if let Some(size) = root.attribute("viewBox").and_then(parse_view_box_size) {
        return Some(size);
    }

    let width = root.attribute("width").and_then(parse_length);
    let height = root.attribute("height").and_then(parse_length);
    if let (Some(w), Some(h)) = (width, height) {
        if let Some(size) = Size::from_wh(w, h) {
            return Some(size);
        }
    }

    log::debug!("An SVG has neither a valid 'viewBox' nor 'width' and 'height'.");
    None
}

/// Parses `min-x min-y width height` and returns the last two.
fn parse_view_box_size(text: &str) -> Option<Size> {
    let mut numbers = [0.0; 4];
    let mut count = 0;
    for n in svgtypes::NumberListParser::from(text) {
        let n = n.ok()?;
        if count == numbers.len() || n.is_nan() {
            return None;
        }

        numbers[count] = n;
        count += 1;
    }

    if count != numbers.len() {
        return None;
    }

    Size::from_wh(numbers[2], numbers[3])
}

/// Parses a number with an optional unit suffix, like `100px` or `50%`.
fn parse_length(text: &str) -> Option<f64> {
    let number = text
        .trim()
        .trim_end_matches(|c: char| c.is_ascii_alphabetic() || c == '%');

    let n = svgtypes::Number::from_str(number).ok()?.0;
    if n.is_finite() {
        Some(n)
    } else {
        None
    }
}
