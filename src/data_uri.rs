// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use usvg::roxmltree;

/// The prefix of every inline SVG reference.
pub const SVG_DATA_URI_PREFIX: &str = "data:image/svg+xml;charset=utf-8,";

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Builds a `data:` URI from an SVG markup.
///
/// Adds the SVG namespace to the root element when it's missing,
/// so the image can be rendered standalone.
///
/// The markup is percent-encoded like `encodeURIComponent` would do,
/// but newlines are dropped and space, `=`, `:`, `/` and `"` are kept as is
/// to make the result shorter. `%` is always encoded,
/// so kept characters cannot form a new escape sequence.
///
/// Never fails. An invalid markup produces a URI that will fail to decode.
pub fn build_inline_image_ref(markup: &str) -> String {
    let markup = with_svg_namespace(markup);

    let mut uri = String::with_capacity(SVG_DATA_URI_PREFIX.len() + markup.len() * 2);
    uri.push_str(SVG_DATA_URI_PREFIX);
    for &b in markup.as_bytes() {
        if b == b'\n' {
            continue;
        }

        if is_unreserved(b) || is_restored(b) {
            uri.push(b as char);
        } else {
            push_escaped(&mut uri, b);
        }
    }

    uri
}

/// Inserts `xmlns` into the root `<svg>` start tag when it has none.
fn with_svg_namespace(markup: &str) -> std::borrow::Cow<str> {
    let insert_at = match find_root_svg_tag(markup) {
        Some((start, false)) => start + "<svg".len(),
        _ => return markup.into(),
    };

    let mut s = String::with_capacity(markup.len() + SVG_NS.len() + 10);
    s.push_str(&markup[..insert_at]);
    s.push_str(" xmlns=\"");
    s.push_str(SVG_NS);
    s.push('"');
    s.push_str(&markup[insert_at..]);
    s.into()
}

/// Returns the root `<svg` start tag offset and whether it declares
/// a default namespace.
///
/// A well-formed document is asked for its root element, so `<svg`
/// inside comments, processing instructions or a DTD is never picked.
/// Anything else falls back to a plain text search.
fn find_root_svg_tag(markup: &str) -> Option<(usize, bool)> {
    let opt = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };

    if let Ok(doc) = roxmltree::Document::parse_with_options(markup, opt) {
        let root = doc.root_element();
        let start = root.range().start;
        if !is_svg_start_tag(markup, start) {
            return None;
        }

        let has_ns = root.namespaces().any(|ns| ns.name().is_none());
        return Some((start, has_ns));
    }

    let start = scan_svg_start_tag(markup)?;
    let tag_end = markup[start..]
        .find('>')
        .map(|idx| start + idx)
        .unwrap_or(markup.len());

    Some((start, markup[start..tag_end].contains("xmlns=")))
}

/// Finds the first `<svg` that is followed by a whitespace, `>` or `/`.
fn scan_svg_start_tag(markup: &str) -> Option<usize> {
    let mut offset = 0;
    while let Some(idx) = markup[offset..].find("<svg") {
        let start = offset + idx;
        if is_svg_start_tag(markup, start) {
            return Some(start);
        }

        offset = start + 1;
    }

    None
}

fn is_svg_start_tag(markup: &str, start: usize) -> bool {
    if !markup[start..].starts_with("<svg") {
        return false;
    }

    match markup.as_bytes().get(start + "<svg".len()) {
        Some(c) => c.is_ascii_whitespace() || *c == b'>' || *c == b'/',
        None => true,
    }
}

// Characters `encodeURIComponent` never escapes.
#[inline]
fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(b, b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')')
}

#[inline]
fn is_restored(b: u8) -> bool {
    matches!(b, b' ' | b'=' | b':' | b'/' | b'"')
}

#[inline]
fn push_escaped(s: &mut String, b: u8) {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    s.push('%');
    s.push(HEX[(b >> 4) as usize] as char);
    s.push(HEX[(b & 0xF) as usize] as char);
}
