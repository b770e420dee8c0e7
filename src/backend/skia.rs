// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#[cfg(feature = "text")]
use std::sync::OnceLock;

#[cfg(feature = "text")]
use usvg::fontdb;
use usvg::roxmltree;

use super::{Blob, RenderBackend};
use crate::{Error, ExportFormat, PixelSize, JPEG_QUALITY};

/// A backend built on `usvg`, `resvg` and `tiny-skia`.
///
/// Holds no mutable state except the lazily loaded fonts database,
/// so it can be shared between threads.
pub struct SkiaBackend {
    opt: usvg::Options,
    #[cfg(feature = "text")]
    skip_system_fonts: bool,
    #[cfg(feature = "text")]
    fontdb: OnceLock<fontdb::Database>,
}

impl Default for SkiaBackend {
    fn default() -> Self {
        SkiaBackend::new(usvg::Options::default())
    }
}

impl std::fmt::Debug for SkiaBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("SkiaBackend")
            .field("dpi", &self.opt.dpi)
            .finish()
    }
}

impl SkiaBackend {
    /// Creates a new backend.
    pub fn new(opt: usvg::Options) -> Self {
        SkiaBackend {
            opt,
            #[cfg(feature = "text")]
            skip_system_fonts: false,
            #[cfg(feature = "text")]
            fontdb: OnceLock::new(),
        }
    }

    /// Disables system fonts loading.
    ///
    /// Text elements will not be rendered.
    #[cfg(feature = "text")]
    pub fn skip_system_fonts(mut self) -> Self {
        self.skip_system_fonts = true;
        self
    }

    /// Returns `usvg` options.
    pub fn options(&self) -> &usvg::Options {
        &self.opt
    }

    // fontdb initialization is pretty expensive, so perform it only when needed.
    #[cfg(feature = "text")]
    fn fontdb(&self, has_text_nodes: bool) -> &fontdb::Database {
        static EMPTY: OnceLock<fontdb::Database> = OnceLock::new();

        if !has_text_nodes {
            return EMPTY.get_or_init(fontdb::Database::new);
        }

        self.fontdb.get_or_init(|| {
            let mut db = fontdb::Database::new();
            if !self.skip_system_fonts {
                db.load_system_fonts();
            }
            log::debug!("Loaded {} font faces.", db.len());
            db
        })
    }
}

impl RenderBackend for SkiaBackend {
    type Image = usvg::Tree;
    type Surface = tiny_skia::Pixmap;

    fn decode_image(&self, uri: &str) -> Result<usvg::Tree, Error> {
        let url = data_url::DataUrl::process(uri)
            .map_err(|_| Error::Decode("not a data URL".to_string()))?;

        let mime = url.mime_type();
        if mime.type_ != "image" || mime.subtype != "svg+xml" {
            return Err(Error::Decode(format!(
                "unsupported MIME type '{}/{}'",
                mime.type_, mime.subtype
            )));
        }

        let (data, _) = url
            .decode_to_vec()
            .map_err(|_| Error::Decode("malformed data URL body".to_string()))?;

        let data = if data.starts_with(&[0x1f, 0x8b]) {
            usvg::decompress_svgz(&data).map_err(|e| Error::Decode(e.to_string()))?
        } else {
            data
        };

        let text = std::str::from_utf8(&data)
            .map_err(|_| Error::Decode("provided data has not an UTF-8 encoding".to_string()))?;

        let xml_opt = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        };
        let xml_tree = roxmltree::Document::parse_with_options(text, xml_opt)
            .map_err(|e| Error::Decode(e.to_string()))?;

        #[cfg(feature = "text")]
        let has_text_nodes = xml_tree
            .descendants()
            .any(|n| n.has_tag_name(("http://www.w3.org/2000/svg", "text")));

        usvg::Tree::from_xmltree(
            &xml_tree,
            &self.opt,
            #[cfg(feature = "text")]
            self.fontdb(has_text_nodes),
        )
        .map_err(|e| Error::Decode(e.to_string()))
    }

    fn create_surface(&self, size: PixelSize) -> Result<tiny_skia::Pixmap, Error> {
        tiny_skia::Pixmap::new(size.width(), size.height())
            .ok_or(Error::ContextUnavailable {
                width: size.width(),
                height: size.height(),
            })
    }

    fn fill(&self, surface: &mut tiny_skia::Pixmap, color: svgtypes::Color) {
        surface.fill(svg_to_skia_color(color));
    }

    fn draw_stretched(&self, surface: &mut tiny_skia::Pixmap, tree: &usvg::Tree) {
        let size = tree.size();
        let ts = tiny_skia::Transform::from_scale(
            surface.width() as f32 / size.width(),
            surface.height() as f32 / size.height(),
        );

        resvg::render(tree, ts, &mut surface.as_mut());
    }

    fn encode_surface(
        &self,
        surface: &tiny_skia::Pixmap,
        format: ExportFormat,
        quality: Option<f32>,
    ) -> Result<Blob, Error> {
        let size = PixelSize::from_wh(surface.width(), surface.height())
            .ok_or_else(|| Error::Encode("the surface is empty".to_string()))?;

        let data = match format {
            ExportFormat::Png => surface
                .encode_png()
                .map_err(|e| Error::Encode(e.to_string()))?,
            ExportFormat::Jpeg => encode_jpeg(surface, quality.unwrap_or(JPEG_QUALITY))?,
        };

        Ok(Blob { data, format, size })
    }
}

fn encode_jpeg(surface: &tiny_skia::Pixmap, quality: f32) -> Result<Vec<u8>, Error> {
    // JPEG has no alpha, so transparent pixels become black.
    let mut rgb = Vec::with_capacity(surface.pixels().len() * 3);
    for pixel in surface.pixels() {
        let c = pixel.demultiply();
        rgb.extend_from_slice(&[c.red(), c.green(), c.blue()]);
    }

    let quality = (quality * 100.0).round().clamp(1.0, 100.0) as u8;

    let mut data = Vec::new();
    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut data, quality);
    encoder
        .encode(
            &rgb,
            surface.width(),
            surface.height(),
            image::ColorType::Rgb8,
        )
        .map_err(|e| Error::Encode(e.to_string()))?;

    Ok(data)
}

fn svg_to_skia_color(color: svgtypes::Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.red, color.green, color.blue, color.alpha)
}
