// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Rendering backends.

use crate::{Error, ExportFormat, PixelSize};

mod skia;

pub use self::skia::SkiaBackend;

/// An encoded image.
#[derive(Clone, PartialEq, Debug)]
pub struct Blob {
    /// Encoded bytes.
    pub data: Vec<u8>,
    /// The format `data` is encoded in.
    pub format: ExportFormat,
    /// The size of the surface `data` was encoded from.
    pub size: PixelSize,
}

impl Blob {
    /// Returns the blob MIME type.
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// Platform graphics used by the rasterizer.
///
/// Surfaces and images are never shared between two rasterization calls.
pub trait RenderBackend {
    /// A decoded, drawable image.
    type Image;
    /// An off-screen pixel buffer.
    type Surface;

    /// Decodes an inline image reference.
    ///
    /// Must return [`Error::Decode`] on failure.
    fn decode_image(&self, uri: &str) -> Result<Self::Image, Error>;

    /// Allocates a fully transparent surface.
    ///
    /// Must return [`Error::ContextUnavailable`] on failure.
    fn create_surface(&self, size: PixelSize) -> Result<Self::Surface, Error>;

    /// Fills the whole surface with a solid color.
    fn fill(&self, surface: &mut Self::Surface, color: svgtypes::Color);

    /// Draws the image scaled to cover the whole surface, ignoring its aspect ratio.
    fn draw_stretched(&self, surface: &mut Self::Surface, image: &Self::Image);

    /// Encodes the surface.
    ///
    /// `quality` is in a 0..1 range and is set only for lossy formats.
    ///
    /// Must return [`Error::Encode`] on failure.
    fn encode_surface(
        &self,
        surface: &Self::Surface,
        format: ExportFormat,
        quality: Option<f32>,
    ) -> Result<Blob, Error>;
}
