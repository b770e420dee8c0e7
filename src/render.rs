// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::backend::{Blob, RenderBackend};
use crate::{build_inline_image_ref, Background, Error, ExportFormat, PixelSize, Size};

/// A rasterization phase.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RenderPhase {
    /// The inline reference is built and is being decoded.
    Loading,
    /// The image is being drawn onto a surface.
    Drawing,
    /// The surface is being encoded.
    Encoding,
}

/// Renders an SVG markup into an encoded image.
///
/// The image is stretched to fill a `round(max(1, size))` surface.
/// Aspect ratio preservation is up to the caller.
///
/// The surface is filled with the background color first,
/// unless the format is PNG and the background is transparent.
pub fn rasterize<B: RenderBackend>(
    backend: &B,
    markup: &str,
    size: Size,
    format: ExportFormat,
    background: Background,
) -> Result<Blob, Error> {
    rasterize_observed(backend, markup, size, format, background, |_| {})
}

/// Like [`rasterize`], but reports each phase before entering it.
pub fn rasterize_observed<B, F>(
    backend: &B,
    markup: &str,
    size: Size,
    format: ExportFormat,
    background: Background,
    mut on_phase: F,
) -> Result<Blob, Error>
where
    B: RenderBackend,
    F: FnMut(RenderPhase),
{
    on_phase(RenderPhase::Loading);
    let uri = build_inline_image_ref(markup);
    let image = backend.decode_image(&uri)?;

    on_phase(RenderPhase::Drawing);
    let pixel_size = PixelSize::from(size);
    let mut surface = backend.create_surface(pixel_size)?;

    if let Some(color) = background.fill_color(format) {
        backend.fill(&mut surface, color);
    }

    backend.draw_stretched(&mut surface, &image);

    on_phase(RenderPhase::Encoding);
    let blob = backend.encode_surface(&surface, format, format.quality())?;
    log::debug!(
        "Rendered a {} {} image, {} bytes.",
        blob.size,
        format,
        blob.data.len()
    );

    Ok(blob)
}
