// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
`svgshelf` is a small SVG gallery that exports its images as PNG or JPEG
at a custom resolution.

The pipeline:

1. [`resolve_intrinsic_size`] seeds the [`ExportControls`] aspect ratio.
2. [`rasterize`] builds an inline reference via [`build_inline_image_ref`],
   decodes and draws it using a [`RenderBackend`] and encodes the result.
3. [`trigger_download`] saves the [`Blob`] under [`export_filename`].

```no_run
use svgshelf::{Catalog, DirectorySink, Gallery, SkiaBackend};

let mut gallery = Gallery::new(Catalog::builtin());
gallery.controls_mut("masjid-siluet")?.set_width(512.0);
gallery.export("masjid-siluet", &SkiaBackend::default(), &DirectorySink::new("."))?;
# Ok::<(), svgshelf::Error>(())
```
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::uninlined_format_args)]

pub use svgtypes::Color;
pub use tiny_skia;
pub use usvg;

pub mod backend;
mod catalog;
mod controls;
mod data_uri;
mod download;
mod error;
mod gallery;
mod geom;
mod intrinsic;
mod job;
mod options;
mod render;

pub use crate::backend::{Blob, RenderBackend, SkiaBackend};
pub use crate::catalog::{Catalog, VectorItem};
pub use crate::controls::{ExportControls, DEFAULT_WIDTH};
pub use crate::data_uri::{build_inline_image_ref, SVG_DATA_URI_PREFIX};
pub use crate::download::{
    export_filename, slugify, trigger_download, DirectorySink, DownloadSink, StdoutSink,
};
pub use crate::error::Error;
pub use crate::gallery::Gallery;
pub use crate::geom::{PixelSize, Size};
pub use crate::intrinsic::resolve_intrinsic_size;
pub use crate::job::{ExportJob, ExportState};
pub use crate::options::{
    Background, ExportFormat, ExportSettings, DEFAULT_BACKGROUND, JPEG_QUALITY,
};
pub use crate::render::{rasterize, rasterize_observed, RenderPhase};
