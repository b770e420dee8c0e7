// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::geom::clamp_length;
use crate::{Background, ExportFormat, ExportSettings, Size};

/// The default export width.
pub const DEFAULT_WIDTH: f64 = 1024.0;

/// Per-item export controls.
///
/// Every setter keeps the controls consistent:
/// sizes never go below one pixel, a locked ratio recomputes the other side
/// and JPEG always disables transparency.
#[derive(Clone, PartialEq, Debug)]
pub struct ExportControls {
    intrinsic: Option<Size>,
    ratio: f64,
    width: f64,
    height: f64,
    lock_ratio: bool,
    format: ExportFormat,
    transparent: bool,
    background: Option<svgtypes::Color>,
}

impl ExportControls {
    /// Creates controls seeded from an intrinsic size.
    ///
    /// Without an intrinsic size a 1:1 ratio is used.
    pub fn new(intrinsic: Option<Size>) -> Self {
        let ratio = ratio_of(intrinsic);
        ExportControls {
            intrinsic,
            ratio,
            width: DEFAULT_WIDTH,
            height: height_for(DEFAULT_WIDTH, ratio),
            lock_ratio: true,
            format: ExportFormat::Png,
            transparent: true,
            background: None,
        }
    }

    /// Returns the intrinsic size the controls were seeded with.
    pub fn intrinsic_size(&self) -> Option<Size> {
        self.intrinsic
    }

    /// Returns the requested size.
    pub fn size(&self) -> Size {
        Size::clamped(self.width, self.height)
    }

    /// Returns the width to height ratio used by the ratio lock.
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Checks that the ratio lock is enabled.
    pub fn is_ratio_locked(&self) -> bool {
        self.lock_ratio
    }

    /// Returns the output format.
    pub fn format(&self) -> ExportFormat {
        self.format
    }

    /// Checks that the output will keep transparency.
    pub fn is_transparent(&self) -> bool {
        self.transparent
    }

    /// Returns the background color, if set.
    pub fn background(&self) -> Option<svgtypes::Color> {
        self.background
    }

    /// Sets the width, clamped to at least one pixel.
    ///
    /// Recomputes the height when the ratio is locked.
    pub fn set_width(&mut self, width: f64) {
        self.width = clamp_length(width);
        if self.lock_ratio {
            self.height = height_for(self.width, self.ratio);
        }
    }

    /// Sets the height, clamped to at least one pixel.
    ///
    /// Recomputes the width when the ratio is locked.
    pub fn set_height(&mut self, height: f64) {
        self.height = clamp_length(height);
        if self.lock_ratio {
            self.width = clamp_length((self.height * self.ratio).round());
        }
    }

    /// Enables or disables the ratio lock.
    ///
    /// Enabling re-reads the intrinsic ratio and recomputes the height
    /// from the current width.
    pub fn set_lock_ratio(&mut self, lock: bool) {
        self.lock_ratio = lock;
        if lock {
            self.ratio = ratio_of(self.intrinsic);
            self.height = height_for(self.width, self.ratio);
        }
    }

    /// Sets the output format.
    ///
    /// Switching to JPEG disables transparency.
    /// Switching back to PNG keeps it disabled.
    pub fn set_format(&mut self, format: ExportFormat) {
        self.format = format;
        if format == ExportFormat::Jpeg {
            self.transparent = false;
        }
    }

    /// Enables or disables transparency.
    ///
    /// Ignored while the format is JPEG.
    pub fn set_transparent(&mut self, transparent: bool) {
        if self.format == ExportFormat::Jpeg {
            if transparent {
                log::debug!("Transparency is not supported by JPEG.");
            }
            return;
        }

        self.transparent = transparent;
    }

    /// Sets the background color. `None` resets it to white.
    pub fn set_background(&mut self, color: Option<svgtypes::Color>) {
        self.background = color;
    }

    /// Checks that the transparency switch can be used.
    pub fn transparency_enabled(&self) -> bool {
        self.format != ExportFormat::Jpeg
    }

    /// Checks that the background color affects the output.
    pub fn background_enabled(&self) -> bool {
        !(self.format == ExportFormat::Png && self.transparent)
    }

    /// Returns the effective export settings.
    pub fn settings(&self) -> ExportSettings {
        ExportSettings {
            format: self.format,
            background: Background {
                color: self.background,
                transparent: self.transparent && self.format != ExportFormat::Jpeg,
            },
        }
    }
}

fn ratio_of(intrinsic: Option<Size>) -> f64 {
    intrinsic.map(|s| s.aspect_ratio()).unwrap_or(1.0)
}

fn height_for(width: f64, ratio: f64) -> f64 {
    clamp_length((width / ratio).round())
}
