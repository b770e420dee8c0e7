// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Size primitives.

/// A requested image size in pixels.
///
/// Components are not rounded. Use [`PixelSize`] to get the actual surface size.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    /// Creates a new `Size` from values.
    ///
    /// Returns `None` when width or height is not a positive finite number.
    #[inline]
    pub fn from_wh(width: f64, height: f64) -> Option<Self> {
        if is_valid_length(width) && is_valid_length(height) {
            Some(Size { width, height })
        } else {
            None
        }
    }

    /// Creates a new `Size`, clamping each side to at least one pixel.
    ///
    /// `NaN` is treated as zero.
    #[inline]
    pub fn clamped(width: f64, height: f64) -> Self {
        Size {
            width: clamp_length(width),
            height: clamp_length(height),
        }
    }

    /// Returns width.
    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns height.
    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Returns the width to height ratio.
    #[inline]
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// Returns the surface size this size will be rasterized into.
    #[inline]
    pub fn to_pixel_size(&self) -> PixelSize {
        PixelSize::from(*self)
    }
}

/// An integral surface size.
///
/// Each side is `round(max(1, side))`, rounding half away from zero.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct PixelSize {
    width: u32,
    height: u32,
}

impl PixelSize {
    /// Creates a new `PixelSize` from values.
    ///
    /// Returns `None` when width or height is zero.
    #[inline]
    pub fn from_wh(width: u32, height: u32) -> Option<Self> {
        if width > 0 && height > 0 {
            Some(PixelSize { width, height })
        } else {
            None
        }
    }

    /// Returns width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }
}

impl From<Size> for PixelSize {
    fn from(size: Size) -> Self {
        PixelSize {
            width: round_length(size.width),
            height: round_length(size.height),
        }
    }
}

impl std::fmt::Display for PixelSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[inline]
fn is_valid_length(n: f64) -> bool {
    n.is_finite() && n > 0.0
}

#[inline]
pub(crate) fn clamp_length(n: f64) -> f64 {
    // `f64::max` ignores NaN.
    n.max(1.0)
}

#[inline]
fn round_length(n: f64) -> u32 {
    // `f64::round` rounds half away from zero. `as` saturates.
    clamp_length(n).round() as u32
}
