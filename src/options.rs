// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// A white color. Used when no background color is set.
pub const DEFAULT_BACKGROUND: svgtypes::Color = svgtypes::Color {
    red: 255,
    green: 255,
    blue: 255,
    alpha: 255,
};

/// JPEG quality factor.
pub const JPEG_QUALITY: f32 = 0.92;

/// An output image format.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
}

impl ExportFormat {
    /// Returns the format MIME type.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
        }
    }

    /// Returns the file extension, without a dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Png => "png",
        }
    }

    /// Returns the encoder quality factor, if the format is lossy.
    pub fn quality(&self) -> Option<f32> {
        match self {
            ExportFormat::Png => None,
            ExportFormat::Jpeg => Some(JPEG_QUALITY),
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "png" => Ok(ExportFormat::Png),
            "jpeg" | "jpg" => Ok(ExportFormat::Jpeg),
            _ => Err("invalid format, expected 'png' or 'jpeg'"),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ExportFormat::Png => write!(f, "png"),
            ExportFormat::Jpeg => write!(f, "jpeg"),
        }
    }
}

/// Background painting options.
///
/// Paints white by default.
#[derive(Clone, Copy, PartialEq, Default, Debug)]
pub struct Background {
    /// A background color.
    ///
    /// `None` equals to white.
    pub color: Option<svgtypes::Color>,

    /// Leave the surface transparent instead of painting the background.
    ///
    /// Has an effect only for PNG.
    pub transparent: bool,
}

impl Background {
    /// Returns the color the surface should be filled with, if any.
    ///
    /// JPEG is always painted, since it has no alpha channel.
    pub fn fill_color(&self, format: ExportFormat) -> Option<svgtypes::Color> {
        if format == ExportFormat::Jpeg || !self.transparent {
            Some(self.color.unwrap_or(DEFAULT_BACKGROUND))
        } else {
            None
        }
    }
}

/// Effective export settings of a gallery item.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ExportSettings {
    /// An output format.
    pub format: ExportFormat,
    /// Background options.
    pub background: Background,
}
