// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::sync::Arc;

/// List of all errors.
///
/// Cheap to clone. A failed export job keeps its error
/// and hands out copies.
#[derive(Clone, Debug)]
pub enum Error {
    /// The inline image reference could not be decoded into a drawable image.
    ///
    /// Contains the underlying reason.
    Decode(String),

    /// The drawn surface could not be encoded into the requested format.
    Encode(String),

    /// A drawing surface of the requested size could not be allocated.
    ///
    /// Probably because it's too big or there is not enough memory.
    ContextUnavailable {
        /// Requested surface width.
        width: u32,
        /// Requested surface height.
        height: u32,
    },

    /// The catalog has no item with the specified ID.
    UnknownItem(String),

    /// Two catalog items share the same ID.
    DuplicateItem(String),

    /// An export job has already reached a terminal state.
    JobFinished,

    /// An I/O error.
    Io(Arc<std::io::Error>),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(Arc::new(e))
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::Decode(ref e) => {
                write!(f, "failed to decode the image cause {}", e)
            }
            Error::Encode(ref e) => {
                write!(f, "failed to encode the image cause {}", e)
            }
            Error::ContextUnavailable { width, height } => {
                write!(f, "failed to create a {}x{} drawing surface", width, height)
            }
            Error::UnknownItem(ref id) => {
                write!(f, "the catalog doesn't have the '{}' item", id)
            }
            Error::DuplicateItem(ref id) => {
                write!(f, "the catalog already has the '{}' item", id)
            }
            Error::JobFinished => {
                write!(f, "the export job has already finished")
            }
            Error::Io(ref e) => {
                write!(f, "{}", e)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::Io(ref e) => Some(e.as_ref()),
            _ => None,
        }
    }
}
