// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::backend::{Blob, RenderBackend};
use crate::render::{rasterize_observed, RenderPhase};
use crate::{export_filename, Error, ExportSettings, PixelSize, Size, VectorItem};

/// An export job state.
#[derive(Debug)]
pub enum ExportState {
    /// Not started yet.
    Idle,
    /// Decoding the image.
    Loading,
    /// Drawing the image.
    Drawing,
    /// Encoding the surface.
    Encoding,
    /// Finished successfully.
    Ready(Blob),
    /// Finished with an error.
    Failed(Error),
}

impl ExportState {
    /// Checks that the job has finished.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ExportState::Ready(_) | ExportState::Failed(_))
    }

    /// Returns a short state name.
    pub fn name(&self) -> &'static str {
        match self {
            ExportState::Idle => "idle",
            ExportState::Loading => "loading",
            ExportState::Drawing => "drawing",
            ExportState::Encoding => "encoding",
            ExportState::Ready(_) => "ready",
            ExportState::Failed(_) => "failed",
        }
    }
}

impl From<RenderPhase> for ExportState {
    fn from(phase: RenderPhase) -> Self {
        match phase {
            RenderPhase::Loading => ExportState::Loading,
            RenderPhase::Drawing => ExportState::Drawing,
            RenderPhase::Encoding => ExportState::Encoding,
        }
    }
}

/// A single item export.
///
/// Runs once. Owns everything it needs, so jobs never affect each other.
#[derive(Debug)]
pub struct ExportJob {
    item_id: String,
    item_name: String,
    markup: String,
    size: Size,
    settings: ExportSettings,
    state: ExportState,
}

impl ExportJob {
    /// Creates a new idle job.
    pub fn new(item: &VectorItem, size: Size, settings: ExportSettings) -> Self {
        ExportJob {
            item_id: item.id.clone(),
            item_name: item.name.clone(),
            markup: item.markup.clone(),
            size,
            settings,
            state: ExportState::Idle,
        }
    }

    /// Returns the exported item ID.
    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    /// Returns the current state.
    pub fn state(&self) -> &ExportState {
        &self.state
    }

    /// Returns the size of the resulting image.
    pub fn pixel_size(&self) -> PixelSize {
        PixelSize::from(self.size)
    }

    /// Returns the file name the result should be saved as.
    pub fn filename(&self) -> String {
        export_filename(&self.item_name, self.pixel_size(), self.settings.format)
    }

    /// Runs the job.
    ///
    /// Returns the blob on success. Fails with [`Error::JobFinished`]
    /// when the job has already been run.
    pub fn run<B: RenderBackend>(&mut self, backend: &B) -> Result<&Blob, Error> {
        self.run_observed(backend, |_| {})
    }

    /// Like [`run`](Self::run), but reports every state change.
    pub fn run_observed<B, F>(&mut self, backend: &B, mut on_state: F) -> Result<&Blob, Error>
    where
        B: RenderBackend,
        F: FnMut(&ExportState),
    {
        if !matches!(self.state, ExportState::Idle) {
            return Err(Error::JobFinished);
        }

        let id = &self.item_id;
        let state = &mut self.state;
        let res = rasterize_observed(
            backend,
            &self.markup,
            self.size,
            self.settings.format,
            self.settings.background,
            |phase| {
                *state = ExportState::from(phase);
                log::debug!("'{}': {}.", id, state.name());
                on_state(state);
            },
        );

        self.state = match res {
            Ok(blob) => ExportState::Ready(blob),
            Err(e) => {
                log::debug!("'{}' export failed cause {}.", self.item_id, e);
                ExportState::Failed(e)
            }
        };
        on_state(&self.state);

        match self.state {
            ExportState::Ready(ref blob) => Ok(blob),
            ExportState::Failed(ref e) => Err(e.clone()),
            _ => Err(Error::JobFinished),
        }
    }

    /// Consumes the job and returns its result.
    ///
    /// An unfinished job returns `None`.
    pub fn into_result(self) -> Option<Result<Blob, Error>> {
        match self.state {
            ExportState::Ready(blob) => Some(Ok(blob)),
            ExportState::Failed(e) => Some(Err(e)),
            _ => None,
        }
    }
}
