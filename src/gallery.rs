// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::backend::RenderBackend;
use crate::download::{trigger_download, DownloadSink};
use crate::{resolve_intrinsic_size, Catalog, Error, ExportControls, ExportJob, VectorItem};

/// A catalog together with per-item export controls and a search query.
#[derive(Debug)]
pub struct Gallery {
    catalog: Catalog,
    controls: HashMap<String, ExportControls>,
    query: String,
}

impl Gallery {
    /// Creates a gallery.
    ///
    /// Intrinsic sizes are resolved once per item here.
    pub fn new(catalog: Catalog) -> Self {
        let controls = catalog
            .items()
            .iter()
            .map(|item| {
                let intrinsic = resolve_intrinsic_size(&item.markup);
                if intrinsic.is_none() {
                    log::debug!("'{}' has an unknown size. Using a 1:1 ratio.", item.id);
                }
                (item.id.clone(), ExportControls::new(intrinsic))
            })
            .collect();

        Gallery {
            catalog,
            controls,
            query: String::new(),
        }
    }

    /// Returns the catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Sets the search query.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    /// Returns the search query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns items that match the current query.
    pub fn visible_items(&self) -> impl Iterator<Item = &VectorItem> {
        self.catalog.filter(&self.query)
    }

    /// Returns item controls.
    pub fn controls(&self, id: &str) -> Result<&ExportControls, Error> {
        self.controls
            .get(id)
            .ok_or_else(|| Error::UnknownItem(id.to_string()))
    }

    /// Returns mutable item controls.
    pub fn controls_mut(&mut self, id: &str) -> Result<&mut ExportControls, Error> {
        self.controls
            .get_mut(id)
            .ok_or_else(|| Error::UnknownItem(id.to_string()))
    }

    /// Creates an export job from the current item controls.
    pub fn export_job(&self, id: &str) -> Result<ExportJob, Error> {
        let item = self
            .catalog
            .get(id)
            .ok_or_else(|| Error::UnknownItem(id.to_string()))?;
        let controls = self.controls(id)?;
        Ok(ExportJob::new(item, controls.size(), controls.settings()))
    }

    /// Renders an item and saves it using a sink.
    ///
    /// Returns where the image was saved.
    pub fn export<B, S>(&self, id: &str, backend: &B, sink: &S) -> Result<PathBuf, Error>
    where
        B: RenderBackend,
        S: DownloadSink + ?Sized,
    {
        let mut job = self.export_job(id)?;
        let filename = job.filename();
        let blob = job.run(backend)?;
        trigger_download(sink, blob, &filename)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::render::tests::RecordingBackend;
    use crate::ExportFormat;

    #[derive(Default)]
    struct MemorySink {
        files: RefCell<Vec<(String, usize)>>,
    }

    impl DownloadSink for MemorySink {
        fn save(&self, filename: &str, data: &[u8]) -> Result<PathBuf, Error> {
            self.files
                .borrow_mut()
                .push((filename.to_string(), data.len()));
            Ok(PathBuf::from(filename))
        }
    }

    #[test]
    fn export_uses_item_controls() {
        let mut gallery = Gallery::new(Catalog::builtin());
        {
            let c = gallery.controls_mut("masjid-siluet").unwrap();
            c.set_width(512.0);
            c.set_format(ExportFormat::Jpeg);
        }

        let sink = MemorySink::default();
        let path = gallery
            .export("masjid-siluet", &RecordingBackend::default(), &sink)
            .unwrap();

        assert_eq!(path, PathBuf::from("masjid-siluet-512x341.jpg"));
        assert_eq!(
            sink.files.borrow()[0],
            ("masjid-siluet-512x341.jpg".to_string(), 3)
        );
    }

    #[test]
    fn zero_width_filename() {
        let mut gallery = Gallery::new(Catalog::builtin());
        gallery.controls_mut("ornamen-geometrik").unwrap().set_width(0.0);

        let job = gallery.export_job("ornamen-geometrik").unwrap();
        assert_eq!(job.filename(), "ornamen-geometrik-1x1.png");
    }

    #[test]
    fn failed_export_keeps_other_items() {
        let mut gallery = Gallery::new(Catalog::builtin());
        gallery.controls_mut("bintang-delapan").unwrap().set_width(64.0);
        let before = gallery.controls("bintang-delapan").unwrap().clone();

        let backend = RecordingBackend {
            fail_decode: true,
            ..RecordingBackend::default()
        };
        let res = gallery.export("masjid-siluet", &backend, &MemorySink::default());
        assert!(matches!(res, Err(Error::Decode(_))));
        assert_eq!(gallery.controls("bintang-delapan").unwrap(), &before);
    }

    #[test]
    fn unknown_item() {
        let gallery = Gallery::new(Catalog::builtin());
        assert!(matches!(gallery.export_job("nope"), Err(Error::UnknownItem(_))));
    }

    #[test]
    fn query() {
        let mut gallery = Gallery::new(Catalog::builtin());
        gallery.set_query("batik");
        let ids: Vec<_> = gallery.visible_items().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["gelombang-batik"]);
    }

    #[test]
    fn unsized_item_is_square() {
        let catalog =
            Catalog::new(vec![VectorItem::new("x", "X", "<svg><rect/></svg>", &[])]).unwrap();
        let gallery = Gallery::new(catalog);
        assert_eq!(gallery.controls("x").unwrap().ratio(), 1.0);
    }
}
