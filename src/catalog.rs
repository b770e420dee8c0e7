// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::HashSet;
use std::path::Path;

use crate::Error;

/// A gallery item.
#[derive(Clone, PartialEq, Debug)]
pub struct VectorItem {
    /// Unique item ID.
    pub id: String,
    /// A display name.
    pub name: String,
    /// SVG markup.
    pub markup: String,
    /// Search tags.
    pub tags: Vec<String>,
}

impl VectorItem {
    /// Creates a new item.
    pub fn new(id: &str, name: &str, markup: &str, tags: &[&str]) -> Self {
        VectorItem {
            id: id.to_string(),
            name: name.to_string(),
            markup: markup.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Checks that the item name or one of its tags contains `query`, ignoring case.
    ///
    /// An empty query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        self.name.to_lowercase().contains(&query)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&query))
    }
}

/// A read-only collection of gallery items.
#[derive(Clone, Default, Debug)]
pub struct Catalog {
    items: Vec<VectorItem>,
}

impl Catalog {
    /// Creates a catalog.
    ///
    /// Item IDs must be unique.
    pub fn new(items: Vec<VectorItem>) -> Result<Self, Error> {
        let mut ids = HashSet::new();
        for item in &items {
            if !ids.insert(item.id.as_str()) {
                return Err(Error::DuplicateItem(item.id.clone()));
            }
        }

        Ok(Catalog { items })
    }

    /// Returns the built-in sample catalog.
    pub fn builtin() -> Self {
        Catalog {
            items: vec![
                VectorItem::new(
                    "ornamen-geometrik",
                    "Ornamen Geometrik",
                    ORNAMEN_GEOMETRIK,
                    &["pattern", "geometric", "star"],
                ),
                VectorItem::new(
                    "masjid-siluet",
                    "Masjid Siluet",
                    MASJID_SILUET,
                    &["building", "silhouette", "night"],
                ),
                VectorItem::new(
                    "bintang-delapan",
                    "Bintang Delapan",
                    BINTANG_DELAPAN,
                    &["star", "icon"],
                ),
                VectorItem::new(
                    "gelombang-batik",
                    "Gelombang Batik",
                    GELOMBANG_BATIK,
                    &["pattern", "wave", "batik"],
                ),
            ],
        }
    }

    /// Loads every `*.svg` file in a directory.
    ///
    /// Files are sorted by name. The file stem is used as an ID
    /// and, with `-` and `_` replaced by spaces, as a name.
    /// Files that cannot be read as UTF-8 are skipped.
    pub fn from_dir(dir: &Path) -> Result<Self, Error> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let is_svg = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case("svg"))
                .unwrap_or(false);

            if is_svg && path.is_file() {
                paths.push(path);
            }
        }

        paths.sort();

        let mut items = Vec::with_capacity(paths.len());
        for path in paths {
            let id = match path.file_stem().and_then(|s| s.to_str()) {
                Some(id) => id.to_string(),
                None => {
                    log::warn!("'{}' has a non UTF-8 name. Skipped.", path.display());
                    continue;
                }
            };

            let markup = match std::fs::read_to_string(&path) {
                Ok(markup) => markup,
                Err(e) => {
                    log::warn!("Failed to read '{}' cause {}. Skipped.", path.display(), e);
                    continue;
                }
            };

            let name = id.replace(['-', '_'], " ");
            items.push(VectorItem {
                id,
                name,
                markup,
                tags: Vec::new(),
            });
        }

        Catalog::new(items)
    }

    /// Returns all items.
    pub fn items(&self) -> &[VectorItem] {
        &self.items
    }

    /// Returns an item by ID.
    pub fn get(&self, id: &str) -> Option<&VectorItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Returns items that match a search query.
    ///
    /// See [`VectorItem::matches`].
    pub fn filter<'a>(&'a self, query: &'a str) -> impl Iterator<Item = &'a VectorItem> + 'a {
        self.items.iter().filter(move |item| item.matches(query))
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks that the catalog has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

const ORNAMEN_GEOMETRIK: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 160 160">
  <rect width="160" height="160" rx="16" fill="#0f766e"/>
  <g fill="none" stroke="#fde68a" stroke-width="4">
    <rect x="40" y="40" width="80" height="80"/>
    <rect x="40" y="40" width="80" height="80" transform="rotate(45 80 80)"/>
    <circle cx="80" cy="80" r="24"/>
  </g>
</svg>"##;

const MASJID_SILUET: &str = r##"<svg viewBox="0 0 300 200">
  <rect width="300" height="200" fill="#1e1b4b"/>
  <circle cx="240" cy="50" r="18" fill="#fef3c7"/>
  <path d="M90 200 V120 Q150 40 210 120 V200 Z" fill="#020617"/>
  <rect x="40" y="80" width="20" height="120" fill="#020617"/>
  <rect x="240" y="80" width="20" height="120" fill="#020617"/>
</svg>"##;

const BINTANG_DELAPAN: &str = r##"<svg width="120px" height="120px">
  <polygon points="60,4 74,46 116,60 74,74 60,116 46,74 4,60 46,46" fill="#b45309"/>
</svg>"##;

const GELOMBANG_BATIK: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 240 120">
  <rect width="240" height="120" fill="#78350f"/>
  <path d="M0 60 C40 20 80 100 120 60 S200 20 240 60"
        fill="none" stroke="#fcd34d" stroke-width="6"/>
  <path d="M0 90 C40 50 80 130 120 90 S200 50 240 90"
        fill="none" stroke="#fbbf24" stroke-width="3"/>
</svg>"##;
