//! Named physical page sizes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Points per inch.
pub const POINTS_PER_INCH: f64 = 72.0;

/// Points per millimeter (1 inch = 72 points = 25.4 mm).
pub const POINTS_PER_MM: f64 = 72.0 / 25.4;

/// Name of the entry every standard table carries and uses as default.
pub const DEFAULT_PAGE_SIZE: &str = "LETTER";

/// A named page size in points (1/72 inch).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub name: String,
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    /// Create a page size from dimensions in points. The name is stored uppercased.
    pub fn new(name: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            name: name.into().to_uppercase(),
            width,
            height,
        }
    }

    /// Create a page size from dimensions in inches.
    pub fn from_inches(name: impl Into<String>, width: f64, height: f64) -> Self {
        Self::new(name, width * POINTS_PER_INCH, height * POINTS_PER_INCH)
    }

    /// Create a page size from dimensions in millimeters.
    pub fn from_mm(name: impl Into<String>, width: f64, height: f64) -> Self {
        Self::new(name, width * POINTS_PER_MM, height * POINTS_PER_MM)
    }

    /// The same size with width and height swapped.
    pub fn rotated(&self) -> Self {
        Self {
            name: self.name.clone(),
            width: self.height,
            height: self.width,
        }
    }

    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }

    pub fn dimensions(&self) -> (f64, f64) {
        (self.width, self.height)
    }
}

/// Lookup table from page-size name to [`PageSize`].
///
/// Names are unique and stored uppercased; [`lookup`](Self::lookup) uppercases
/// its argument once and does no other normalization. Iteration follows
/// insertion order.
#[derive(Debug, Clone)]
pub struct PageSizeTable {
    sizes: Vec<PageSize>,
    index: HashMap<String, usize>,
}

impl PageSizeTable {
    /// Build a table from custom entries.
    ///
    /// Fails with [`Error::DuplicatePageSize`] if two entries share a name.
    pub fn from_sizes(sizes: impl IntoIterator<Item = PageSize>) -> Result<Self> {
        let mut table = Self {
            sizes: Vec::new(),
            index: HashMap::new(),
        };
        for size in sizes {
            table.insert(size)?;
        }
        Ok(table)
    }

    /// The built-in table: US sizes followed by the ISO A, B and C series.
    pub fn standard() -> Self {
        let mut sizes = vec![
            PageSize::from_inches("LETTER", 8.5, 11.0),
            PageSize::from_inches("LEGAL", 8.5, 14.0),
            PageSize::from_inches("TABLOID", 11.0, 17.0),
            PageSize::from_inches("LEDGER", 17.0, 11.0),
            PageSize::from_inches("EXECUTIVE", 7.25, 10.5),
            PageSize::from_inches("STATEMENT", 5.5, 8.5),
            PageSize::from_inches("FOLIO", 8.5, 13.0),
        ];
        for (series, dims) in [("A", &ISO_A_MM), ("B", &ISO_B_MM), ("C", &ISO_C_MM)] {
            for (n, (w, h)) in dims.iter().enumerate() {
                sizes.push(PageSize::from_mm(format!("{series}{n}"), *w, *h));
            }
        }

        let mut table = Self {
            sizes: Vec::with_capacity(sizes.len()),
            index: HashMap::with_capacity(sizes.len()),
        };
        for size in sizes {
            let key = size.name.clone();
            table.index.insert(key, table.sizes.len());
            table.sizes.push(size);
        }
        table
    }

    fn insert(&mut self, size: PageSize) -> Result<()> {
        let key = size.name.to_uppercase();
        if self.index.contains_key(&key) {
            return Err(Error::DuplicatePageSize(key));
        }
        self.index.insert(key.clone(), self.sizes.len());
        self.sizes.push(PageSize { name: key, ..size });
        Ok(())
    }

    /// Look up a size by name, case-insensitively.
    ///
    /// Returns `None` for unknown names; never falls back to a default.
    pub fn lookup(&self, name: &str) -> Option<&PageSize> {
        self.index
            .get(&name.to_uppercase())
            .map(|&i| &self.sizes[i])
    }

    /// Like [`lookup`](Self::lookup), but unknown names become
    /// [`Error::UnknownPageSize`].
    pub fn lookup_or_err(&self, name: &str) -> Result<PageSize> {
        self.lookup(name)
            .cloned()
            .ok_or_else(|| Error::UnknownPageSize(name.to_string()))
    }

    /// The default entry (US Letter), if the table has one.
    pub fn default_size(&self) -> Option<&PageSize> {
        self.lookup(DEFAULT_PAGE_SIZE)
    }

    /// Iterate entries in table order.
    pub fn iter(&self) -> impl Iterator<Item = &PageSize> {
        self.sizes.iter()
    }

    /// Entry names in table order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sizes.iter().map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

impl Default for PageSizeTable {
    fn default() -> Self {
        Self::standard()
    }
}

// ISO 216 A and B series, ISO 269 C series; millimeters, portrait, index = size number.
const ISO_A_MM: [(f64, f64); 11] = [
    (841.0, 1189.0),
    (594.0, 841.0),
    (420.0, 594.0),
    (297.0, 420.0),
    (210.0, 297.0),
    (148.0, 210.0),
    (105.0, 148.0),
    (74.0, 105.0),
    (52.0, 74.0),
    (37.0, 52.0),
    (26.0, 37.0),
];

const ISO_B_MM: [(f64, f64); 11] = [
    (1000.0, 1414.0),
    (707.0, 1000.0),
    (500.0, 707.0),
    (353.0, 500.0),
    (250.0, 353.0),
    (176.0, 250.0),
    (125.0, 176.0),
    (88.0, 125.0),
    (62.0, 88.0),
    (44.0, 62.0),
    (31.0, 44.0),
];

const ISO_C_MM: [(f64, f64); 11] = [
    (917.0, 1297.0),
    (648.0, 917.0),
    (458.0, 648.0),
    (324.0, 458.0),
    (229.0, 324.0),
    (162.0, 229.0),
    (114.0, 162.0),
    (81.0, 114.0),
    (57.0, 81.0),
    (40.0, 57.0),
    (28.0, 40.0),
];
