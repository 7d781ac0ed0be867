//! CSV manifest parsing.
//!
//! The header is resolved once up front; data rows are then parsed lazily, one
//! `Result<ProductRow, RowError>` per non-blank record.

use std::str::FromStr;

use csv::{ByteRecord, ByteRecordsIntoIter, ReaderBuilder, Trim};
use rust_decimal::Decimal;
use wellstore_core::models::{ProductRow, REQUIRED_COLUMNS};

use crate::error::IngestError;

/// A data row that could not be turned into a `ProductRow`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub index: usize,
    pub reason: String,
}

/// Column positions resolved from the header row
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    title: usize,
    category: usize,
    vendor: usize,
    price: usize,
    description: Option<usize>,
    keywords: Option<usize>,
    stock: Option<usize>,
    image: Option<usize>,
}

impl ColumnMap {
    fn from_header(header: &ByteRecord) -> Result<Self, IngestError> {
        let names: Vec<String> = header
            .iter()
            .map(|raw| {
                String::from_utf8_lossy(raw)
                    .trim_start_matches('\u{feff}')
                    .trim()
                    .to_lowercase()
            })
            .collect();
        let position = |column: &str| names.iter().position(|name| name == column);

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|column| position(*column).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(IngestError::ManifestSchema(format!(
                "missing required column(s): {}",
                missing.join(", ")
            )));
        }

        let required = |column: &str| {
            position(column).ok_or_else(|| {
                IngestError::ManifestSchema(format!("missing required column(s): {}", column))
            })
        };

        Ok(Self {
            title: required("title")?,
            category: required("category")?,
            vendor: required("vendor")?,
            price: required("price")?,
            description: position("description"),
            keywords: position("keywords"),
            stock: position("stock"),
            image: position("image"),
        })
    }
}

/// Lazy, single-pass iterator over the manifest's data rows
pub struct ManifestRows<'a> {
    records: ByteRecordsIntoIter<&'a [u8]>,
    columns: ColumnMap,
    width: usize,
    next_index: usize,
}

/// Read the header of a CSV manifest and return an iterator over its rows.
///
/// Header names match case-insensitively and unknown columns are ignored. A
/// missing required column (`title`, `category`, `vendor`, `price`) fails the
/// whole manifest before any row is produced.
pub fn parse_manifest(data: &[u8]) -> Result<ManifestRows<'_>, IngestError> {
    let mut records = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(data)
        .into_byte_records();

    let header = loop {
        match records.next() {
            None => {
                return Err(IngestError::ManifestSchema(
                    "manifest has no header row".to_string(),
                ))
            }
            Some(Err(e)) => {
                return Err(IngestError::ManifestSchema(format!(
                    "unreadable header row: {}",
                    e
                )))
            }
            Some(Ok(record)) if is_blank(&record) => continue,
            Some(Ok(record)) => break record,
        }
    };

    let columns = ColumnMap::from_header(&header)?;

    Ok(ManifestRows {
        records,
        columns,
        width: header.len(),
        next_index: 0,
    })
}

impl Iterator for ManifestRows<'_> {
    type Item = Result<ProductRow, RowError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(e) => {
                    self.next_index += 1;
                    return Some(Err(RowError {
                        index: self.next_index,
                        reason: format!("unreadable row: {}", e),
                    }));
                }
            };

            if is_blank(&record) {
                continue;
            }

            self.next_index += 1;
            let index = self.next_index;
            return Some(
                self.parse_record(index, &record)
                    .map_err(|reason| RowError { index, reason }),
            );
        }
    }
}

impl ManifestRows<'_> {
    fn parse_record(&self, index: usize, record: &ByteRecord) -> Result<ProductRow, String> {
        if record.len() != self.width {
            return Err(format!(
                "expected {} columns, found {}",
                self.width,
                record.len()
            ));
        }

        let c = &self.columns;
        let text = |col: usize, name: &str| -> Result<String, String> {
            Ok(field(record, Some(col), name)?.unwrap_or_default().to_string())
        };
        let optional = |col: Option<usize>, name: &str| -> Result<Option<String>, String> {
            Ok(field(record, col, name)?.map(str::to_string))
        };

        let title = text(c.title, "title")?;
        let category = text(c.category, "category")?;
        let vendor = text(c.vendor, "vendor")?;

        let price = match field(record, Some(c.price), "price")? {
            Some(raw) => Decimal::from_str(raw).map_err(|_| "invalid price".to_string())?,
            None => return Err("price is required".to_string()),
        };

        let stock = match field(record, c.stock, "stock")? {
            Some(raw) => raw
                .parse::<i32>()
                .map_err(|_| "invalid stock".to_string())?,
            None => 0,
        };

        Ok(ProductRow {
            index,
            title,
            category,
            vendor,
            price,
            description: optional(c.description, "description")?,
            keywords: optional(c.keywords, "keywords")?,
            stock,
            image: optional(c.image, "image")?,
        })
    }
}

/// Trimmed field text, `None` when the column is absent or the cell is blank.
fn field<'r>(
    record: &'r ByteRecord,
    col: Option<usize>,
    name: &str,
) -> Result<Option<&'r str>, String> {
    let Some(raw) = col.and_then(|i| record.get(i)) else {
        return Ok(None);
    };
    let value = std::str::from_utf8(raw)
        .map_err(|_| format!("column '{}' is not valid UTF-8", name))?
        .trim();
    Ok((!value.is_empty()).then_some(value))
}

fn is_blank(record: &ByteRecord) -> bool {
    record
        .iter()
        .all(|f| f.iter().all(|b| b.is_ascii_whitespace()))
}
