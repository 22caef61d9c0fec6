//! In-memory QoS service catalog, loaded once and read-only afterwards.

mod attributes;
pub(crate) mod parser;

pub use attributes::{AttributeParseError, Polarity, QosAttribute, QosVector, ATTRIBUTE_COUNT};

use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read service catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog data: {0}")]
    Csv(#[from] csv::Error),
    #[error("catalog line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },
    #[error("service {0} is not in the catalog")]
    UnknownService(String),
}

/// One parsed catalog row.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRecord {
    pub id: String,
    pub attributes: QosVector,
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct ServiceCatalog {
    records: Vec<ServiceRecord>,
    index: HashMap<String, usize>,
}

impl ServiceCatalog {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let catalog = Self::from_reader(file)?;
        info!(path = %path.display(), services = catalog.len(), "service catalog loaded");
        Ok(catalog)
    }

    /// Rows are identified as `S1..Sn` in file order.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let records = parser::parse_rows(reader)?
            .into_iter()
            .enumerate()
            .map(|(position, row)| ServiceRecord {
                id: format!("S{}", position + 1),
                attributes: row.attributes,
                name: row.name,
            })
            .collect();

        Ok(Self::from_records(records))
    }

    pub fn from_records(records: Vec<ServiceRecord>) -> Self {
        let index = records
            .iter()
            .enumerate()
            .map(|(position, record)| (record.id.clone(), position))
            .collect();
        Self { records, index }
    }

    pub fn get(&self, id: &str) -> Result<&ServiceRecord, CatalogError> {
        self.index
            .get(id)
            .map(|&position| &self.records[position])
            .ok_or_else(|| CatalogError::UnknownService(id.to_string()))
    }

    pub fn records(&self) -> &[ServiceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn distinct_names(&self) -> usize {
        self.records
            .iter()
            .map(|record| record.name.as_str())
            .collect::<HashSet<_>>()
            .len()
    }
}
