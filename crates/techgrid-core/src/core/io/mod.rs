//! Reading and writing problem descriptions: TOML layout files and CSV
//! module catalogs.

pub mod catalog;
pub mod layout;

use crate::core::models::catalog::CatalogError;
use crate::core::models::grid::GridError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to parse CSV record: {0}")]
    Csv(#[from] csv::Error),

    #[error("Catalog error: {source}")]
    Catalog {
        #[from]
        source: CatalogError,
    },

    #[error("Grid error: {source}")]
    Grid {
        #[from]
        source: GridError,
    },

    #[error("Invalid layout: {0}")]
    Layout(String),
}
