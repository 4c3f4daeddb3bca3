//! Error types for MapPress

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for MapPress operations.
///
/// Classification itself is total and never produces an error; these
/// variants cover rule-table loading and the layout-host operations
/// the classification result feeds into. All of them are non-fatal:
/// the caller can retry with a different name/path or skip the step.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("map layout \"{0}\" already exists, choose a different name")]
    LayoutNameExists(String),

    #[error("template file not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    #[error("failed to load layout from template: {reason}")]
    InvalidTemplate { reason: String },

    #[error("raster layer is missing or invalid")]
    InvalidRaster,

    #[error("layout item not found: {0}")]
    ItemNotFound(String),

    #[error("picture file not found: {}", .0.display())]
    PictureNotFound(PathBuf),

    #[error("style file not found: {}", .0.display())]
    StyleNotFound(PathBuf),

    #[error("layer rejected style: {0}")]
    StyleRejected(String),

    #[error("cannot write property {property} on item {item}")]
    Property { item: String, property: String },

    #[error("invalid rule pattern \"{pattern}\": {reason}")]
    Pattern { pattern: String, reason: String },

    #[error("rule table error: {0}")]
    RuleTable(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for MapPress operations
pub type Result<T> = std::result::Result<T, Error>;
