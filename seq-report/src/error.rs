/// Error types for report generation
use thiserror::Error;

/// A live chart instance misbehaved.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{0}")]
pub struct ChartError(pub String);

impl ChartError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Main error type for report generation
#[derive(Error, Debug)]
pub enum ReportError {
    /// A report is already being generated
    #[error("A report is already being generated")]
    AlreadyGenerating,

    /// Restyling, redrawing or rasterising a chart failed
    #[error("Chart {key} failed: {source}")]
    Chart {
        key: &'static str,
        #[source]
        source: ChartError,
    },

    /// Raster data could not be turned into an image
    #[error("Invalid chart image: {0}")]
    Image(String),

    /// The PDF backend failed
    #[error("PDF rendering failed: {0}")]
    Pdf(String),

    /// Handing the finished file to the user failed
    #[error("Failed to save report: {0}")]
    Save(String),
}

/// Type alias for Results using ReportError
pub type Result<T> = std::result::Result<T, ReportError>;
