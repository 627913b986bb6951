/// Error types for form access and preset handling
use thiserror::Error;

/// A form field could not be read as the requested type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    /// The field does not exist in the form
    #[error("Form field not found: {0}")]
    Missing(String),

    /// The field exists but its value does not parse
    #[error("Form field {name} has an invalid value: {raw:?}")]
    Malformed { name: String, raw: String },
}

/// A preset button carries attributes that cannot be applied.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PresetError {
    /// A required data attribute is absent
    #[error("Preset button is missing the data-{0} attribute")]
    MissingAttribute(&'static str),

    /// The forest share is not a number in 0..=100
    #[error("Invalid forest percentage on preset: {0:?}")]
    InvalidForestPercent(String),

    /// The below-ground flag is not a boolean literal
    #[error("Invalid below-ground flag on preset: {0:?}")]
    InvalidBelowGround(String),

    /// The clicked index does not refer to a preset button
    #[error("No preset button at index {0}")]
    NoSuchButton(usize),
}

/// Type alias for field reads
pub type FieldResult<T> = std::result::Result<T, FieldError>;
