//! Core types for the Indonesia carbon sequestration calculator front end.
//!
//! Everything here is DOM-free: the browser app and the CLI plug their own
//! element access in through the traits in [`form`] and [`preset`].
//!
//! - `slider`: range input to label synchronisation
//! - `preset`: scenario preset buttons
//! - `form`: typed field access shared by validation and reporting
//! - `validate`: submit-time checks on years and emission figures
//! - `catalog`: static presets, references and default parameters

pub mod catalog;
pub mod error;
pub mod form;
pub mod preset;
pub mod prompt;
pub mod slider;
pub mod validate;

pub use error::{FieldError, PresetError};
