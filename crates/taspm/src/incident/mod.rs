//! The incident form: closed option domains and form-to-record assembly.
//!
//! - [`catalog`]: field order and every select's options
//! - [`IncidentForm`]: widget state, validated into a [`Record`](crate::data::Record)

pub mod catalog;
mod form;

pub use catalog::{provinces_for, FIELD_NAMES, OTHER, UNKNOWN};
pub use form::{FormError, IncidentForm};
