//! Core types and errors for depot
//!
//! This crate holds the pieces shared by every other depot crate:
//! the error taxonomy, the resolved document model and the media type
//! mapping used when serving artifacts.

pub mod document;
pub mod errors;
pub mod media_type;

pub use document::{simple_name, DocumentContent, DocumentInfo};
pub use errors::{Error, Result};
pub use media_type::media_type_for;
