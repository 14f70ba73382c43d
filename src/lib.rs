//! Operation Configuration Validator Library
//!
//! Checks configuration documents against a schema of declared properties:
//! which required properties are missing, which are provided, and which
//! configured keys the schema does not declare at all.

pub mod cli;
pub mod error;
pub mod format;
pub mod input;
pub mod reconcile;
pub mod schema;
pub mod tree;

pub use error::{Error, ResolveError, Result};
pub use reconcile::{Provided, Status, Summary, Verdict, reconcile};
pub use schema::{Annotation, Property, Schema};
