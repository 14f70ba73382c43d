//! Reconciliation of declared properties against configuration documents.
//!
//! Two passes, concatenated:
//! 1. Every declared property, in declaration order, is looked up in the
//!    documents. The first document that has it wins.
//! 2. Every flattened key of the documents that no property declares is
//!    reported as obsolete.

use crate::error::ResolveError;
use crate::schema::{Annotation, Property, Schema};
use crate::tree::{Document, FlatMap, flatten, resolve};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use tracing::{debug, warn};

/// Whether a property was found in the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provided {
    Provided,
    Missing,
    /// Configured but not declared.
    Obsolete,
}

impl Provided {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provided::Provided => "provided",
            Provided::Missing => "missing",
            Provided::Obsolete => "obsolete",
        }
    }
}

impl fmt::Display for Provided {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Valid,
    Flaw,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Valid => "valid",
            Status::Flaw => "flaw",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of one declared property or one obsolete key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub property: String,
    pub annotations: Vec<Annotation>,
    pub provided: Provided,
    pub status: Status,
    pub default_value: Value,
    pub actual_value: Value,
}

impl Verdict {
    pub fn is_flaw(&self) -> bool {
        self.status == Status::Flaw
    }
}

/// Exit status when validation finds flaws and strict checking is on.
pub const EXIT_FLAWS: u8 = 2;

/// Verdict counts for a reconciliation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub provided: usize,
    pub missing: usize,
    pub obsolete: usize,
    pub flaws: usize,
}

impl Summary {
    pub fn of(verdicts: &[Verdict]) -> Self {
        let mut summary = Self::default();
        for verdict in verdicts {
            match verdict.provided {
                Provided::Provided => summary.provided += 1,
                Provided::Missing => summary.missing += 1,
                Provided::Obsolete => summary.obsolete += 1,
            }
            if verdict.is_flaw() {
                summary.flaws += 1;
            }
        }
        summary
    }

    pub fn is_clean(&self) -> bool {
        self.flaws == 0
    }

    /// Process exit status for this run. Flaws only fail the run when `strict`.
    pub fn exit_status(&self, strict: bool) -> u8 {
        if strict && !self.is_clean() {
            EXIT_FLAWS
        } else {
            0
        }
    }
}

/// Classify every declared property and every undeclared configured key.
///
/// `documents` are an overlay read left to right: a declared property takes
/// its value from the first document that has it. For obsolete keys the
/// reported value comes from the last document that has it.
///
/// Always yields one verdict per declared property followed by one per
/// distinct undeclared flattened key.
pub fn reconcile(schema: &Schema, documents: &[Document]) -> Vec<Verdict> {
    schema.warn_duplicates();

    let mut verdicts: Vec<Verdict> = schema
        .properties
        .iter()
        .map(|property| check_declared(property, documents))
        .collect();
    debug!(
        declared = verdicts.len(),
        documents = documents.len(),
        "Checked declared properties"
    );

    let obsolete = find_obsolete(schema, documents);
    debug!(obsolete = obsolete.len(), "Checked for obsolete keys");
    verdicts.extend(obsolete);
    verdicts
}

fn check_declared(property: &Property, documents: &[Document]) -> Verdict {
    let found = documents
        .iter()
        .enumerate()
        .find_map(|(index, document)| lookup(property, index, document));

    let (provided, status, actual_value) = match found {
        Some(value) => (Provided::Provided, Status::Valid, value.clone()),
        None if property.is_required() => (Provided::Missing, Status::Flaw, Value::Null),
        None => (Provided::Missing, Status::Valid, Value::Null),
    };

    Verdict {
        property: property.name.clone(),
        annotations: property.annotations.clone(),
        provided,
        status,
        default_value: property.default.clone(),
        actual_value,
    }
}

/// Resolve a property in one document; a path that runs into a scalar counts as absent.
fn lookup<'a>(property: &Property, index: usize, document: &'a Document) -> Option<&'a Value> {
    match resolve(document, &property.name) {
        Ok(found) => found,
        Err(ResolveError::NotAMapping {
            segment, kind, ..
        }) => {
            warn!(
                property = %property.name,
                document = index,
                segment = %segment,
                kind,
                "Property path runs through a non-mapping value; treating as not provided"
            );
            None
        }
    }
}

fn find_obsolete(schema: &Schema, documents: &[Document]) -> Vec<Verdict> {
    let mut configured = FlatMap::new();
    for document in documents {
        configured.extend(flatten(document, ""));
    }

    let declared = schema.declared_names();
    configured
        .into_iter()
        .filter(|(path, _)| !declared.contains(path.as_str()))
        .map(|(path, value)| Verdict {
            property: path,
            annotations: Vec::new(),
            provided: Provided::Obsolete,
            status: Status::Flaw,
            default_value: Value::Null,
            actual_value: value.clone(),
        })
        .collect()
}
