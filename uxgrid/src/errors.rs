use std::{io, result};

use crate::{conventions::Convention, names::CanonicalName};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] io::Error),

    #[error("unable to parse alias table: {0}")]
    Json(#[from] serde_json::Error),

    /// Nothing in the dataset goes by this name.
    #[error("no variable or dimension named {0:?}")]
    BadName(String),

    /// The string is not part of the canonical vocabulary.
    #[error("{0:?} is not a canonical name")]
    UnknownName(String),

    /// A canonical name this dataset does not provide. Only optional names end up here, since
    /// missing required names fail when the grid is opened.
    #[error("{0} is not present in this grid")]
    NotPresent(CanonicalName),

    #[error("unable to resolve required name {name} for {convention} grid")]
    Unresolved {
        name: CanonicalName,
        convention: Convention,
    },

    #[error("{name} matches more than one source name: {candidates:?}")]
    Ambiguous {
        name: String,
        candidates: Vec<String>,
    },

    #[error("{variable:?} is missing mandatory attribute {attribute:?}")]
    MissingAttribute { variable: String, attribute: String },

    #[error("attribute {attribute:?} refers to {name:?}, which is not in the dataset")]
    DanglingReference { attribute: String, name: String },

    #[error("no 2D mesh topology variable found")]
    MissingTopology,

    #[error("unable to detect grid convention")]
    UnknownConvention,

    #[error("{0} grids are not supported")]
    UnsupportedConvention(Convention),

    #[error("{name:?} is not a {expected}")]
    KindMismatch { name: String, expected: &'static str },

    #[error("duplicate name {0:?}")]
    Duplicate(String),

    #[error("bad shape for {name:?}: {reason}")]
    Shape { name: String, reason: String },
}

pub type Result<T> = result::Result<T, Error>;
