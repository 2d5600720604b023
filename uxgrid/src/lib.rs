//! Canonical topology names for unstructured grid datasets.
//!
//! Grid files written in different conventions (UGRID, EXODUS, MPAS, ...) name the same
//! topology variables differently. A `Grid` resolves a fixed vocabulary of canonical names
//! (`node_x`, `face_node_connectivity`, `n_face`, ...) to whatever a particular dataset calls
//! them, once, when the grid is opened.
//!
mod aliases;
mod conventions;
mod dataset;
mod errors;
mod grid;
mod names;
mod table;

#[cfg(test)]
mod testing;

pub use aliases::AliasTable;
pub use conventions::{detect, Convention};
pub use dataset::{
    AttrValue, Attributes, Dataset, DatasetNames, Dimension, Entry, Variable, VariableData,
};
pub use errors::{Error, Result};
pub use grid::Grid;
pub use names::{CanonicalName, Kind};
pub use table::{resolve, NameTable};
