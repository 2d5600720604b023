use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    dataset::Dataset,
    errors::{Error, Result},
};

/// The file conventions a grid dataset may follow.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Convention {
    Ugrid,
    Exodus,
    Mpas,
    Scrip,
}

impl Convention {
    pub fn as_str(&self) -> &'static str {
        match self {
            Convention::Ugrid => "UGRID",
            Convention::Exodus => "EXODUS",
            Convention::Mpas => "MPAS",
            Convention::Scrip => "SCRIP",
        }
    }
}

impl fmt::Display for Convention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) const CF_ROLE: &str = "cf_role";
pub(crate) const MESH_TOPOLOGY: &str = "mesh_topology";

/// Guess which convention a dataset was written in from the names and attributes it carries.
///
/// UGRID is checked first since a UGRID file can carry anything else alongside its topology
/// variable.
///
pub fn detect(dataset: &Dataset) -> Result<Convention> {
    let is_ugrid = dataset
        .variables()
        .iter()
        .any(|var| var.text_attr(CF_ROLE) == Some(MESH_TOPOLOGY));

    let convention = if is_ugrid {
        Convention::Ugrid
    } else if dataset.get_variable("verticesOnCell").is_some() {
        Convention::Mpas
    } else if dataset.get_variable("connect1").is_some() {
        Convention::Exodus
    } else if dataset.get_variable("grid_corner_lon").is_some() {
        Convention::Scrip
    } else {
        return Err(Error::UnknownConvention);
    };
    tracing::debug!(%convention, "detected grid convention");

    Ok(convention)
}
