use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Whether a canonical name refers to an array variable or to a dimension size.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Variable,
    Dimension,
}

/// The standardized vocabulary of topology names, shared by every grid regardless of the
/// convention its file was written in.
///
/// `x`/`y` stand for longitude/latitude on spherical grids and for Cartesian coordinates on
/// planar ones.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalName {
    NodeX,
    NodeY,
    FaceX,
    FaceY,
    EdgeX,
    EdgeY,
    FaceNodeConnectivity,
    EdgeNodeConnectivity,
    NNode,
    NFace,
    NEdge,
    NMaxFaceNodes,
}

impl CanonicalName {
    pub const ALL: [CanonicalName; 12] = [
        CanonicalName::NodeX,
        CanonicalName::NodeY,
        CanonicalName::FaceX,
        CanonicalName::FaceY,
        CanonicalName::EdgeX,
        CanonicalName::EdgeY,
        CanonicalName::FaceNodeConnectivity,
        CanonicalName::EdgeNodeConnectivity,
        CanonicalName::NNode,
        CanonicalName::NFace,
        CanonicalName::NEdge,
        CanonicalName::NMaxFaceNodes,
    ];

    /// Names every grid must resolve, or fail to load.
    pub const REQUIRED: [CanonicalName; 6] = [
        CanonicalName::NodeX,
        CanonicalName::NodeY,
        CanonicalName::FaceNodeConnectivity,
        CanonicalName::NNode,
        CanonicalName::NFace,
        CanonicalName::NMaxFaceNodes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalName::NodeX => "node_x",
            CanonicalName::NodeY => "node_y",
            CanonicalName::FaceX => "face_x",
            CanonicalName::FaceY => "face_y",
            CanonicalName::EdgeX => "edge_x",
            CanonicalName::EdgeY => "edge_y",
            CanonicalName::FaceNodeConnectivity => "face_node_connectivity",
            CanonicalName::EdgeNodeConnectivity => "edge_node_connectivity",
            CanonicalName::NNode => "n_node",
            CanonicalName::NFace => "n_face",
            CanonicalName::NEdge => "n_edge",
            CanonicalName::NMaxFaceNodes => "n_max_face_nodes",
        }
    }

    pub fn kind(&self) -> Kind {
        match self {
            CanonicalName::NNode
            | CanonicalName::NFace
            | CanonicalName::NEdge
            | CanonicalName::NMaxFaceNodes => Kind::Dimension,
            _ => Kind::Variable,
        }
    }

    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }
}

impl fmt::Display for CanonicalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CanonicalName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .find(|name| name.as_str() == s)
            .copied()
            .ok_or_else(|| Error::UnknownName(s.to_string()))
    }
}
