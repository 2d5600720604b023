use std::{collections::BTreeMap, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{conventions::Convention, errors::Result, names::CanonicalName};

/// Candidate source names for each canonical name.
///
/// Built-in tables cover conventions that identify their variables by fixed names. Users can
/// also write tables as JSON, keyed by canonical name:
///
/// ```json
/// {"node_x": ["x", "lon"], "node_y": ["y", "lat"], "n_node": ["nodes"]}
/// ```
///
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasTable {
    aliases: BTreeMap<CanonicalName, Vec<String>>,
}

const EXODUS: &[(CanonicalName, &[&str])] = &[
    (CanonicalName::NodeX, &["coordx"]),
    (CanonicalName::NodeY, &["coordy"]),
    (CanonicalName::FaceNodeConnectivity, &["connect1"]),
    (CanonicalName::NNode, &["num_nodes"]),
    (CanonicalName::NFace, &["num_elem"]),
    (CanonicalName::NMaxFaceNodes, &["num_nod_per_el1"]),
];

const MPAS: &[(CanonicalName, &[&str])] = &[
    (CanonicalName::NodeX, &["lonVertex"]),
    (CanonicalName::NodeY, &["latVertex"]),
    (CanonicalName::FaceX, &["lonCell"]),
    (CanonicalName::FaceY, &["latCell"]),
    (CanonicalName::EdgeX, &["lonEdge"]),
    (CanonicalName::EdgeY, &["latEdge"]),
    (CanonicalName::FaceNodeConnectivity, &["verticesOnCell"]),
    (CanonicalName::EdgeNodeConnectivity, &["verticesOnEdge"]),
    (CanonicalName::NNode, &["nVertices"]),
    (CanonicalName::NFace, &["nCells"]),
    (CanonicalName::NEdge, &["nEdges"]),
    (CanonicalName::NMaxFaceNodes, &["maxEdges"]),
];

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The fixed alias list for a convention, if it has one.
    ///
    /// UGRID grids are resolved from their topology attributes instead, and SCRIP grids carry no
    /// connectivity to resolve, so both return `None`.
    ///
    pub fn builtin(convention: Convention) -> Option<Self> {
        let entries = match convention {
            Convention::Exodus => EXODUS,
            Convention::Mpas => MPAS,
            Convention::Ugrid | Convention::Scrip => return None,
        };

        let mut table = Self::new();
        for (name, aliases) in entries {
            for alias in aliases.iter() {
                table.insert(*name, *alias);
            }
        }

        Some(table)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;

        Self::from_json(&text)
    }

    /// Append a candidate for `name`. Candidates are kept in insertion order.
    pub fn insert<S: Into<String>>(&mut self, name: CanonicalName, alias: S) {
        let alias = alias.into();
        let candidates = self.aliases.entry(name).or_default();
        if !candidates.contains(&alias) {
            candidates.push(alias);
        }
    }

    pub fn aliases(&self, name: CanonicalName) -> &[String] {
        self.aliases.get(&name).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::errors::Error;

    #[test]
    fn test_builtin() {
        let exodus = AliasTable::builtin(Convention::Exodus).unwrap();
        assert_eq!(exodus.aliases(CanonicalName::NodeX), ["coordx"]);
        assert_eq!(exodus.aliases(CanonicalName::NFace), ["num_elem"]);
        assert!(exodus.aliases(CanonicalName::FaceX).is_empty());

        let mpas = AliasTable::builtin(Convention::Mpas).unwrap();
        assert_eq!(
            mpas.aliases(CanonicalName::FaceNodeConnectivity),
            ["verticesOnCell"]
        );

        assert!(AliasTable::builtin(Convention::Ugrid).is_none());
        assert!(AliasTable::builtin(Convention::Scrip).is_none());
    }

    #[test]
    fn test_builtin_covers_required() {
        for convention in [Convention::Exodus, Convention::Mpas] {
            let table = AliasTable::builtin(convention).unwrap();
            for name in CanonicalName::REQUIRED {
                assert!(!table.aliases(name).is_empty(), "{convention} lacks {name}");
            }
        }
    }

    #[test]
    fn test_insert() {
        let mut table = AliasTable::new();
        table.insert(CanonicalName::NodeX, "lon");
        table.insert(CanonicalName::NodeX, "x");
        table.insert(CanonicalName::NodeX, "lon");
        assert_eq!(table.aliases(CanonicalName::NodeX), ["lon", "x"]);
    }

    #[test]
    fn test_from_json() {
        let table =
            AliasTable::from_json(r#"{"node_x": ["x", "lon"], "n_node": ["nodes"]}"#).unwrap();
        assert_eq!(table.aliases(CanonicalName::NodeX), ["x", "lon"]);
        assert_eq!(table.aliases(CanonicalName::NNode), ["nodes"]);
        assert!(table.aliases(CanonicalName::NodeY).is_empty());
    }

    #[test]
    fn test_from_json_unknown_name() {
        let err = AliasTable::from_json(r#"{"Mesh2_node_x": ["x"]}"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"face_node_connectivity": ["cells"]}}"#).unwrap();

        let table = AliasTable::from_path(file.path()).unwrap();
        assert_eq!(
            table.aliases(CanonicalName::FaceNodeConnectivity),
            ["cells"]
        );
    }

    #[test]
    fn test_from_path_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = AliasTable::from_path(dir.path().join("aliases.json")).unwrap_err();
        assert!(matches!(err, Error::IO(_)));
    }

    #[test]
    fn test_json_round_trip_of_builtin() {
        let mpas = AliasTable::builtin(Convention::Mpas).unwrap();
        let json = serde_json::to_string(&mpas).unwrap();
        assert_eq!(AliasTable::from_json(&json).unwrap(), mpas);
    }
}
