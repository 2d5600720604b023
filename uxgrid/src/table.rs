use std::collections::{btree_map, BTreeMap};

use crate::{
    aliases::AliasTable,
    conventions::{Convention, CF_ROLE, MESH_TOPOLOGY},
    dataset::{Dataset, DatasetNames, Variable},
    errors::{Error, Result},
    names::CanonicalName,
};

/// The mapping from canonical names to the names a particular dataset actually uses.
///
/// Built once when a grid is opened and never changed afterward. Every required canonical name
/// is present; optional names are present only if the dataset provides them.
///
#[derive(Clone, Debug, PartialEq)]
pub struct NameTable {
    convention: Convention,
    names: BTreeMap<CanonicalName, String>,
}

/// Resolve each canonical name against the names present in a dataset, using a list of
/// candidate aliases.
///
/// # Arguments
///
/// * `dataset_names` - The variable and dimension names present in the dataset.
/// * `aliases` - Candidate source names for each canonical name.
///
/// A candidate only counts if the dataset has it as the same kind as the canonical name, so a
/// coordinate variable never stands in for its dimension. Fails with `Error::Unresolved` if a
/// required name has no candidate present, and with `Error::Ambiguous` if any name has more
/// than one.
///
pub fn resolve(
    dataset_names: &DatasetNames,
    aliases: &AliasTable,
    convention: Convention,
) -> Result<BTreeMap<CanonicalName, String>> {
    let mut names = BTreeMap::new();
    for name in CanonicalName::ALL {
        let found: Vec<&String> = aliases
            .aliases(name)
            .iter()
            .filter(|alias| dataset_names.contains(alias.as_str(), name.kind()))
            .collect();

        match found.as_slice() {
            [source] => {
                names.insert(name, source.to_string());
            }
            [] if name.is_required() => {
                return Err(Error::Unresolved { name, convention });
            }
            [] => {
                tracing::debug!(%name, "optional name not present");
            }
            candidates => {
                return Err(Error::Ambiguous {
                    name: name.to_string(),
                    candidates: candidates.iter().map(|c| c.to_string()).collect(),
                });
            }
        }
    }

    Ok(names)
}

impl NameTable {
    /// Build the table for a dataset in the given convention.
    pub fn resolve(dataset: &Dataset, convention: Convention) -> Result<Self> {
        match convention {
            Convention::Ugrid => Self::from_ugrid(dataset),
            Convention::Exodus | Convention::Mpas => {
                let aliases = AliasTable::builtin(convention)
                    .ok_or(Error::UnsupportedConvention(convention))?;
                Self::from_aliases(convention, dataset, &aliases)
            }
            Convention::Scrip => Err(Error::UnsupportedConvention(convention)),
        }
    }

    pub fn from_aliases(
        convention: Convention,
        dataset: &Dataset,
        aliases: &AliasTable,
    ) -> Result<Self> {
        let names = resolve(&dataset.names(), aliases, convention)?;
        tracing::debug!(%convention, resolved = names.len(), "resolved names from aliases");

        Ok(Self { convention, names })
    }

    /// Build the table from the attributes of a UGRID mesh topology variable.
    ///
    pub fn from_ugrid(dataset: &Dataset) -> Result<Self> {
        let topology = find_topology(dataset)?;
        let mut names = BTreeMap::new();

        // Nodes
        let coords = required_attr(topology, "node_coordinates")?;
        let (node_x, node_y) = coordinate_pair(dataset, "node_coordinates", coords)?;
        names.insert(CanonicalName::NodeX, node_x.name.clone());
        names.insert(CanonicalName::NodeY, node_y.name.clone());
        let n_node = node_x.dims.first().ok_or_else(|| Error::Shape {
            name: node_x.name.clone(),
            reason: String::from("node coordinates have no dimension"),
        })?;
        if node_y.dims != node_x.dims {
            return Err(Error::Shape {
                name: node_y.name.clone(),
                reason: format!(
                    "dimensions {:?} differ from {:?} of {}",
                    node_y.dims, node_x.dims, node_x.name
                ),
            });
        }
        names.insert(CanonicalName::NNode, n_node.clone());

        // Faces
        let conn_name = required_attr(topology, "face_node_connectivity")?;
        let conn = referenced(dataset, "face_node_connectivity", conn_name)?;
        let (n_face, n_max_face_nodes) =
            connectivity_dims(conn, topology.text_attr("face_dimension"))?;
        names.insert(CanonicalName::FaceNodeConnectivity, conn.name.clone());
        names.insert(CanonicalName::NFace, n_face);
        names.insert(CanonicalName::NMaxFaceNodes, n_max_face_nodes);

        if let Some(coords) = topology.text_attr("face_coordinates") {
            let (face_x, face_y) = coordinate_pair(dataset, "face_coordinates", coords)?;
            names.insert(CanonicalName::FaceX, face_x.name.clone());
            names.insert(CanonicalName::FaceY, face_y.name.clone());
        }

        // Edges
        if let Some(coords) = topology.text_attr("edge_coordinates") {
            let (edge_x, edge_y) = coordinate_pair(dataset, "edge_coordinates", coords)?;
            names.insert(CanonicalName::EdgeX, edge_x.name.clone());
            names.insert(CanonicalName::EdgeY, edge_y.name.clone());
        }
        if let Some(conn_name) = topology.text_attr("edge_node_connectivity") {
            let conn = referenced(dataset, "edge_node_connectivity", conn_name)?;
            let (n_edge, _) = connectivity_dims(conn, topology.text_attr("edge_dimension"))?;
            names.insert(CanonicalName::EdgeNodeConnectivity, conn.name.clone());
            names.insert(CanonicalName::NEdge, n_edge);
        }

        tracing::debug!(
            topology = %topology.name,
            resolved = names.len(),
            "resolved names from UGRID attributes"
        );

        Ok(Self {
            convention: Convention::Ugrid,
            names,
        })
    }

    pub fn convention(&self) -> Convention {
        self.convention
    }

    pub fn get(&self, name: CanonicalName) -> Option<&str> {
        self.names.get(&name).map(String::as_str)
    }

    /// Look up the source name for a canonical name given as a string.
    ///
    pub fn source_name(&self, name: &str) -> Result<&str> {
        let name: CanonicalName = name.parse()?;
        self.get(name).ok_or(Error::NotPresent(name))
    }

    pub fn iter(&self) -> btree_map::Iter<'_, CanonicalName, String> {
        self.names.iter()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<'a> IntoIterator for &'a NameTable {
    type Item = (&'a CanonicalName, &'a String);
    type IntoIter = btree_map::Iter<'a, CanonicalName, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Find the 2D mesh topology variable. A file may describe several meshes (eg a 1D network
/// alongside a 2D mesh), in which case the 2D one is used.
///
fn find_topology(dataset: &Dataset) -> Result<&Variable> {
    let candidates: Vec<&Variable> = dataset
        .variables()
        .iter()
        .filter(|var| var.text_attr(CF_ROLE) == Some(MESH_TOPOLOGY))
        .collect();

    match candidates.as_slice() {
        [] => Err(Error::MissingTopology),
        [only] => Ok(*only),
        _ => {
            let two_d: Vec<&Variable> = candidates
                .iter()
                .copied()
                .filter(|var| {
                    var.attr("topology_dimension").and_then(|value| value.as_int()) == Some(2)
                })
                .collect();
            match two_d.as_slice() {
                [] => Err(Error::MissingTopology),
                [only] => {
                    tracing::debug!(topology = %only.name, "picked 2D topology among several");
                    Ok(*only)
                }
                _ => Err(Error::Ambiguous {
                    name: String::from(MESH_TOPOLOGY),
                    candidates: two_d.iter().map(|var| var.name.clone()).collect(),
                }),
            }
        }
    }
}

fn required_attr<'a>(topology: &'a Variable, attribute: &str) -> Result<&'a str> {
    topology
        .text_attr(attribute)
        .ok_or_else(|| Error::MissingAttribute {
            variable: topology.name.clone(),
            attribute: attribute.to_string(),
        })
}

fn referenced<'a>(dataset: &'a Dataset, attribute: &str, name: &str) -> Result<&'a Variable> {
    dataset
        .get_variable(name)
        .ok_or_else(|| Error::DanglingReference {
            attribute: attribute.to_string(),
            name: name.to_string(),
        })
}

const X_STANDARD_NAMES: [&str; 2] = ["longitude", "projection_x_coordinate"];
const Y_STANDARD_NAMES: [&str; 2] = ["latitude", "projection_y_coordinate"];

/// Split a UGRID coordinates attribute, eg "Mesh2_node_x Mesh2_node_y", into its x and y
/// variables.
///
/// Each variable's `standard_name` decides which is which. If only one axis is marked, the
/// other is the first remaining listed variable. With no markers at all, the first listed
/// variable is x and the second is y.
///
fn coordinate_pair<'a>(
    dataset: &'a Dataset,
    attribute: &str,
    value: &str,
) -> Result<(&'a Variable, &'a Variable)> {
    let vars = value
        .split_whitespace()
        .map(|name| referenced(dataset, attribute, name))
        .collect::<Result<Vec<_>>>()?;

    if vars.len() < 2 {
        return Err(Error::Shape {
            name: attribute.to_string(),
            reason: format!("expected at least two coordinate variables, got {value:?}"),
        });
    }

    let with_standard_name = |standard_names: [&str; 2]| {
        vars.iter().copied().find(|var| {
            var.text_attr("standard_name")
                .map_or(false, |name| standard_names.contains(&name))
        })
    };

    let (x, y) = match (
        with_standard_name(X_STANDARD_NAMES),
        with_standard_name(Y_STANDARD_NAMES),
    ) {
        (Some(x), Some(y)) => (x, y),
        (Some(x), None) => {
            tracing::debug!(attribute, "no standard_name for y, using position");
            (x, other_than(&vars, x))
        }
        (None, Some(y)) => {
            tracing::debug!(attribute, "no standard_name for x, using position");
            (other_than(&vars, y), y)
        }
        (None, None) => {
            tracing::debug!(attribute, "no standard_names, using position");
            (vars[0], vars[1])
        }
    };

    if std::ptr::eq(x, y) {
        return Err(Error::Ambiguous {
            name: attribute.to_string(),
            candidates: vec![x.name.clone()],
        });
    }

    Ok((x, y))
}

/// The first listed variable that isn't `marked`, or `marked` itself if it's listed alone.
fn other_than<'a>(vars: &[&'a Variable], marked: &'a Variable) -> &'a Variable {
    vars.iter()
        .copied()
        .find(|var| !std::ptr::eq(*var, marked))
        .unwrap_or(marked)
}

/// Work out the element and per-element dimensions of a connectivity variable.
///
/// UGRID lets a file declare the element dimension explicitly (`face_dimension`,
/// `edge_dimension`), which matters when the connectivity array is stored transposed.
/// Otherwise the outer dimension is the element dimension.
///
fn connectivity_dims(conn: &Variable, declared: Option<&str>) -> Result<(String, String)> {
    let [outer, inner] = conn.dims.as_slice() else {
        return Err(Error::Shape {
            name: conn.name.clone(),
            reason: format!("connectivity must be 2D, has {} dimensions", conn.dims.len()),
        });
    };

    match declared {
        None => Ok((outer.clone(), inner.clone())),
        Some(dim) if dim == outer => Ok((outer.clone(), inner.clone())),
        Some(dim) if dim == inner => Ok((inner.clone(), outer.clone())),
        Some(dim) => Err(Error::DanglingReference {
            attribute: format!("dimension of {}", conn.name),
            name: dim.to_string(),
        }),
    }
}
