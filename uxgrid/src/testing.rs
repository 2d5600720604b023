//! Small datasets in each supported convention, all describing the same two triangles:
//!
//! ```text
//!   3 ----- 2
//!   |     / |
//!   |   /   |
//!   | /     |
//!   0 ----- 1
//! ```
//!
use ndarray::{arr0, array};

use crate::{
    conventions::{CF_ROLE, MESH_TOPOLOGY},
    dataset::{Dataset, Variable},
};

/// A UGRID dataset whose names all start with `prefix`, following the layout of the example
/// in the UGRID conventions document (`Mesh2`, `Mesh2_node_x`, `nMesh2_node`, ...).
///
pub(crate) fn ugrid(prefix: &str) -> Dataset {
    ugrid_with_topology(prefix, |topology| topology)
}

/// Same as `ugrid` but lets the caller alter the topology variable before it's added.
///
pub(crate) fn ugrid_with_topology(
    prefix: &str,
    edit: impl FnOnce(Variable) -> Variable,
) -> Dataset {
    let n_node = format!("n{prefix}_node");
    let n_edge = format!("n{prefix}_edge");
    let n_face = format!("n{prefix}_face");
    let n_max = format!("nMax{prefix}_face_nodes");

    let mut ds = Dataset::new();
    ds.set_attr("Conventions", "UGRID-1.0");
    ds.add_dimension(&n_node, 4).unwrap();
    ds.add_dimension(&n_edge, 5).unwrap();
    ds.add_dimension(&n_face, 2).unwrap();
    ds.add_dimension(&n_max, 3).unwrap();
    ds.add_dimension("Two", 2).unwrap();

    let topology = Variable::new(prefix, &[], arr0(0))
        .with_attr(CF_ROLE, MESH_TOPOLOGY)
        .with_attr("topology_dimension", 2_i64)
        .with_attr(
            "node_coordinates",
            format!("{prefix}_node_x {prefix}_node_y"),
        )
        .with_attr("face_node_connectivity", format!("{prefix}_face_nodes"))
        .with_attr("face_dimension", n_face.as_str())
        .with_attr(
            "face_coordinates",
            format!("{prefix}_face_x {prefix}_face_y"),
        )
        .with_attr("edge_node_connectivity", format!("{prefix}_edge_nodes"))
        .with_attr("edge_dimension", n_edge.as_str());
    ds.add_variable(edit(topology)).unwrap();

    ds.add_variable(
        Variable::new(
            format!("{prefix}_node_x"),
            &[n_node.as_str()],
            array![0.0, 10.0, 10.0, 0.0],
        )
        .with_attr("standard_name", "longitude"),
    )
    .unwrap();
    ds.add_variable(
        Variable::new(
            format!("{prefix}_node_y"),
            &[n_node.as_str()],
            array![0.0, 0.0, 10.0, 10.0],
        )
        .with_attr("standard_name", "latitude"),
    )
    .unwrap();
    ds.add_variable(
        Variable::new(format!("{prefix}_face_x"), &[n_face.as_str()], array![6.7, 3.3])
            .with_attr("standard_name", "longitude"),
    )
    .unwrap();
    ds.add_variable(
        Variable::new(format!("{prefix}_face_y"), &[n_face.as_str()], array![3.3, 6.7])
            .with_attr("standard_name", "latitude"),
    )
    .unwrap();
    ds.add_variable(
        Variable::new(
            format!("{prefix}_face_nodes"),
            &[n_face.as_str(), n_max.as_str()],
            array![[0, 1, 2], [0, 2, 3]],
        )
        .with_attr("cf_role", "face_node_connectivity")
        .with_attr("start_index", 0_i64),
    )
    .unwrap();
    ds.add_variable(
        Variable::new(
            format!("{prefix}_edge_nodes"),
            &[n_edge.as_str(), "Two"],
            array![[0, 1], [1, 2], [2, 3], [3, 0], [0, 2]],
        )
        .with_attr("cf_role", "edge_node_connectivity"),
    )
    .unwrap();

    ds
}

/// An EXODUS dataset with a single triangle element block. Connectivity is 1-based.
///
/// Like a real EXODUS II file it carries the global element and block counts next to the
/// per-block dimensions.
///
pub(crate) fn exodus() -> Dataset {
    let mut ds = Dataset::new();
    ds.add_dimension("num_dim", 2).unwrap();
    ds.add_dimension("num_nodes", 4).unwrap();
    ds.add_dimension("num_elem", 2).unwrap();
    ds.add_dimension("num_el_blk", 1).unwrap();
    ds.add_dimension("num_el_in_blk1", 2).unwrap();
    ds.add_dimension("num_nod_per_el1", 3).unwrap();

    ds.add_variable(Variable::new("coordx", &["num_nodes"], array![0.0, 10.0, 10.0, 0.0]))
        .unwrap();
    ds.add_variable(Variable::new("coordy", &["num_nodes"], array![0.0, 0.0, 10.0, 10.0]))
        .unwrap();
    ds.add_variable(
        Variable::new(
            "connect1",
            &["num_el_in_blk1", "num_nod_per_el1"],
            array![[1, 2, 3], [1, 3, 4]],
        )
        .with_attr("elem_type", "TRI3"),
    )
    .unwrap();

    ds
}

/// An MPAS dataset. Edge coordinates are left out so there is an optional name it lacks.
///
pub(crate) fn mpas() -> Dataset {
    let mut ds = Dataset::new();
    ds.add_dimension("nCells", 2).unwrap();
    ds.add_dimension("nVertices", 4).unwrap();
    ds.add_dimension("nEdges", 5).unwrap();
    ds.add_dimension("maxEdges", 3).unwrap();
    ds.add_dimension("TWO", 2).unwrap();

    ds.add_variable(Variable::new(
        "lonVertex",
        &["nVertices"],
        array![0.0_f32, 0.17, 0.17, 0.0],
    ))
    .unwrap();
    ds.add_variable(Variable::new(
        "latVertex",
        &["nVertices"],
        array![0.0_f32, 0.0, 0.17, 0.17],
    ))
    .unwrap();
    ds.add_variable(Variable::new("lonCell", &["nCells"], array![0.12_f32, 0.06]))
        .unwrap();
    ds.add_variable(Variable::new("latCell", &["nCells"], array![0.06_f32, 0.12]))
        .unwrap();
    ds.add_variable(Variable::new(
        "verticesOnCell",
        &["nCells", "maxEdges"],
        array![[1, 2, 3], [1, 3, 4]],
    ))
    .unwrap();
    ds.add_variable(Variable::new(
        "verticesOnEdge",
        &["nEdges", "TWO"],
        array![[1, 2], [2, 3], [3, 4], [4, 1], [1, 3]],
    ))
    .unwrap();

    ds
}

/// A SCRIP dataset: cell centers and corners, no shared nodes.
///
pub(crate) fn scrip() -> Dataset {
    let mut ds = Dataset::new();
    ds.add_dimension("grid_size", 2).unwrap();
    ds.add_dimension("grid_corners", 3).unwrap();

    ds.add_variable(Variable::new(
        "grid_corner_lon",
        &["grid_size", "grid_corners"],
        array![[0.0, 10.0, 10.0], [0.0, 10.0, 0.0]],
    ))
    .unwrap();
    ds.add_variable(Variable::new(
        "grid_corner_lat",
        &["grid_size", "grid_corners"],
        array![[0.0, 0.0, 10.0], [0.0, 10.0, 10.0]],
    ))
    .unwrap();
    ds.add_variable(Variable::new("grid_center_lon", &["grid_size"], array![6.7, 3.3]))
        .unwrap();

    ds
}
