use paste::paste;

use crate::{
    aliases::AliasTable,
    conventions::{self, Convention},
    dataset::{Dataset, Entry, Variable},
    errors::{Error, Result},
    names::CanonicalName,
    table::NameTable,
};

/// An unstructured grid over a loaded dataset, addressed by canonical names.
///
/// A `Grid` borrows its dataset and resolves names once, when it is opened. Any name a grid
/// requires but can't find is reported then, never later at access time. There are three ways to
/// get at the same data afterward:
///
/// ```ignore
/// let by_source = grid.dataset().get("Mesh2_node_x")?;   // the file's own name
/// let by_key = grid.get("node_x")?;                      // canonical name as a key
/// let by_accessor = grid.node_x()?;                      // canonical name as a method
/// ```
///
/// All three return references to the same variable.
///
#[derive(Clone, Debug)]
pub struct Grid<'a> {
    dataset: &'a Dataset,
    names: NameTable,
}

impl<'a> Grid<'a> {
    /// Open a grid, detecting the convention from the dataset's contents.
    ///
    pub fn open(dataset: &'a Dataset) -> Result<Self> {
        let convention = conventions::detect(dataset)?;

        Self::with_convention(dataset, convention)
    }

    /// Open a grid known to follow `convention`.
    ///
    pub fn with_convention(dataset: &'a Dataset, convention: Convention) -> Result<Self> {
        let names = NameTable::resolve(dataset, convention)?;

        Ok(Self::new(dataset, names))
    }

    /// Open a grid using a caller supplied alias table, eg one loaded with
    /// `AliasTable::from_path`, in place of the built-in rules for `convention`.
    ///
    pub fn with_aliases(
        dataset: &'a Dataset,
        convention: Convention,
        aliases: &AliasTable,
    ) -> Result<Self> {
        let names = NameTable::from_aliases(convention, dataset, aliases)?;

        Ok(Self::new(dataset, names))
    }

    fn new(dataset: &'a Dataset, names: NameTable) -> Self {
        tracing::info!(
            convention = %names.convention(),
            resolved = names.len(),
            "opened grid"
        );

        Self { dataset, names }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn convention(&self) -> Convention {
        self.names.convention()
    }

    /// The canonical to source name mapping for this grid
    pub fn var_names(&self) -> &NameTable {
        &self.names
    }

    /// Look up an entry by canonical name given as a string, eg `"face_node_connectivity"`.
    ///
    /// Fails with `Error::UnknownName` for strings outside the canonical vocabulary, including the
    /// dataset's own source names, and with `Error::NotPresent` for optional names this grid
    /// doesn't have.
    ///
    pub fn get(&self, name: &str) -> Result<Entry<'a>> {
        self.get_canonical(name.parse()?)
    }

    /// Look up an entry by canonical name.
    ///
    /// Dimension names always give the dimension, even where the dataset also has a coordinate
    /// variable with the same name.
    ///
    pub fn get_canonical(&self, name: CanonicalName) -> Result<Entry<'a>> {
        let source = self.names.get(name).ok_or(Error::NotPresent(name))?;

        self.dataset.get_kind(source, name.kind())
    }
}

macro_rules! accessors {
    (variables: $($var:ident),*; dimensions: $($dim:ident),*) => {
        paste! {
            impl<'a> Grid<'a> {
                $(
                    #[doc = "Same as `get_canonical(CanonicalName::" $var ")`, as a variable."]
                    pub fn [<$var:snake>](&self) -> Result<&'a Variable> {
                        self.get_canonical(CanonicalName::$var)?.variable()
                    }
                )*

                $(
                    #[doc = "Same as `get_canonical(CanonicalName::" $dim ")`, as a size."]
                    pub fn [<$dim:snake>](&self) -> Result<usize> {
                        self.get_canonical(CanonicalName::$dim)?.size()
                    }
                )*
            }
        }
    };
}

accessors!(
    variables: NodeX, NodeY, FaceX, FaceY, EdgeX, EdgeY, FaceNodeConnectivity, EdgeNodeConnectivity;
    dimensions: NNode, NFace, NEdge, NMaxFaceNodes
);
