use std::{
    collections::{BTreeMap, BTreeSet},
    ptr,
};

use ndarray::{Array, ArrayD, ArrayViewD, Dimension as Dim};
use num_traits::{NumCast, ToPrimitive};
use paste::paste;
use serde::{Deserialize, Serialize};

use crate::{
    errors::{Error, Result},
    names::Kind,
};

/// A minimal in-memory dataset: named dimensions, named n-dimensional variables, and
/// attributes, laid out the way a netCDF file is.
///
/// Reading these from disk is left to whatever produced them. A `Dataset` is only ever read by
/// a `Grid`, never modified through it.
///
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    dimensions: Vec<Dimension>,
    variables: Vec<Variable>,

    /// Global attributes
    attrs: Attributes,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dimension {
    pub name: String,
    pub size: usize,
}

#[derive(Clone, Debug)]
pub struct Variable {
    /// Name of the variable, e.g. "Mesh2_node_x"
    pub name: String,

    /// Names of the dimensions indexing this variable, outermost first
    pub dims: Vec<String>,

    pub attrs: Attributes,

    pub data: VariableData,
}

pub type Attributes = BTreeMap<String, AttrValue>;

/// A single netCDF-style attribute value.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Int(i64),
    Double(f64),
    Text(String),
}

impl AttrValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttrValue::Int(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Double(value)
    }
}

/// The numeric payload of a variable.
///
#[derive(Clone, Debug, PartialEq)]
pub enum VariableData {
    F32(ArrayD<f32>),
    F64(ArrayD<f64>),
    I32(ArrayD<i32>),
    I64(ArrayD<i64>),
}

macro_rules! VariableData {
    ($variant:ident, $type:ident) => {
        paste! {
            impl VariableData {
                /// Borrow the data as an array of this type, or `None` if it is stored as a
                /// different type.
                pub fn [<as_ $type>](&self) -> Option<ArrayViewD<'_, $type>> {
                    match self {
                        VariableData::$variant(array) => Some(array.view()),
                        _ => None,
                    }
                }
            }

            impl<D: Dim> From<Array<$type, D>> for VariableData {
                fn from(array: Array<$type, D>) -> Self {
                    VariableData::$variant(array.into_dyn())
                }
            }
        }
    };
}

VariableData!(F32, f32);
VariableData!(F64, f64);
VariableData!(I32, i32);
VariableData!(I64, i64);

impl VariableData {
    pub fn shape(&self) -> &[usize] {
        match self {
            VariableData::F32(array) => array.shape(),
            VariableData::F64(array) => array.shape(),
            VariableData::I32(array) => array.shape(),
            VariableData::I64(array) => array.shape(),
        }
    }

    pub fn dtype(&self) -> &'static str {
        match self {
            VariableData::F32(_) => "f32",
            VariableData::F64(_) => "f64",
            VariableData::I32(_) => "i32",
            VariableData::I64(_) => "i64",
        }
    }

    /// Copy the data into an array of `N`, converting each element.
    ///
    /// Returns `None` if any element can't be represented as `N`, eg a negative fill value cast
    /// to an unsigned type.
    ///
    pub fn cast<N: NumCast>(&self) -> Option<ArrayD<N>> {
        match self {
            VariableData::F32(array) => cast(array),
            VariableData::F64(array) => cast(array),
            VariableData::I32(array) => cast(array),
            VariableData::I64(array) => cast(array),
        }
    }
}

fn cast<T, N>(array: &ArrayD<T>) -> Option<ArrayD<N>>
where
    T: ToPrimitive + Copy,
    N: NumCast,
{
    let values = array
        .iter()
        .map(|&value| <N as NumCast>::from(value))
        .collect::<Option<Vec<N>>>()?;

    ArrayD::from_shape_vec(array.raw_dim(), values).ok()
}

impl Variable {
    pub fn new<S: Into<String>>(name: S, dims: &[&str], data: impl Into<VariableData>) -> Self {
        Self {
            name: name.into(),
            dims: dims.iter().map(|dim| dim.to_string()).collect(),
            attrs: Attributes::new(),
            data: data.into(),
        }
    }

    pub fn with_attr<S: Into<String>>(mut self, name: S, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get(name)
    }

    /// Get a text attribute, treating a non-text value the same as a missing one.
    pub fn text_attr(&self, name: &str) -> Option<&str> {
        self.attr(name).and_then(AttrValue::as_text)
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_dimension<S: Into<String>>(&mut self, name: S, size: usize) -> Result<()> {
        let name = name.into();
        if self.get_dimension(&name).is_some() {
            return Err(Error::Duplicate(name));
        }
        self.dimensions.push(Dimension { name, size });

        Ok(())
    }

    /// Add a variable. All of its dimensions must already exist with sizes matching the shape
    /// of its data.
    ///
    pub fn add_variable(&mut self, variable: Variable) -> Result<()> {
        if self.get_variable(&variable.name).is_some() {
            return Err(Error::Duplicate(variable.name));
        }

        let shape = variable.shape();
        if shape.len() != variable.dims.len() {
            return Err(Error::Shape {
                name: variable.name.clone(),
                reason: format!(
                    "{} dimensions named for {}-dimensional data",
                    variable.dims.len(),
                    shape.len()
                ),
            });
        }
        for (dim, &len) in variable.dims.iter().zip(shape) {
            let dimension = self.get_dimension(dim).ok_or_else(|| Error::Shape {
                name: variable.name.clone(),
                reason: format!("unknown dimension {dim:?}"),
            })?;
            if dimension.size != len {
                return Err(Error::Shape {
                    name: variable.name.clone(),
                    reason: format!(
                        "dimension {dim:?} has size {} but data has length {len}",
                        dimension.size
                    ),
                });
            }
        }
        self.variables.push(variable);

        Ok(())
    }

    pub fn set_attr<S: Into<String>>(&mut self, name: S, value: impl Into<AttrValue>) {
        self.attrs.insert(name.into(), value.into());
    }

    pub fn attrs(&self) -> &Attributes {
        &self.attrs
    }

    pub fn get_variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|var| var.name == name)
    }

    pub fn get_dimension(&self, name: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|dim| dim.name == name)
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    /// Index the dataset by the name actually used in it.
    ///
    /// A variable wins over a dimension with the same name, as with netCDF coordinate variables.
    ///
    pub fn get(&self, name: &str) -> Result<Entry<'_>> {
        if let Some(var) = self.get_variable(name) {
            Ok(Entry::Variable(var))
        } else if let Some(dim) = self.get_dimension(name) {
            Ok(Entry::Dimension(dim))
        } else {
            Err(Error::BadName(name.to_string()))
        }
    }

    /// Index the dataset by name, looking only at entries of one kind.
    ///
    /// Unlike `get`, this finds the dimension behind a coordinate variable of the same name.
    ///
    pub fn get_kind(&self, name: &str, kind: Kind) -> Result<Entry<'_>> {
        let entry = match kind {
            Kind::Variable => self.get_variable(name).map(Entry::Variable),
            Kind::Dimension => self.get_dimension(name).map(Entry::Dimension),
        };

        entry.ok_or_else(|| Error::BadName(name.to_string()))
    }

    /// All variable and dimension names in the dataset
    pub fn names(&self) -> DatasetNames<'_> {
        DatasetNames {
            variables: self.variables.iter().map(|var| var.name.as_str()).collect(),
            dimensions: self.dimensions.iter().map(|dim| dim.name.as_str()).collect(),
        }
    }
}

/// The names present in a dataset, kept apart by kind since a variable may share its name with
/// a dimension.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DatasetNames<'a> {
    pub variables: BTreeSet<&'a str>,
    pub dimensions: BTreeSet<&'a str>,
}

impl DatasetNames<'_> {
    pub fn contains(&self, name: &str, kind: Kind) -> bool {
        match kind {
            Kind::Variable => self.variables.contains(name),
            Kind::Dimension => self.dimensions.contains(name),
        }
    }
}

/// A reference to something found in a `Dataset`.
///
/// Two entries are equal only if they point at the same object. Equal values stored under
/// different names are different entries.
///
#[derive(Clone, Copy, Debug)]
pub enum Entry<'a> {
    Variable(&'a Variable),
    Dimension(&'a Dimension),
}

impl<'a> Entry<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            Entry::Variable(var) => &var.name,
            Entry::Dimension(dim) => &dim.name,
        }
    }

    pub fn variable(self) -> Result<&'a Variable> {
        match self {
            Entry::Variable(var) => Ok(var),
            Entry::Dimension(dim) => Err(Error::KindMismatch {
                name: dim.name.clone(),
                expected: "variable",
            }),
        }
    }

    pub fn size(self) -> Result<usize> {
        match self {
            Entry::Dimension(dim) => Ok(dim.size),
            Entry::Variable(var) => Err(Error::KindMismatch {
                name: var.name.clone(),
                expected: "dimension",
            }),
        }
    }
}

impl PartialEq for Entry<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Entry::Variable(a), Entry::Variable(b)) => ptr::eq(*a, *b),
            (Entry::Dimension(a), Entry::Dimension(b)) => ptr::eq(*a, *b),
            _ => false,
        }
    }
}
