//! In-memory model of a CHUK dataset: global attributes, named dimensions
//! and typed variables.

use crate::attrs::{AttrValue, AttributeMap};
use crate::crs::{ChukCrs, CRS_VARIABLE};
use crate::error::{ChukError, ChukResult};
use crate::grid::Grid;

/// Typed variable values.
#[derive(Debug, Clone, PartialEq)]
pub enum VariableData {
    Byte(Grid<i8>),
    Short(Grid<i16>),
    Int(Grid<i32>),
    Long(Grid<i64>),
    UByte(Grid<u8>),
    Float(Grid<f32>),
    Double(Grid<f64>),
}

impl VariableData {
    pub fn shape(&self) -> &[usize] {
        match self {
            VariableData::Byte(g) => g.shape(),
            VariableData::Short(g) => g.shape(),
            VariableData::Int(g) => g.shape(),
            VariableData::Long(g) => g.shape(),
            VariableData::UByte(g) => g.shape(),
            VariableData::Float(g) => g.shape(),
            VariableData::Double(g) => g.shape(),
        }
    }

    /// NetCDF type name, as shown by `ncdump`.
    pub fn type_name(&self) -> &'static str {
        match self {
            VariableData::Byte(_) => "byte",
            VariableData::Short(_) => "short",
            VariableData::Int(_) => "int",
            VariableData::Long(_) => "int64",
            VariableData::UByte(_) => "ubyte",
            VariableData::Float(_) => "float",
            VariableData::Double(_) => "double",
        }
    }

    /// Widen every value to f64. NaN in float variables is preserved.
    pub fn to_f64(&self) -> Grid<f64> {
        match self {
            VariableData::Byte(g) => g.map(|&v| f64::from(v)),
            VariableData::Short(g) => g.map(|&v| f64::from(v)),
            VariableData::Int(g) => g.map(|&v| f64::from(v)),
            VariableData::Long(g) => g.map(|&v| v as f64),
            VariableData::UByte(g) => g.map(|&v| f64::from(v)),
            VariableData::Float(g) => g.map(|&v| f64::from(v)),
            VariableData::Double(g) => g.clone(),
        }
    }
}

impl From<Grid<f32>> for VariableData {
    fn from(g: Grid<f32>) -> Self {
        VariableData::Float(g)
    }
}

impl From<Grid<f64>> for VariableData {
    fn from(g: Grid<f64>) -> Self {
        VariableData::Double(g)
    }
}

impl From<Grid<i32>> for VariableData {
    fn from(g: Grid<i32>) -> Self {
        VariableData::Int(g)
    }
}

impl From<Grid<u8>> for VariableData {
    fn from(g: Grid<u8>) -> Self {
        VariableData::UByte(g)
    }
}

impl From<Grid<i8>> for VariableData {
    fn from(g: Grid<i8>) -> Self {
        VariableData::Byte(g)
    }
}

/// A named variable with its dimensions, data and attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub dims: Vec<String>,
    pub data: VariableData,
    pub attrs: AttributeMap,
}

impl Variable {
    /// Create a variable; the number of dimension names must match the data rank.
    pub fn new(
        name: impl Into<String>,
        dims: Vec<String>,
        data: impl Into<VariableData>,
    ) -> ChukResult<Self> {
        let data = data.into();
        if dims.len() != data.shape().len() {
            return Err(ChukError::ShapeMismatch {
                expected: vec![dims.len()],
                actual: vec![data.shape().len()],
            });
        }
        Ok(Self {
            name: name.into(),
            dims,
            data,
            attrs: AttributeMap::new(),
        })
    }

    /// Builder-style attribute setter.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(name, value);
        self
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }
}

/// A CHUK dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Global attributes.
    pub attrs: AttributeMap,
    dims: Vec<(String, usize)>,
    variables: Vec<Variable>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty dataset with the given global attributes.
    pub fn with_attrs(attrs: AttributeMap) -> Self {
        Self {
            attrs,
            ..Self::default()
        }
    }

    /// Declare a dimension. Redeclaring with the same size is a no-op.
    pub fn add_dimension(&mut self, name: &str, len: usize) -> ChukResult<()> {
        match self.dimension(name) {
            Some(existing) if existing != len => Err(ChukError::DimensionConflict {
                name: name.to_string(),
                existing,
                requested: len,
            }),
            Some(_) => Ok(()),
            None => {
                self.dims.push((name.to_string(), len));
                Ok(())
            }
        }
    }

    /// Size of a dimension.
    pub fn dimension(&self, name: &str) -> Option<usize> {
        self.dims.iter().find(|(n, _)| n == name).map(|(_, len)| *len)
    }

    /// Dimensions in declaration order.
    pub fn dimensions(&self) -> impl Iterator<Item = (&str, usize)> {
        self.dims.iter().map(|(n, len)| (n.as_str(), *len))
    }

    /// Add a variable, declaring its dimensions as needed.
    ///
    /// A variable with the same name is replaced.
    pub fn add_variable(&mut self, variable: Variable) -> ChukResult<()> {
        for (dim, &len) in variable.dims.iter().zip(variable.shape()) {
            if let Some(existing) = self.dimension(dim) {
                if existing != len && !self.only_user_of(dim, &variable.name) {
                    return Err(ChukError::DimensionConflict {
                        name: dim.clone(),
                        existing,
                        requested: len,
                    });
                }
            }
        }
        self.remove_variable(&variable.name);
        for (dim, &len) in variable.dims.iter().zip(variable.shape()) {
            match self.dims.iter_mut().find(|(n, _)| n == dim) {
                Some(entry) => entry.1 = len,
                None => self.dims.push((dim.clone(), len)),
            }
        }
        self.variables.push(variable);
        Ok(())
    }

    fn only_user_of(&self, dim: &str, name: &str) -> bool {
        self.variables
            .iter()
            .filter(|v| v.dims.iter().any(|d| d == dim))
            .all(|v| v.name == name)
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    pub fn variable_mut(&mut self, name: &str) -> Option<&mut Variable> {
        self.variables.iter_mut().find(|v| v.name == name)
    }

    /// Get a variable or fail with `MissingVariable`.
    pub fn require_variable(&self, name: &str) -> ChukResult<&Variable> {
        self.variable(name)
            .ok_or_else(|| ChukError::MissingVariable(name.to_string()))
    }

    pub fn contains_variable(&self, name: &str) -> bool {
        self.variable(name).is_some()
    }

    pub fn remove_variable(&mut self, name: &str) -> Option<Variable> {
        let pos = self.variables.iter().position(|v| v.name == name)?;
        Some(self.variables.remove(pos))
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Variable names in insertion order.
    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.variables.iter().map(|v| v.name.as_str())
    }

    /// CRS declared by the grid mapping variable, if any.
    pub fn crs(&self) -> Option<ChukCrs> {
        let var = self.variable(CRS_VARIABLE)?;
        ["spatial_ref", "crs_wkt", "epsg_code"]
            .iter()
            .filter_map(|key| var.attrs.get_text(key))
            .find_map(ChukCrs::parse)
            .or(Some(ChukCrs::Epsg27700))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(ny: usize, nx: usize) -> Grid<f32> {
        Grid::filled(vec![ny, nx], 0.0)
    }

    fn yx() -> Vec<String> {
        vec!["y".to_string(), "x".to_string()]
    }

    #[test]
    fn test_add_variable_declares_dims() {
        let mut ds = Dataset::new();
        ds.add_variable(Variable::new("t", yx(), grid(3, 4)).unwrap())
            .unwrap();
        assert_eq!(ds.dimension("y"), Some(3));
        assert_eq!(ds.dimension("x"), Some(4));
    }

    #[test]
    fn test_add_variable_dimension_conflict() {
        let mut ds = Dataset::new();
        ds.add_variable(Variable::new("a", yx(), grid(3, 4)).unwrap())
            .unwrap();
        let result = ds.add_variable(Variable::new("b", yx(), grid(3, 5)).unwrap());
        assert!(matches!(result, Err(ChukError::DimensionConflict { .. })));
    }

    #[test]
    fn test_replace_variable() {
        let mut ds = Dataset::new();
        ds.add_variable(Variable::new("a", yx(), grid(3, 4)).unwrap())
            .unwrap();
        ds.add_variable(Variable::new("a", yx(), grid(5, 6)).unwrap())
            .unwrap();
        assert_eq!(ds.variables().len(), 1);
        assert_eq!(ds.dimension("y"), Some(5));
    }

    #[test]
    fn test_variable_rank_mismatch() {
        let result = Variable::new("a", vec!["y".to_string()], grid(2, 2));
        assert!(result.is_err());
    }

    #[test]
    fn test_crs_defaults_to_osgb() {
        let mut ds = Dataset::new();
        assert_eq!(ds.crs(), None);
        let crs = Variable::new(CRS_VARIABLE, vec![], Grid::new(vec![], vec![0i32]).unwrap())
            .unwrap();
        ds.add_variable(crs).unwrap();
        assert_eq!(ds.crs(), Some(ChukCrs::Epsg27700));
    }

    #[test]
    fn test_to_f64_preserves_nan() {
        let data = VariableData::Float(Grid::new(vec![2], vec![1.0, f32::NAN]).unwrap());
        let widened = data.to_f64();
        assert_eq!(widened.data()[0], 1.0);
        assert!(widened.data()[1].is_nan());
    }
}
