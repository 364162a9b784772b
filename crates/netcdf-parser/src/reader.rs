//! Reading CHUK datasets from NetCDF-4 files.

use std::path::Path;

use chuk_common::{AttributeMap, Dataset, Grid, Variable, VariableData};
use netcdf::types::{FloatType, IntType, NcVariableType};
use tracing::{debug, warn};

use crate::attrs;
use crate::error::{NetCdfError, NetCdfResult};
use crate::native::{has_attr, silence_hdf5_errors};

/// Read every variable, dimension and global attribute of a file.
///
/// Variables of types the dataset model cannot hold (strings, compound
/// types, ...) are skipped with a warning.
pub fn read_dataset<P: AsRef<Path>>(path: P) -> NetCdfResult<Dataset> {
    let path = path.as_ref();
    let file = open(path)?;

    let mut dataset = Dataset::with_attrs(attrs::collect(file.attributes()));

    for dim in file.dimensions() {
        dataset.add_dimension(&dim.name(), dim.len())?;
    }

    for var in file.variables() {
        match convert_variable(&var)? {
            Some(variable) => dataset.add_variable(variable)?,
            None => warn!(
                path = %path.display(),
                variable = %var.name(),
                "Skipping variable with unsupported type"
            ),
        }
    }

    debug!(
        path = %path.display(),
        variables = dataset.variables().len(),
        "Read NetCDF dataset"
    );
    Ok(dataset)
}

/// Read a single variable with its attributes.
pub fn read_variable<P: AsRef<Path>>(path: P, name: &str) -> NetCdfResult<Variable> {
    let path = path.as_ref();
    let file = open(path)?;

    let var = file
        .variable(name)
        .ok_or_else(|| NetCdfError::MissingData(format!("{} variable", name)))?;

    convert_variable(&var)?.ok_or_else(|| {
        NetCdfError::InvalidFormat(format!("variable {} has an unsupported type", name))
    })
}

/// Read only the global attributes of a file.
pub fn read_global_attributes<P: AsRef<Path>>(path: P) -> NetCdfResult<AttributeMap> {
    let file = open(path.as_ref())?;
    Ok(attrs::collect(file.attributes()))
}

fn open(path: &Path) -> NetCdfResult<netcdf::File> {
    // Silence HDF5's verbose stderr output for missing attributes
    silence_hdf5_errors();

    if !path.exists() {
        return Err(NetCdfError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} does not exist", path.display()),
        )));
    }

    netcdf::open(path)
        .map_err(|e| NetCdfError::InvalidFormat(format!("Failed to open NetCDF: {}", e)))
}

fn convert_variable(var: &netcdf::Variable) -> NetCdfResult<Option<Variable>> {
    let name = var.name();
    let dims: Vec<String> = var.dimensions().iter().map(|d| d.name()).collect();
    let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();

    let data = match var.vartype() {
        NcVariableType::Int(IntType::I8) => {
            VariableData::Byte(Grid::new(shape, var.get_values(..)?)?)
        }
        NcVariableType::Int(IntType::I16) => {
            VariableData::Short(Grid::new(shape, var.get_values(..)?)?)
        }
        NcVariableType::Int(IntType::I32) => {
            VariableData::Int(Grid::new(shape, var.get_values(..)?)?)
        }
        NcVariableType::Int(IntType::I64) => {
            VariableData::Long(Grid::new(shape, var.get_values(..)?)?)
        }
        NcVariableType::Int(IntType::U8) => {
            VariableData::UByte(Grid::new(shape, var.get_values(..)?)?)
        }
        NcVariableType::Float(FloatType::F32) => {
            VariableData::Float(Grid::new(shape, var.get_values(..)?)?)
        }
        NcVariableType::Float(FloatType::F64) => {
            VariableData::Double(Grid::new(shape, var.get_values(..)?)?)
        }
        _ => return Ok(None),
    };

    let mut variable = Variable::new(name, dims, data)?;
    variable.attrs = attrs::collect(var.attributes());

    if has_attr(var, "scale_factor") || has_attr(var, "add_offset") {
        debug!(variable = %variable.name, "Packed variable left unscaled");
    }

    Ok(Some(variable))
}
