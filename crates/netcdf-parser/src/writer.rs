//! Writing CHUK datasets to NetCDF-4 files.

use std::path::Path;

use chuk_common::{Dataset, VariableData};
use tracing::{debug, info};

use crate::attrs;
use crate::error::NetCdfResult;
use crate::native::silence_hdf5_errors;

/// Define a variable of the grid's element type, attach its attributes and
/// write its values.
macro_rules! put_variable {
    ($file:expr, $variable:expr, $dims:expr, $ty:ty, $grid:expr) => {{
        let mut var = $file.add_variable::<$ty>(&$variable.name, $dims)?;
        for (name, value) in $variable.attrs.iter() {
            var.put_attribute(name, attrs::to_netcdf(name, value))?;
        }
        var.put_values($grid.data(), ..)?;
    }};
}

/// Write a dataset to `path`, replacing any existing file.
///
/// Dimensions are written in declaration order, then global attributes,
/// then variables in insertion order.
pub fn write_dataset<P: AsRef<Path>>(dataset: &Dataset, path: P) -> NetCdfResult<()> {
    let path = path.as_ref();
    silence_hdf5_errors();

    let mut file = netcdf::create(path)?;

    for (name, len) in dataset.dimensions() {
        file.add_dimension(name, len)?;
    }

    for (name, value) in dataset.attrs.iter() {
        file.add_attribute(name, attrs::to_netcdf(name, value))?;
    }

    for variable in dataset.variables() {
        let dims: Vec<&str> = variable.dims.iter().map(String::as_str).collect();
        debug!(
            variable = %variable.name,
            dtype = variable.data.type_name(),
            shape = ?variable.shape(),
            "Writing variable"
        );
        match &variable.data {
            VariableData::Byte(g) => put_variable!(file, variable, &dims, i8, g),
            VariableData::Short(g) => put_variable!(file, variable, &dims, i16, g),
            VariableData::Int(g) => put_variable!(file, variable, &dims, i32, g),
            VariableData::Long(g) => put_variable!(file, variable, &dims, i64, g),
            VariableData::UByte(g) => put_variable!(file, variable, &dims, u8, g),
            VariableData::Float(g) => put_variable!(file, variable, &dims, f32, g),
            VariableData::Double(g) => put_variable!(file, variable, &dims, f64, g),
        }
    }

    info!(
        path = %path.display(),
        variables = dataset.variables().len(),
        "Wrote NetCDF dataset"
    );
    Ok(())
}
