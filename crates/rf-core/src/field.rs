//! Mesh dimensions, flat scalar fields, and named field stores.
//!
//! Fields are flat `f64` arrays keyed by structured-mesh dimensions
//! (`nx * ny * nz` entries). No mesh topology is represented here; the
//! surrounding framework owns geometry, decomposition, and interpolation
//! spaces. These types only carry the data that crosses the coupling
//! boundary.

use std::collections::HashMap;

use crate::error::{RfError, RfResult};
use crate::numeric::Real;

/// Structured-mesh dimensions used to size flat fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeshDims {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
}

impl MeshDims {
    /// Create mesh dimensions; every extent must be nonzero.
    pub fn new(nx: usize, ny: usize, nz: usize) -> RfResult<Self> {
        if nx == 0 || ny == 0 || nz == 0 {
            return Err(RfError::InvalidArg {
                what: "mesh dimensions must be nonzero",
            });
        }
        Ok(Self { nx, ny, nz })
    }

    /// Total number of field entries for this mesh.
    pub fn len(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Flat scalar field over a structured mesh.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarField {
    dims: MeshDims,
    data: Vec<Real>,
}

impl ScalarField {
    /// Uniform field of `value`.
    pub fn filled(dims: MeshDims, value: Real) -> Self {
        Self {
            dims,
            data: vec![value; dims.len()],
        }
    }

    /// Field from an existing flat array; the length must match the mesh.
    pub fn from_vec(dims: MeshDims, data: Vec<Real>) -> RfResult<Self> {
        if data.len() != dims.len() {
            return Err(RfError::SizeMismatch {
                what: "scalar field data",
                expected: dims.len(),
                got: data.len(),
            });
        }
        Ok(Self { dims, data })
    }

    pub fn dims(&self) -> MeshDims {
        self.dims
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn values(&self) -> &[Real] {
        &self.data
    }

    pub fn values_mut(&mut self) -> &mut [Real] {
        &mut self.data
    }

    /// Overwrite every entry with `value`.
    pub fn fill(&mut self, value: Real) {
        self.data.fill(value);
    }

    /// Copy another field's values into this one; lengths must match.
    pub fn copy_from(&mut self, other: &ScalarField) -> RfResult<()> {
        if other.len() != self.len() {
            return Err(RfError::SizeMismatch {
                what: "scalar field copy",
                expected: self.len(),
                got: other.len(),
            });
        }
        self.data.copy_from_slice(&other.data);
        Ok(())
    }

    /// Error if any entry is NaN or infinite.
    pub fn ensure_finite(&self, what: &'static str) -> RfResult<()> {
        for &v in &self.data {
            crate::numeric::ensure_finite(v, what)?;
        }
        Ok(())
    }
}

/// Named collection of scalar fields owned by one application.
#[derive(Clone, Debug, Default)]
pub struct FieldStore {
    fields: HashMap<String, ScalarField>,
}

impl FieldStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a field under `name`.
    pub fn insert(&mut self, name: impl Into<String>, field: ScalarField) {
        self.fields.insert(name.into(), field);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn try_get(&self, name: &str) -> Option<&ScalarField> {
        self.fields.get(name)
    }

    pub fn get(&self, name: &str) -> RfResult<&ScalarField> {
        self.fields.get(name).ok_or_else(|| RfError::MissingField {
            name: name.to_string(),
        })
    }

    pub fn get_mut(&mut self, name: &str) -> RfResult<&mut ScalarField> {
        self.fields
            .get_mut(name)
            .ok_or_else(|| RfError::MissingField {
                name: name.to_string(),
            })
    }

    /// Field names in arbitrary order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_dims_reject_zero_extent() {
        assert!(MeshDims::new(0, 4, 4).is_err());
        let dims = MeshDims::new(3, 4, 5).unwrap();
        assert_eq!(dims.len(), 60);
    }

    #[test]
    fn from_vec_checks_length() {
        let dims = MeshDims::new(2, 2, 2).unwrap();
        assert!(ScalarField::from_vec(dims, vec![0.0; 7]).is_err());
        let field = ScalarField::from_vec(dims, vec![1.5; 8]).unwrap();
        assert_eq!(field.values()[3], 1.5);
    }

    #[test]
    fn copy_from_checks_length() {
        let dims = MeshDims::new(2, 2, 1).unwrap();
        let src = ScalarField::filled(dims, 3.0);
        let mut dst = ScalarField::filled(dims, 0.0);
        dst.copy_from(&src).unwrap();
        assert_eq!(dst.values(), src.values());

        let other = ScalarField::filled(MeshDims::new(3, 1, 1).unwrap(), 1.0);
        assert!(dst.copy_from(&other).is_err());
    }

    #[test]
    fn ensure_finite_flags_nan() {
        let dims = MeshDims::new(2, 1, 1).unwrap();
        let field = ScalarField::from_vec(dims, vec![1.0, f64::NAN]).unwrap();
        assert!(field.ensure_finite("test field").is_err());
    }

    #[test]
    fn store_lookup_reports_missing_name() {
        let mut store = FieldStore::new();
        let dims = MeshDims::new(1, 1, 1).unwrap();
        store.insert("power", ScalarField::filled(dims, 0.0));
        assert!(store.contains("power"));
        let err = store.get("temperature").unwrap_err();
        assert!(format!("{err}").contains("temperature"));
    }
}
