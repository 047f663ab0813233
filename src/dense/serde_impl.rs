//! Serialization (`serde` feature).
//!
//! A matrix persists as `{ rows, cols, data }` with `data` in the internal
//! column-major order; a vector as `{ data }`. Deserialization rejects a
//! matrix whose `data` length is not `rows * cols`.
//!
//! [`MatrixX::to_bytes`] / [`MatrixX::from_bytes`] use `bincode`, which
//! stores floats bit-for-bit, so a binary round trip is exact.

use alloc::string::ToString;
use alloc::vec::Vec;

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};
use crate::traits::Scalar;

use super::vector::VectorX;
use super::MatrixX;

#[derive(Serialize)]
#[serde(rename = "MatrixX")]
struct MatrixReprRef<'a, T> {
    rows: usize,
    cols: usize,
    data: &'a [T],
}

#[derive(Deserialize)]
#[serde(rename = "MatrixX")]
struct MatrixRepr<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

#[derive(Serialize)]
#[serde(rename = "VectorX")]
struct VectorReprRef<'a, T> {
    data: &'a [T],
}

#[derive(Deserialize)]
#[serde(rename = "VectorX")]
struct VectorRepr<T> {
    data: Vec<T>,
}

impl<T: Serialize> Serialize for MatrixX<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        MatrixReprRef {
            rows: self.nrows,
            cols: self.ncols,
            data: &self.data,
        }
        .serialize(serializer)
    }
}

impl<'de, T: Scalar + Deserialize<'de>> Deserialize<'de> for MatrixX<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let repr = MatrixRepr::<T>::deserialize(deserializer)?;
        let expected = repr
            .rows
            .checked_mul(repr.cols)
            .ok_or_else(|| de::Error::custom("matrix shape overflows usize"))?;
        if repr.data.len() != expected {
            return Err(de::Error::custom(format_args!(
                "expected {} elements for a {}x{} matrix, found {}",
                expected,
                repr.rows,
                repr.cols,
                repr.data.len()
            )));
        }
        Ok(MatrixX::from_col_major(repr.rows, repr.cols, repr.data))
    }
}

impl<T: Serialize> Serialize for VectorX<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        VectorReprRef {
            data: self.as_slice(),
        }
        .serialize(serializer)
    }
}

impl<'de, T: Scalar + Deserialize<'de>> Deserialize<'de> for VectorX<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let repr = VectorRepr::<T>::deserialize(deserializer)?;
        Ok(VectorX::from_vec(repr.data))
    }
}

impl<T: Scalar + Serialize + DeserializeOwned> MatrixX<T> {
    /// Encode to the compact binary form.
    ///
    /// ```
    /// use matrixx::MatrixXd;
    /// let m = MatrixXd::from_rows(2, 2, &[1.0, -0.1, 1e300, 3.5]);
    /// let bytes = m.to_bytes().unwrap();
    /// assert_eq!(MatrixXd::from_bytes(&bytes).unwrap(), m);
    /// ```
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Decode from [`to_bytes`](Self::to_bytes) output.
    ///
    /// Fails with [`Error::Serialization`] on truncated or inconsistent input.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| Error::Serialization(e.to_string()))
    }
}

impl<T: Scalar + Serialize + DeserializeOwned> VectorX<T> {
    /// Encode to the compact binary form.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Decode from [`to_bytes`](Self::to_bytes) output.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| Error::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dense::{MatrixXd, VectorXd};

    #[test]
    fn matrix_bytes_exact() {
        let m = MatrixXd::from_fn(4, 3, |i, j| (i as f64 - 1.5) / (j as f64 + 0.3));
        let back = MatrixXd::from_bytes(&m.to_bytes().unwrap()).unwrap();
        assert_eq!(back, m);
        for (a, b) in back.as_slice().iter().zip(m.as_slice()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn vector_bytes_exact() {
        let v = VectorXd::from_slice(&[0.1, -0.0, f64::MIN_POSITIVE, 7.25]);
        let back = VectorXd::from_bytes(&v.to_bytes().unwrap()).unwrap();
        assert_eq!(back, v);
        assert!(back[1].is_sign_negative());
    }

    #[test]
    fn empty_round_trip() {
        let m = MatrixXd::zeros(0, 5);
        let back = MatrixXd::from_bytes(&m.to_bytes().unwrap()).unwrap();
        assert_eq!(back.shape(), (0, 5));
    }

    #[test]
    fn truncated_input() {
        let bytes = MatrixXd::identity(3, 3).to_bytes().unwrap();
        let err = MatrixXd::from_bytes(&bytes[..bytes.len() - 4]).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn inconsistent_shape_rejected() {
        let data = [1.0_f64, 2.0, 3.0];
        let bytes = bincode::serialize(&MatrixReprRef {
            rows: 2,
            cols: 2,
            data: &data,
        })
        .unwrap();
        match MatrixXd::from_bytes(&bytes) {
            Err(Error::Serialization(msg)) => assert!(msg.contains("expected 4 elements"), "{}", msg),
            other => panic!("expected a serialization error, got {:?}", other),
        }
    }
}
