use std::fmt;
use std::ops::Index;

use bytes::{Buf, BufMut};
use rand::Rng;

use crate::error::{NetError, Result};

/// Size in bytes of the `rows, columns` header written before every matrix.
pub const HEADER_BYTES: usize = 2 * std::mem::size_of::<i32>();

/// A dense `rows x columns` matrix of `f64`, stored row-major.
///
/// Shape is fixed at construction and every operation returns a new matrix;
/// the only way to "change" a matrix is to replace it.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    columns: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Zero-filled matrix. Fails if either dimension is 0.
    pub fn new(rows: usize, columns: usize) -> Result<Matrix> {
        check_shape(rows, columns)?;
        Ok(Matrix {
            rows,
            columns,
            data: vec![0.0; rows * columns],
        })
    }

    /// Wraps a row-major buffer. `data.len()` must equal `rows * columns`.
    pub fn from_vec(rows: usize, columns: usize, data: Vec<f64>) -> Result<Matrix> {
        check_shape(rows, columns)?;
        if data.len() != rows * columns {
            return Err(NetError::ShapeMismatch {
                op: "from_vec",
                left: (rows, columns),
                right: (data.len(), 1),
            });
        }
        Ok(Matrix { rows, columns, data })
    }

    /// Builds a matrix from nested rows; every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Matrix> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        check_shape(n_rows, n_cols)?;

        let mut data = Vec::with_capacity(n_rows * n_cols);
        for row in rows {
            if row.len() != n_cols {
                return Err(NetError::ShapeMismatch {
                    op: "from_rows",
                    left: (1, n_cols),
                    right: (1, row.len()),
                });
            }
            data.extend(row);
        }

        Ok(Matrix {
            rows: n_rows,
            columns: n_cols,
            data,
        })
    }

    /// Every cell drawn independently and uniformly from `[min, max)`.
    pub fn random_uniform<R>(rows: usize, columns: usize, min: f64, max: f64, rng: &mut R) -> Result<Matrix>
    where
        R: Rng + ?Sized,
    {
        let mut res = Matrix::new(rows, columns)?;
        for cell in res.data.iter_mut() {
            *cell = rng.gen::<f64>() * (max - min) + min;
        }
        Ok(res)
    }

    /// `N x 1` column vector holding `values`.
    pub fn as_column(values: &[f64]) -> Result<Matrix> {
        Matrix::from_vec(values.len(), 1, values.to_vec())
    }

    /// Inverse of [`Matrix::as_column`]. Fails unless this is a column vector.
    pub fn to_column_vec(&self) -> Result<Vec<f64>> {
        if self.columns != 1 {
            return Err(NetError::ShapeMismatch {
                op: "to_column_vec",
                left: (self.rows, self.columns),
                right: (self.rows, 1),
            });
        }
        Ok(self.data.clone())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false: a matrix has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major view of the cells.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        if row < self.rows && column < self.columns {
            Some(self.data[row * self.columns + column])
        } else {
            None
        }
    }

    pub fn add(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with(other, "add", |a, b| a + b)
    }

    pub fn subtract(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with(other, "subtract", |a, b| a - b)
    }

    /// Element-wise (Hadamard) product of two same-shape matrices.
    pub fn hadamard(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with(other, "hadamard", |a, b| a * b)
    }

    /// Standard matrix product `self * other`.
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix> {
        if self.columns != other.rows {
            return Err(NetError::ShapeMismatch {
                op: "multiply",
                left: self.shape(),
                right: other.shape(),
            });
        }

        let mut res = Matrix {
            rows: self.rows,
            columns: other.columns,
            data: vec![0.0; self.rows * other.columns],
        };

        for i in 0..res.rows {
            for j in 0..res.columns {
                let mut sum = 0.0;

                for k in 0..self.columns {
                    sum += self.data[i * self.columns + k] * other.data[k * other.columns + j];
                }

                res.data[i * res.columns + j] = sum;
            }
        }

        Ok(res)
    }

    pub fn scale(&self, scalar: f64) -> Matrix {
        self.map(|x| x * scalar)
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            columns: self.columns,
            data: self.data.iter().map(|&x| functor(x)).collect(),
        }
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix {
            rows: self.columns,
            columns: self.rows,
            data: vec![0.0; self.data.len()],
        };

        for i in 0..self.rows {
            for j in 0..self.columns {
                res.data[j * res.columns + i] = self.data[i * self.columns + j];
            }
        }

        res
    }

    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    // ── Serialization ─────────────────────────────────────────────────────

    /// Exact number of bytes [`Matrix::to_bytes`] produces.
    pub fn byte_len(&self) -> usize {
        HEADER_BYTES + self.data.len() * std::mem::size_of::<f64>()
    }

    /// Big-endian `rows:i32, columns:i32` followed by the cells row-major.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.byte_len());
        self.write_to(&mut out);
        out
    }

    /// Appends the serialized form to `buf`.
    ///
    /// # Panics
    /// Panics if `buf` cannot grow to hold [`Matrix::byte_len`] more bytes;
    /// use [`Matrix::put_bytes`] for fixed-size destinations.
    pub fn write_to<B: BufMut>(&self, buf: &mut B) {
        buf.put_i32(self.rows as i32);
        buf.put_i32(self.columns as i32);
        for &value in &self.data {
            buf.put_f64(value);
        }
    }

    /// Serializes into the front of `dst`, returning the number of bytes written.
    pub fn put_bytes(&self, dst: &mut [u8]) -> Result<usize> {
        let needed = self.byte_len();
        if dst.len() < needed {
            return Err(NetError::BufferTooSmall {
                needed,
                available: dst.len(),
            });
        }
        let mut cursor = &mut dst[..needed];
        self.write_to(&mut cursor);
        Ok(needed)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Matrix> {
        let mut buf = bytes;
        Matrix::read_from(&mut buf)
    }

    /// Reads one matrix from the front of `buf`, advancing past it.
    ///
    /// The header and the full payload length are validated before any cell
    /// is read, so a truncated buffer never yields a partial matrix.
    pub fn read_from<B: Buf>(buf: &mut B) -> Result<Matrix> {
        if buf.remaining() < HEADER_BYTES {
            return Err(NetError::MalformedData(format!(
                "matrix header needs {} bytes, {} remain",
                HEADER_BYTES,
                buf.remaining()
            )));
        }

        let rows = buf.get_i32();
        let columns = buf.get_i32();
        if rows < 1 || columns < 1 {
            return Err(NetError::MalformedData(format!(
                "matrix header declares non-positive shape {}x{}",
                rows, columns
            )));
        }

        let (rows, columns) = (rows as usize, columns as usize);
        let payload = rows
            .checked_mul(columns)
            .and_then(|n| n.checked_mul(std::mem::size_of::<f64>()))
            .ok_or_else(|| NetError::MalformedData(format!("matrix shape {}x{} overflows", rows, columns)))?;

        if buf.remaining() < payload {
            return Err(NetError::MalformedData(format!(
                "matrix {}x{} needs {} payload bytes, {} remain",
                rows,
                columns,
                payload,
                buf.remaining()
            )));
        }

        let data = (0..rows * columns).map(|_| buf.get_f64()).collect();
        Ok(Matrix { rows, columns, data })
    }

    fn zip_with<F>(&self, other: &Matrix, op: &'static str, f: F) -> Result<Matrix>
    where
        F: Fn(f64, f64) -> f64,
    {
        if self.shape() != other.shape() {
            return Err(NetError::ShapeMismatch {
                op,
                left: self.shape(),
                right: other.shape(),
            });
        }

        Ok(Matrix {
            rows: self.rows,
            columns: self.columns,
            data: self.data.iter().zip(&other.data).map(|(&a, &b)| f(a, b)).collect(),
        })
    }
}

fn check_shape(rows: usize, columns: usize) -> Result<()> {
    if rows < 1 || columns < 1 {
        return Err(NetError::InvalidShape { rows, columns });
    }
    Ok(())
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, column): (usize, usize)) -> &f64 {
        assert!(
            row < self.rows && column < self.columns,
            "index ({}, {}) out of bounds for {}x{} matrix",
            row,
            column,
            self.rows,
            self.columns
        );
        &self.data[row * self.columns + column]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.data.chunks(self.columns) {
            let cells: Vec<String> = row.iter().map(|x| x.to_string()).collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}
