//! Sparse-matrix file format.
//!
//! A compact binary encoding of a [`CsrMatrix`] that round-trips bit-exactly:
//! shape, sparsity pattern and values are preserved with no compression-
//! induced loss, and a trailing checksum rejects corrupt files.
//!
//! Format (RCM1):
//! ```text
//! [4-byte magic: "RCM1"]
//! [4-byte version: u32 little-endian]
//! [8-byte rows: u64 little-endian]
//! [8-byte cols: u64 little-endian]
//! [8-byte nnz:  u64 little-endian]
//! [indptr:  (rows + 1) x u64 little-endian]
//! [indices: nnz x u64 little-endian]
//! [values:  nnz x f32 little-endian]
//! [4-byte CRC32 (IEEE): checksum of all preceding bytes]
//! ```

use std::fs;
use std::path::Path;

use crate::error::{RecomendarError, Result};
use crate::primitives::CsrMatrix;

/// Magic bytes for the sparse matrix format.
pub const RCM_MAGIC: [u8; 4] = [b'R', b'C', b'M', b'1'];

/// Current format version.
pub const RCM_VERSION: u32 = 1;

/// Serializes a matrix to bytes.
#[must_use]
pub fn to_bytes(matrix: &CsrMatrix) -> Vec<u8> {
    let (rows, cols) = matrix.shape();
    let (indptr, indices, values) = matrix.raw_parts();

    let mut out = Vec::with_capacity(32 + 8 * (indptr.len() + indices.len()) + 4 * values.len());
    out.extend_from_slice(&RCM_MAGIC);
    out.extend_from_slice(&RCM_VERSION.to_le_bytes());
    out.extend_from_slice(&(rows as u64).to_le_bytes());
    out.extend_from_slice(&(cols as u64).to_le_bytes());
    out.extend_from_slice(&(matrix.nnz() as u64).to_le_bytes());
    for &p in indptr {
        out.extend_from_slice(&(p as u64).to_le_bytes());
    }
    for &c in indices {
        out.extend_from_slice(&(c as u64).to_le_bytes());
    }
    for &v in values {
        out.extend_from_slice(&v.to_le_bytes());
    }

    let crc = crc32(&out);
    out.extend_from_slice(&crc.to_le_bytes());
    out
}

/// Deserializes a matrix from bytes.
///
/// # Errors
///
/// Returns `FormatError` on truncation, bad magic or inconsistent CSR
/// structure, `UnsupportedVersion` on a version this reader does not know,
/// `ChecksumMismatch` on corruption.
pub fn from_bytes(data: &[u8]) -> Result<CsrMatrix> {
    // Fixed header plus trailing checksum.
    if data.len() < 36 {
        return Err(RecomendarError::FormatError {
            message: format!("file too short: {} bytes", data.len()),
        });
    }

    if data[0..4] != RCM_MAGIC {
        return Err(RecomendarError::FormatError {
            message: format!("bad magic: {:?}", &data[0..4]),
        });
    }

    let version = u32::from_le_bytes(data[4..8].try_into().expect("4-byte slice"));
    if version != RCM_VERSION {
        return Err(RecomendarError::UnsupportedVersion {
            found: version,
            supported: RCM_VERSION,
        });
    }

    let (payload, trailer) = data.split_at(data.len() - 4);
    let stored_crc = u32::from_le_bytes(trailer.try_into().expect("4-byte slice"));
    let actual_crc = crc32(payload);
    if stored_crc != actual_crc {
        return Err(RecomendarError::ChecksumMismatch {
            expected: stored_crc,
            actual: actual_crc,
        });
    }

    let mut cursor = Cursor {
        data: payload,
        pos: 8,
    };
    let rows = cursor.read_u64_as_usize("rows")?;
    let cols = cursor.read_u64_as_usize("cols")?;
    let nnz = cursor.read_u64_as_usize("nnz")?;

    let mut indptr = Vec::with_capacity(rows + 1);
    for _ in 0..=rows {
        indptr.push(cursor.read_u64_as_usize("indptr")?);
    }
    let mut indices = Vec::with_capacity(nnz);
    for _ in 0..nnz {
        indices.push(cursor.read_u64_as_usize("indices")?);
    }
    let mut values = Vec::with_capacity(nnz);
    for _ in 0..nnz {
        values.push(cursor.read_f32("values")?);
    }

    if cursor.pos != payload.len() {
        return Err(RecomendarError::FormatError {
            message: format!(
                "{} trailing bytes after values section",
                payload.len() - cursor.pos
            ),
        });
    }

    CsrMatrix::from_raw_parts(rows, cols, indptr, indices, values).map_err(|e| {
        RecomendarError::FormatError {
            message: e.to_string(),
        }
    })
}

/// Writes a matrix to a file.
///
/// # Errors
///
/// Returns `Io` if the path is unwritable.
pub fn save_matrix<P: AsRef<Path>>(path: P, matrix: &CsrMatrix) -> Result<()> {
    fs::write(path, to_bytes(matrix))?;
    Ok(())
}

/// Reads a matrix from a file.
///
/// # Errors
///
/// Returns `Io` if the file is unreadable, otherwise the conditions of
/// [`from_bytes`].
pub fn load_matrix<P: AsRef<Path>>(path: P) -> Result<CsrMatrix> {
    let data = fs::read(path)?;
    from_bytes(&data)
}

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl Cursor<'_> {
    fn take(&mut self, n: usize, section: &str) -> Result<&[u8]> {
        if self.pos + n > self.data.len() {
            return Err(RecomendarError::FormatError {
                message: format!("truncated {section} section"),
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn read_u64_as_usize(&mut self, section: &str) -> Result<usize> {
        let raw = u64::from_le_bytes(self.take(8, section)?.try_into().expect("8-byte slice"));
        usize::try_from(raw).map_err(|_| RecomendarError::FormatError {
            message: format!("{section} value {raw} exceeds platform usize"),
        })
    }

    fn read_f32(&mut self, section: &str) -> Result<f32> {
        Ok(f32::from_le_bytes(
            self.take(4, section)?.try_into().expect("4-byte slice"),
        ))
    }
}

/// CRC32 (IEEE polynomial), table generated at compile time.
fn crc32(data: &[u8]) -> u32 {
    let mut crc: u32 = 0xFFFF_FFFF;
    for &byte in data {
        let idx = ((crc ^ u32::from(byte)) & 0xFF) as usize;
        crc = CRC32_TABLE[idx] ^ (crc >> 8);
    }
    !crc
}

const CRC32_TABLE: [u32; 256] = build_crc32_table();

const fn build_crc32_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u32;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 1 == 1 {
                (crc >> 1) ^ 0xEDB8_8320
            } else {
                crc >> 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
