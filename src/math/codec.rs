use crate::error::{NetError, Result};
use crate::math::matrix::Matrix;

/// Size of the `rows`/`cols` header in bytes.
const HEADER_LEN: usize = 16;

impl Matrix {
    /// Compact binary form: `rows` and `cols` as little-endian `u64`,
    /// followed by every value as little-endian `f64` in row-major order.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(HEADER_LEN + self.len() * 8);
        buf.extend_from_slice(&(self.rows() as u64).to_le_bytes());
        buf.extend_from_slice(&(self.cols() as u64).to_le_bytes());
        for value in self.as_slice() {
            buf.extend_from_slice(&value.to_le_bytes());
        }
        buf
    }

    /// Decodes bytes written by [`Matrix::to_bytes`]. The payload length must
    /// match the header exactly.
    pub fn from_bytes(bytes: &[u8]) -> Result<Matrix> {
        if bytes.len() < HEADER_LEN {
            return Err(NetError::Decode(format!(
                "matrix header needs {HEADER_LEN} bytes, got {}",
                bytes.len()
            )));
        }
        let (header, payload) = bytes.split_at(HEADER_LEN);
        let rows = read_u64(&header[..8])?;
        let cols = read_u64(&header[8..])?;

        let expected = rows
            .checked_mul(cols)
            .and_then(|n| n.checked_mul(8))
            .ok_or_else(|| NetError::Decode(format!("matrix shape {rows}x{cols} overflows")))?;
        if payload.len() != expected {
            return Err(NetError::Decode(format!(
                "matrix {rows}x{cols} needs {expected} payload bytes, got {}",
                payload.len()
            )));
        }

        let data = payload
            .chunks_exact(8)
            .map(|chunk| {
                let mut raw = [0u8; 8];
                raw.copy_from_slice(chunk);
                f64::from_le_bytes(raw)
            })
            .collect();
        Matrix::new(rows, cols, data)
    }
}

fn read_u64(bytes: &[u8]) -> Result<usize> {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(bytes);
    usize::try_from(u64::from_le_bytes(raw))
        .map_err(|_| NetError::Decode("matrix dimension does not fit in usize".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_header_then_row_major_values() {
        let m = Matrix::new(1, 2, vec![1.5, -2.0]).unwrap();
        let bytes = m.to_bytes();
        assert_eq!(bytes.len(), 16 + 2 * 8);
        assert_eq!(&bytes[..8], &1u64.to_le_bytes());
        assert_eq!(&bytes[8..16], &2u64.to_le_bytes());
        assert_eq!(&bytes[16..24], &1.5f64.to_le_bytes());
        assert_eq!(&bytes[24..], &(-2.0f64).to_le_bytes());
    }

    #[test]
    fn decodes_what_it_encodes() {
        let m = Matrix::new(2, 3, vec![0.1, 0.2, 0.3, -0.4, f64::MIN_POSITIVE, 1e300]).unwrap();
        assert_eq!(Matrix::from_bytes(&m.to_bytes()).unwrap(), m);
    }

    #[test]
    fn rejects_truncated_header() {
        assert!(matches!(Matrix::from_bytes(&[0u8; 10]), Err(NetError::Decode(_))));
    }

    #[test]
    fn rejects_payload_length_disagreeing_with_shape() {
        let mut bytes = Matrix::filled(2, 2, 1.0).to_bytes();
        bytes.pop();
        assert!(matches!(Matrix::from_bytes(&bytes), Err(NetError::Decode(_))));

        let mut bytes = Matrix::filled(2, 2, 1.0).to_bytes();
        bytes.extend_from_slice(&[0u8; 8]);
        assert!(matches!(Matrix::from_bytes(&bytes), Err(NetError::Decode(_))));
    }

    #[test]
    fn rejects_overflowing_shape() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&u64::MAX.to_le_bytes());
        bytes.extend_from_slice(&u64::MAX.to_le_bytes());
        assert!(matches!(Matrix::from_bytes(&bytes), Err(NetError::Decode(_))));
    }
}
