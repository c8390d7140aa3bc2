use super::*;
use proptest::prelude::*;

fn sample_matrix() -> CsrMatrix {
    CsrMatrix::from_triplets(
        3,
        5,
        &[
            (0, 0, 1.5),
            (0, 4, -2.25),
            (1, 2, 0.001),
            (2, 0, 1e-30),
            (2, 3, 42.0),
        ],
    )
    .expect("valid triplets")
}

#[test]
fn test_roundtrip_exact() {
    let matrix = sample_matrix();
    let restored = from_bytes(&to_bytes(&matrix)).expect("roundtrip");
    assert_eq!(restored, matrix);
}

#[test]
fn test_roundtrip_empty_matrix() {
    let matrix = CsrMatrix::zeros(4, 7);
    let restored = from_bytes(&to_bytes(&matrix)).expect("roundtrip");
    assert_eq!(restored, matrix);
    assert_eq!(restored.shape(), (4, 7));
}

#[test]
fn test_file_roundtrip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("features.rcm");
    let matrix = sample_matrix();
    save_matrix(&path, &matrix).expect("save");
    let restored = load_matrix(&path).expect("load");
    assert_eq!(restored, matrix);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let err = load_matrix("/nonexistent/features.rcm").expect_err("missing file");
    assert!(matches!(err, RecomendarError::Io(_)));
}

#[test]
fn test_bad_magic() {
    let mut bytes = to_bytes(&sample_matrix());
    bytes[0] = b'X';
    let err = from_bytes(&bytes).expect_err("bad magic");
    assert!(matches!(err, RecomendarError::FormatError { .. }));
}

#[test]
fn test_unsupported_version() {
    let mut bytes = to_bytes(&sample_matrix());
    bytes[4] = 9;
    let err = from_bytes(&bytes).expect_err("future version");
    assert!(matches!(err, RecomendarError::UnsupportedVersion { .. }));
}

#[test]
fn test_corrupted_byte_fails_checksum() {
    let mut bytes = to_bytes(&sample_matrix());
    let mid = bytes.len() / 2;
    bytes[mid] ^= 0xFF;
    let err = from_bytes(&bytes).expect_err("corruption");
    assert!(matches!(err, RecomendarError::ChecksumMismatch { .. }));
}

#[test]
fn test_truncated_file() {
    let bytes = to_bytes(&sample_matrix());
    let err = from_bytes(&bytes[..10]).expect_err("truncated");
    assert!(matches!(err, RecomendarError::FormatError { .. }));
}

#[test]
fn test_crc32_known_vector() {
    // CRC32 of "123456789" is 0xCBF43926 for the IEEE polynomial.
    assert_eq!(crc32(b"123456789"), 0xCBF4_3926);
}

proptest! {
    #[test]
    fn prop_roundtrip_is_identity(
        rows in 1usize..12,
        cols in 1usize..12,
        entries in prop::collection::vec((0usize..12, 0usize..12, -100.0f32..100.0), 0..40),
    ) {
        let triplets: Vec<(usize, usize, f32)> = entries
            .into_iter()
            .map(|(r, c, v)| (r % rows, c % cols, v))
            .collect();
        let matrix = CsrMatrix::from_triplets(rows, cols, &triplets).expect("in-bounds triplets");
        let restored = from_bytes(&to_bytes(&matrix)).expect("roundtrip");
        prop_assert_eq!(restored, matrix);
    }
}
