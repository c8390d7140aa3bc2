use super::*;

#[test]
fn test_zeros_shape() {
    let m = CsrMatrix::zeros(3, 4);
    assert_eq!(m.shape(), (3, 4));
    assert_eq!(m.nnz(), 0);
    assert_eq!(m.get(2, 3), 0.0);
}

#[test]
fn test_from_triplets_basic() {
    let m = CsrMatrix::from_triplets(2, 3, &[(0, 1, 2.0), (1, 0, 3.0), (1, 2, 4.0)])
        .expect("valid triplets");
    assert_eq!(m.shape(), (2, 3));
    assert_eq!(m.nnz(), 3);
    assert_eq!(m.get(0, 1), 2.0);
    assert_eq!(m.get(1, 0), 3.0);
    assert_eq!(m.get(1, 2), 4.0);
    assert_eq!(m.get(0, 0), 0.0);
}

#[test]
fn test_from_triplets_unsorted_input() {
    let m = CsrMatrix::from_triplets(2, 2, &[(1, 1, 4.0), (0, 0, 1.0), (1, 0, 3.0)])
        .expect("valid triplets");
    let (indices, values) = m.row(1);
    assert_eq!(indices, &[0, 1]);
    assert_eq!(values, &[3.0, 4.0]);
}

#[test]
fn test_from_triplets_sums_duplicates() {
    let m = CsrMatrix::from_triplets(1, 2, &[(0, 0, 1.5), (0, 0, 2.5)]).expect("valid triplets");
    assert_eq!(m.nnz(), 1);
    assert_eq!(m.get(0, 0), 4.0);
}

#[test]
fn test_from_triplets_drops_zeros() {
    let m = CsrMatrix::from_triplets(1, 2, &[(0, 0, 0.0), (0, 1, 1.0)]).expect("valid triplets");
    assert_eq!(m.nnz(), 1);
}

#[test]
fn test_from_triplets_out_of_bounds() {
    assert!(CsrMatrix::from_triplets(2, 2, &[(2, 0, 1.0)]).is_err());
    assert!(CsrMatrix::from_triplets(2, 2, &[(0, 2, 1.0)]).is_err());
}

#[test]
fn test_from_dense_rows() {
    let m = CsrMatrix::from_dense_rows(&[vec![1.0, 0.0, 2.0], vec![0.0, 0.0, 0.0]])
        .expect("equal-length rows");
    assert_eq!(m.shape(), (2, 3));
    assert_eq!(m.nnz(), 2);
    assert_eq!(m.to_dense_row(0), vec![1.0, 0.0, 2.0]);
    assert_eq!(m.to_dense_row(1), vec![0.0, 0.0, 0.0]);
}

#[test]
fn test_from_dense_rows_ragged() {
    assert!(CsrMatrix::from_dense_rows(&[vec![1.0], vec![1.0, 2.0]]).is_err());
}

#[test]
fn test_from_dense_columns() {
    let m = CsrMatrix::from_dense_columns(&[vec![1.0, 0.0], vec![0.0, 2.0]])
        .expect("equal-length columns");
    assert_eq!(m.shape(), (2, 2));
    assert_eq!(m.get(0, 0), 1.0);
    assert_eq!(m.get(1, 1), 2.0);
    assert_eq!(m.nnz(), 2);
}

#[test]
fn test_from_dense_columns_empty() {
    assert!(CsrMatrix::from_dense_columns(&[]).is_err());
}

#[test]
fn test_hstack_layout() {
    let a = CsrMatrix::from_dense_rows(&[vec![1.0, 0.0], vec![0.0, 2.0]]).expect("valid rows");
    let b = CsrMatrix::from_dense_rows(&[vec![3.0], vec![0.0]]).expect("valid rows");
    let m = CsrMatrix::hstack(&[&a, &b]).expect("matching row counts");
    assert_eq!(m.shape(), (2, 3));
    assert_eq!(m.to_dense_row(0), vec![1.0, 0.0, 3.0]);
    assert_eq!(m.to_dense_row(1), vec![0.0, 2.0, 0.0]);
}

#[test]
fn test_hstack_row_mismatch() {
    let a = CsrMatrix::zeros(2, 1);
    let b = CsrMatrix::zeros(3, 1);
    assert!(CsrMatrix::hstack(&[&a, &b]).is_err());
}

#[test]
fn test_hstack_empty() {
    assert!(CsrMatrix::hstack(&[]).is_err());
}

#[test]
fn test_from_raw_parts_roundtrip() {
    let m = CsrMatrix::from_triplets(2, 3, &[(0, 2, 1.0), (1, 0, 2.0)]).expect("valid triplets");
    let (indptr, indices, values) = m.raw_parts();
    let rebuilt = CsrMatrix::from_raw_parts(
        2,
        3,
        indptr.to_vec(),
        indices.to_vec(),
        values.to_vec(),
    )
    .expect("consistent parts");
    assert_eq!(rebuilt, m);
}

#[test]
fn test_from_raw_parts_rejects_bad_indptr() {
    assert!(CsrMatrix::from_raw_parts(2, 2, vec![0, 1], vec![0], vec![1.0]).is_err());
    assert!(CsrMatrix::from_raw_parts(2, 2, vec![0, 2, 1], vec![0, 1], vec![1.0, 2.0]).is_err());
}

#[test]
fn test_from_raw_parts_rejects_bad_indices() {
    assert!(CsrMatrix::from_raw_parts(1, 2, vec![0, 1], vec![5], vec![1.0]).is_err());
    // descending within a row
    assert!(CsrMatrix::from_raw_parts(1, 3, vec![0, 2], vec![2, 0], vec![1.0, 2.0]).is_err());
}

#[test]
fn test_equality_is_pattern_and_values() {
    let a = CsrMatrix::from_triplets(1, 3, &[(0, 1, 2.0)]).expect("valid triplets");
    let b = CsrMatrix::from_triplets(1, 3, &[(0, 1, 2.0)]).expect("valid triplets");
    let c = CsrMatrix::from_triplets(1, 3, &[(0, 2, 2.0)]).expect("valid triplets");
    assert_eq!(a, b);
    assert_ne!(a, c);
}
