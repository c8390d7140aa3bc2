use super::*;

#[test]
fn test_shape_and_vocabulary() {
    let docs = vec!["rock metal", "rock pop", "jazz"];
    let mut v = TfidfVectorizer::new();
    let m = v.fit_transform(&docs).expect("fit_transform");
    assert_eq!(m.n_rows(), 3);
    assert_eq!(m.n_cols(), 4);
    assert_eq!(v.vocabulary_size(), 4);
}

#[test]
fn test_max_features_caps_vocabulary() {
    let docs = vec!["rock rock rock metal metal jazz pop funk"];
    let mut v = TfidfVectorizer::new().with_max_features(2);
    let m = v.fit_transform(&docs).expect("fit_transform");
    // "rock" (3) and "metal" (2) survive the cap.
    assert_eq!(v.vocabulary_size(), 2);
    assert_eq!(m.n_cols(), 2);
}

#[test]
fn test_frequency_rank_layout_alphabetical_ties() {
    let docs = vec!["rock rock zeta alpha"];
    let mut v = TfidfVectorizer::new();
    let m = v.fit_transform(&docs).expect("fit_transform");
    // rock is rank 0; alpha and zeta tie on frequency, alphabetical order.
    let row = m.to_dense_row(0);
    assert!(row[0] > row[1] - 1e-6);
    assert_eq!(m.n_cols(), 3);
    // Column 1 is "alpha", column 2 is "zeta": same count, same idf, same value.
    assert!((row[1] - row[2]).abs() < 1e-6);
}

#[test]
fn test_rows_are_l2_normalized() {
    let docs = vec!["heavy metal rock", "soft rock"];
    let mut v = TfidfVectorizer::new();
    let m = v.fit_transform(&docs).expect("fit_transform");
    for row in 0..m.n_rows() {
        let (_, values) = m.row(row);
        let norm: f64 = values.iter().map(|&x| f64::from(x) * f64::from(x)).sum();
        assert!((norm.sqrt() - 1.0).abs() < 1e-6, "row {row} norm {norm}");
    }
}

#[test]
fn test_unknown_terms_ignored_at_transform() {
    let mut v = TfidfVectorizer::new();
    v.fit(&["rock metal"]).expect("fit");
    let m = v.transform(&["rock techno"]).expect("transform");
    let row = m.to_dense_row(0);
    // Only "rock" is known; after L2 normalization its weight is 1.
    assert!((row.iter().map(|x| x * x).sum::<f32>() - 1.0).abs() < 1e-6);
}

#[test]
fn test_empty_document_is_zero_row() {
    let mut v = TfidfVectorizer::new();
    let m = v.fit_transform(&["rock", ""]).expect("fit_transform");
    let (indices, _) = m.row(1);
    assert!(indices.is_empty());
}

#[test]
fn test_all_empty_documents_zero_width() {
    let mut v = TfidfVectorizer::new();
    let m = v.fit_transform(&["", ""]).expect("fit_transform");
    assert_eq!(m.shape(), (2, 0));
}

#[test]
fn test_not_fitted() {
    let v = TfidfVectorizer::new();
    assert!(v.transform(&["rock"]).is_err());
}

#[test]
fn test_empty_corpus_is_error() {
    let mut v = TfidfVectorizer::new();
    let docs: Vec<&str> = Vec::new();
    assert!(v.fit(&docs).is_err());
}

#[test]
fn test_deterministic_refit() {
    let docs = vec!["rock metal pop", "pop jazz", "metal metal rock"];
    let mut a = TfidfVectorizer::new().with_max_features(85);
    let mut b = TfidfVectorizer::new().with_max_features(85);
    let ma = a.fit_transform(&docs).expect("fit_transform");
    let mb = b.fit_transform(&docs).expect("fit_transform");
    assert_eq!(ma, mb);
}
