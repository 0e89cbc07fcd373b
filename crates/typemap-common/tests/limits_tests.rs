use super::*;

#[test]
fn test_sample_limit_matches_documented_bound() {
    assert_eq!(DEFAULT_SAMPLE_LIMIT, 10);
}

#[test]
fn test_depth_limits() {
    assert_eq!(MAX_RELATION_DEPTH, 100);
    assert_eq!(MAX_VALIDATION_DEPTH, 100);
}
