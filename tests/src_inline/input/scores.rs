use super::*;
use crate::model::classes::ClassLabel;

#[test]
fn test_parse_with_default_class_orders() {
    let table = parse_score_table(
        r#"{
            "scans": {
                "a.png": { "screening": [0.1, 0.8, 0.1], "refinement": [0.05, 0.9, 0.05] }
            }
        }"#,
    )
    .unwrap();
    assert_eq!(table.screening_order, ClassOrder::standard());
    assert_eq!(table.refinement_order, ClassOrder::standard());
    assert_eq!(table.scans["a.png"].screening, vec![0.1, 0.8, 0.1]);
}

#[test]
fn test_parse_custom_class_orders() {
    let table = parse_score_table(
        r#"{
            "screening_classes": ["CN", "MCI", "AD"],
            "refinement_classes": ["AD", "CN"],
            "scans": {}
        }"#,
    )
    .unwrap();
    assert_eq!(table.screening_order.labels()[2], ClassLabel::Ad);
    assert_eq!(table.refinement_order.len(), 2);
    assert!(table.scans.is_empty());
}

#[test]
fn test_unknown_class_rejected() {
    let err = parse_score_table(r#"{ "screening_classes": ["AD", "XX", "MCI"], "scans": {} }"#)
        .unwrap_err();
    assert!(matches!(err, InputError::InvalidInput(msg) if msg.contains("screening_classes")));
}

#[test]
fn test_malformed_json_is_parse_error() {
    assert!(matches!(
        parse_score_table(r#"{ "scans": { "a.png": { "screening": [0.1] } } }"#),
        Err(InputError::Parse(_))
    ));
}
