use super::*;

#[test]
fn test_label_parsing() {
    assert_eq!("AD".parse::<ClassLabel>().unwrap(), ClassLabel::Ad);
    assert_eq!(" mci ".parse::<ClassLabel>().unwrap(), ClassLabel::Mci);
    assert_eq!(
        "NC".parse::<ClassLabel>(),
        Err(ShapeError::UnknownClass("NC".to_string()))
    );
}

#[test]
fn test_unknown_label_reported_as_written() {
    let err = " foo ".parse::<ClassLabel>().unwrap_err();
    assert_eq!(err, ShapeError::UnknownClass("foo".to_string()));
    assert_eq!(err.to_string(), "unknown class label: foo");
}

#[test]
fn test_standard_order() {
    let order = ClassOrder::standard();
    assert_eq!(
        order.labels(),
        &[ClassLabel::Ad, ClassLabel::Cn, ClassLabel::Mci]
    );
    assert_eq!(order.to_string(), "AD,CN,MCI");
    assert_eq!(ClassOrder::parse(&["AD", "CN", "MCI"]).unwrap(), order);
}

#[test]
fn test_order_rejects_duplicates_and_empty() {
    assert_eq!(
        ClassOrder::parse(&["AD", "AD"]),
        Err(ShapeError::DuplicateClass(ClassLabel::Ad))
    );
    assert_eq!(
        ClassOrder::parse::<&str>(&[]),
        Err(ShapeError::EmptyOrder)
    );
}

#[test]
fn test_length_mismatch() {
    let order = ClassOrder::standard();
    assert_eq!(
        ClassProbabilities::from_ordered(&order, &[0.5, 0.5]),
        Err(ShapeError::LengthMismatch {
            expected: 3,
            actual: 2
        })
    );
}

#[test]
fn test_screening_requires_all_three_classes() {
    let order = ClassOrder::parse(&["AD", "CN"]).unwrap();
    assert_eq!(
        ScreeningVector::from_ordered(&order, &[0.4, 0.6]),
        Err(ShapeError::MissingClass {
            role: "screening",
            missing: ClassLabel::Mci
        })
    );
}

#[test]
fn test_refinement_requires_ad_only() {
    let order = ClassOrder::parse(&["AD", "CN"]).unwrap();
    let v = RefinementVector::from_ordered(&order, &[0.3, 0.7]).unwrap();
    assert_eq!(v.ad(), 0.3);

    let no_ad = ClassOrder::parse(&["CN", "MCI"]).unwrap();
    assert_eq!(
        RefinementVector::from_ordered(&no_ad, &[0.3, 0.7]),
        Err(ShapeError::MissingClass {
            role: "refinement",
            missing: ClassLabel::Ad
        })
    );
}

#[test]
fn test_reordered_output_is_read_by_label() {
    let order = ClassOrder::parse(&["CN", "MCI", "AD"]).unwrap();
    let v = ScreeningVector::from_ordered(&order, &[0.6, 0.3, 0.1]).unwrap();
    assert_eq!(v.cn(), 0.6);
    assert_eq!(v.mci(), 0.3);
    assert_eq!(v.ad(), 0.1);
}

#[test]
fn test_probability_sum() {
    let v = ScreeningVector::from_ordered(&ClassOrder::standard(), &[0.25, 0.25, 0.5]).unwrap();
    assert_eq!(v.probabilities().sum(), 1.0);
}
