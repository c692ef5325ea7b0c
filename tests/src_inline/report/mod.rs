use super::*;

#[test]
fn test_fraction() {
    assert_eq!(fraction(1, 4), 0.25);
    assert_eq!(fraction(0, 0), 0.0);
}

#[test]
fn test_format_f32_6() {
    assert_eq!(format_f32_6(0.18), "0.180000");
}
