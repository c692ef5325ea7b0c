use super::*;
use image::Rgb;

#[test]
fn test_resizes_to_model_input() {
    let img = RgbImage::from_pixel(64, 40, Rgb([10, 20, 30]));
    let tensor = normalize_rgb(&img, IMAGE_SIZE);
    assert_eq!((tensor.width(), tensor.height()), IMAGE_SIZE);
    assert_eq!(tensor.data().len(), 180 * 180 * CHANNELS);
    tensor.check_contract(IMAGE_SIZE).unwrap();
}

#[test]
fn test_scales_channels_to_unit_range() {
    let img = RgbImage::from_pixel(4, 4, Rgb([0, 255, 51]));
    let tensor = normalize_rgb(&img, (4, 4));
    assert_eq!(&tensor.data()[..3], &[0.0, 1.0, 0.2]);
    assert!(tensor.data().iter().all(|v| (0.0..=1.0).contains(v)));
}

#[test]
fn test_contract_rejects_wrong_shape() {
    let tensor = normalize_rgb(&RgbImage::new(8, 8), (8, 8));
    assert!(matches!(
        tensor.check_contract(IMAGE_SIZE),
        Err(InputError::InvalidInput(_))
    ));
}

#[test]
fn test_contract_rejects_out_of_range_values() {
    let mut tensor = normalize_rgb(&RgbImage::new(2, 2), (2, 2));
    tensor.data[5] = 1.5;
    assert!(matches!(
        tensor.check_contract((2, 2)),
        Err(InputError::InvalidInput(_))
    ));
}

#[test]
fn test_normalize_image_from_png() {
    let path = std::env::temp_dir().join(format!(
        "kira_cogrisk_normalizer_{}.png",
        std::process::id()
    ));
    RgbImage::from_pixel(200, 150, Rgb([128, 128, 128]))
        .save(&path)
        .unwrap();
    let tensor = normalize_image(&path, IMAGE_SIZE).unwrap();
    tensor.check_contract(IMAGE_SIZE).unwrap();
    let expected = 128.0 / 255.0;
    assert!(tensor.data().iter().all(|v| (v - expected).abs() < 1e-3));
}

#[test]
fn test_undecodable_file_is_decode_error() {
    let path = std::env::temp_dir().join(format!(
        "kira_cogrisk_not_an_image_{}.png",
        std::process::id()
    ));
    std::fs::write(&path, b"definitely not a png").unwrap();
    assert!(matches!(
        normalize_image(&path, IMAGE_SIZE),
        Err(InputError::Decode { .. })
    ));
}
