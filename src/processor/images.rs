use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageResult};
use std::io::Cursor;

use crate::error::{AppError, AppResult};

/// EXIF orientation tag, 1 when absent or unreadable.
fn read_orientation(bytes: &[u8]) -> u32 {
    exif::Reader::new()
        .read_from_container(&mut Cursor::new(bytes))
        .ok()
        .and_then(|data| {
            data.get_field(exif::Tag::Orientation, exif::In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .unwrap_or(1)
}

fn apply_orientation(img: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => img.fliph(),
        3 => img.rotate180(),
        4 => img.flipv(),
        5 => img.rotate90().fliph(),
        6 => img.rotate90(),
        7 => img.rotate270().fliph(),
        8 => img.rotate270(),
        _ => img,
    }
}

/// Decode, upright, bound the longest edge to `max_dimension` (0 disables) and
/// re-encode as JPEG.
pub fn normalize_photo(bytes: &[u8], max_dimension: u32, quality: u8) -> ImageResult<Vec<u8>> {
    let img = image::load_from_memory(bytes)?;
    let img = apply_orientation(img, read_orientation(bytes));

    let img = if max_dimension > 0 && img.width().max(img.height()) > max_dimension {
        img.resize(max_dimension, max_dimension, FilterType::Lanczos3)
    } else {
        img
    };

    let mut out = Vec::new();
    DynamicImage::ImageRgb8(img.to_rgb8())
        .write_with_encoder(JpegEncoder::new_with_quality(&mut out, quality))?;
    Ok(out)
}

pub async fn normalize_photo_blocking(
    bytes: Vec<u8>,
    max_dimension: u32,
    quality: u8,
) -> AppResult<Vec<u8>> {
    let result = tokio::task::spawn_blocking(move || normalize_photo(&bytes, max_dimension, quality))
        .await
        .map_err(|e| AppError::Internal(format!("Image task failed: {}", e)))?;

    Ok(result?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::png_bytes;
    use image::{GenericImageView, ImageFormat};

    #[test]
    fn test_normalize_converts_to_jpeg() {
        let out = normalize_photo(&png_bytes(40, 30), 2048, 85).unwrap();

        assert_eq!(image::guess_format(&out).unwrap(), ImageFormat::Jpeg);
        let decoded = image::load_from_memory(&out).unwrap();
        assert_eq!(decoded.dimensions(), (40, 30));
    }

    #[test]
    fn test_normalize_bounds_longest_edge() {
        let out = normalize_photo(&png_bytes(300, 150), 100, 85).unwrap();

        let decoded = image::load_from_memory(&out).unwrap();
        assert_eq!(decoded.dimensions(), (100, 50));
    }

    #[test]
    fn test_normalize_rejects_non_images() {
        assert!(normalize_photo(b"definitely not an image", 2048, 85).is_err());
    }

    #[test]
    fn test_orientation_defaults_to_upright_without_exif() {
        assert_eq!(read_orientation(&png_bytes(4, 4)), 1);
    }

    #[test]
    fn test_apply_orientation_rotates_quarter_turns() {
        let img = DynamicImage::new_rgb8(4, 2);

        assert_eq!(apply_orientation(img.clone(), 6).dimensions(), (2, 4));
        assert_eq!(apply_orientation(img.clone(), 8).dimensions(), (2, 4));
        assert_eq!(apply_orientation(img.clone(), 3).dimensions(), (4, 2));
        assert_eq!(apply_orientation(img, 1).dimensions(), (4, 2));
    }

    #[tokio::test]
    async fn test_blocking_wrapper_maps_decode_errors() {
        let result = normalize_photo_blocking(b"junk".to_vec(), 2048, 85).await;
        assert!(matches!(result, Err(AppError::Image(_))));
    }
}
