//! Decoding captcha payloads and cropping them into grid cells.

use image::{imageops, DynamicImage, GenericImageView};

use crate::partition::GridPartition;
use crate::types::{GridError, GridResult};

/// Decode standard base64 into raw bytes.
pub fn decode_base64(data: &str) -> GridResult<Vec<u8>> {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD
        .decode(data.trim())
        .map_err(|e| GridError::InvalidInput(format!("Invalid base64: {e}")))
}

/// Decode a base64-encoded image, guessing its format from the content.
pub fn decode_base64_image(data: &str) -> GridResult<DynamicImage> {
    let bytes = decode_base64(data)?;
    Ok(image::load_from_memory(&bytes)?)
}

/// Crop the image into one sub-image per partition cell, in partition order.
///
/// Every tile has the partition's cell size. The crop follows the partition
/// geometry, not the decoded image size, so any part of a cell outside the
/// image is filled with black.
pub fn split_into_cells(img: &DynamicImage, partition: &GridPartition) -> Vec<DynamicImage> {
    partition
        .cells()
        .iter()
        .map(|cell| {
            let (width, height) = (cell.width() as u32, cell.height() as u32);
            let crop = img.crop_imm(cell.x_start as u32, cell.y_start as u32, width, height);
            if crop.dimensions() == (width, height) {
                return crop;
            }
            let mut tile = DynamicImage::new(width, height, img.color());
            imageops::overlay(&mut tile, &crop, 0, 0);
            tile
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn png_base64(width: u32, height: u32) -> String {
        use base64::Engine;
        let img = DynamicImage::new_rgb8(width, height);
        let mut buf = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut buf);
        img.write_with_encoder(encoder).unwrap();
        base64::engine::general_purpose::STANDARD.encode(&buf)
    }

    #[test]
    fn test_decode_image() {
        let img = decode_base64_image(&png_base64(12, 8)).unwrap();
        assert_eq!(img.dimensions(), (12, 8));
    }

    #[test]
    fn test_invalid_base64() {
        assert!(matches!(
            decode_base64("%%% not base64 %%%"),
            Err(GridError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_not_an_image() {
        use base64::Engine;
        let data = base64::engine::general_purpose::STANDARD.encode(b"plain text");
        assert!(matches!(
            decode_base64_image(&data),
            Err(GridError::Image(_))
        ));
    }

    #[test]
    fn test_split_into_cells() {
        let img = DynamicImage::new_rgb8(90, 60);
        let partition = GridPartition::new(90, 60, 3).unwrap();
        let cells = split_into_cells(&img, &partition);
        assert_eq!(cells.len(), 9);
        for cell in &cells {
            assert_eq!(cell.dimensions(), (30, 20));
        }
    }

    #[test]
    fn test_split_drops_uncovered_sliver() {
        let img = DynamicImage::new_rgb8(100, 100);
        let partition = GridPartition::new(100, 100, 3).unwrap();
        let cells = split_into_cells(&img, &partition);
        assert_eq!(cells[8].dimensions(), (33, 33));
    }

    #[test]
    fn test_split_pads_cells_outside_small_image() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(30, 30, Rgb([255, 255, 255])));
        let partition = GridPartition::new(64, 64, 3).unwrap();
        let cells = split_into_cells(&img, &partition);
        assert_eq!(cells.len(), 9);
        for cell in &cells {
            assert_eq!(cell.dimensions(), (21, 21));
        }

        // Middle cell spans 21..42: pixels up to 29 come from the image.
        let middle = cells[4].to_rgb8();
        assert_eq!(middle.get_pixel(0, 0), &Rgb([255, 255, 255]));
        assert_eq!(middle.get_pixel(8, 8), &Rgb([255, 255, 255]));
        assert_eq!(middle.get_pixel(9, 9), &Rgb([0, 0, 0]));
        assert_eq!(middle.get_pixel(20, 20), &Rgb([0, 0, 0]));

        // Bottom-right cell starts past the image and is entirely black.
        let corner = cells[8].to_rgb8();
        assert!(corner.pixels().all(|p| *p == Rgb([0, 0, 0])));
    }
}
