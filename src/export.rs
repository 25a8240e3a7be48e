// Canvas bitmap -> classifier input tensor.
//
// Pipeline (fixed, so numeric results are reproducible):
//   1. RGB32 (0x00RRGGBB, row-major) -> packed RGB bytes -> image::RgbImage
//   2. resize to 28x28 with FilterType::CatmullRom (bicubic, support widened when
//      shrinking, as Pillow's default resize does)
//   3. luminance per pixel with the ITU-R 601-2 weights
//   4. divide by 255 and lay out as [1, 28, 28, 1]

use image::imageops::{self, FilterType};
use image::RgbImage;
use ndarray::Array4;

use crate::types::{channels, FrameBuffer};

/// Side of the square classifier input.
pub const INPUT_SIDE: usize = 28;
/// Tensor shape handed to the classifier: batch, rows, cols, channels.
pub const INPUT_SHAPE: (usize, usize, usize, usize) = (1, INPUT_SIDE, INPUT_SIDE, 1);
/// Filter used for the downscale. Changing it changes every exported value.
pub const RESIZE_FILTER: FilterType = FilterType::CatmullRom;

/// Convert an RGB32 buffer into a row-major `[r, g, b, r, g, b, ...]` byte array.
///
/// Each input word is read as `0x??RRGGBB`; the top byte (unused in minifb,
/// 0xFF in Qt's RGB32) is dropped. Output length is `3 * width * height`.
pub fn rgb32_to_rgb_bytes(fb: &FrameBuffer) -> Vec<u8> {
    assert_eq!(fb.pixels.len(), fb.width * fb.height, "framebuffer size mismatch");
    let mut out = Vec::with_capacity(fb.pixels.len() * 3);
    for &px in &fb.pixels {
        let (r, g, b) = channels(px);
        out.extend_from_slice(&[r, g, b]);
    }
    out
}

/// Wrap the canvas as an `image::RgbImage` (copying, the canvas is untouched).
pub fn to_rgb_image(fb: &FrameBuffer) -> RgbImage {
    assert!(fb.width > 0 && fb.height > 0, "cannot export an empty bitmap");
    RgbImage::from_raw(fb.width as u32, fb.height as u32, rgb32_to_rgb_bytes(fb))
        .expect("rgb byte length always matches width * height * 3")
}

/// ITU-R 601-2 luma: L = R*299/1000 + G*587/1000 + B*114/1000,
/// in 16-bit fixed point with rounding.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16) as u8
}

/// Run the full pipeline on a canvas snapshot.
///
/// Panics on a zero-size or inconsistent bitmap; the canvas has a fixed
/// non-zero size so that can only be a programming error.
pub fn export(fb: &FrameBuffer) -> Array4<f32> {
    let rgb = to_rgb_image(fb);
    let small = imageops::resize(&rgb, INPUT_SIDE as u32, INPUT_SIDE as u32, RESIZE_FILTER);

    let values: Vec<f32> = small
        .pixels()
        .map(|p| luminance(p[0], p[1], p[2]) as f32 / 255.0)
        .collect();

    Array4::from_shape_vec(INPUT_SHAPE, values).expect("28*28 resize always yields 784 values")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{rgb, DODGER_BLUE, WHITE};

    #[test]
    fn test_rgb32_conversion_layout() {
        let fb = FrameBuffer {
            width: 2,
            height: 1,
            pixels: vec![rgb(1, 2, 3), 0xFF_0A_0B_0C],
        };
        assert_eq!(rgb32_to_rgb_bytes(&fb), vec![1, 2, 3, 10, 11, 12]);
    }

    #[test]
    fn test_rgb_image_keeps_positions() {
        let mut fb = FrameBuffer::filled(3, 2, WHITE);
        fb.put_pixel(2, 1, DODGER_BLUE);
        let img = to_rgb_image(&fb);
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(2, 1).0, [0x1E, 0x90, 0xFF]);
        assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255]);
    }

    #[test]
    fn test_luminance_weights() {
        assert_eq!(luminance(255, 255, 255), 255);
        assert_eq!(luminance(0, 0, 0), 0);
        assert_eq!(luminance(255, 0, 0), 76);
        assert_eq!(luminance(0, 255, 0), 150);
        assert_eq!(luminance(0, 0, 255), 29);
        assert_eq!(luminance(0x1E, 0x90, 0xFF), 123);
    }

    #[test]
    fn test_blank_canvas_exports_all_ones() {
        let fb = FrameBuffer::filled(300, 300, WHITE);
        let t = export(&fb);
        assert_eq!(t.dim(), INPUT_SHAPE);
        assert!(t.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_values_stay_in_unit_range() {
        // Checkerboard of extremes plus the pen color.
        let mut fb = FrameBuffer::filled(97, 53, WHITE);
        for y in 0..53 {
            for x in 0..97 {
                let c = match (x + y) % 3 { 0 => 0, 1 => DODGER_BLUE, _ => WHITE };
                fb.put_pixel(x as i32, y as i32, c);
            }
        }
        let t = export(&fb);
        assert_eq!(t.shape(), &[1, 28, 28, 1]);
        assert!(t.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_solid_pen_color_maps_to_its_luma() {
        let fb = FrameBuffer::filled(56, 56, DODGER_BLUE);
        let t = export(&fb);
        approx::assert_abs_diff_eq!(t[[0, 13, 13, 0]], 123.0 / 255.0, epsilon = 1e-6);
    }

    #[test]
    fn test_edge_cell_follows_bicubic_weights() {
        // Left half black, right half white, halved to 28 columns. Output column 13
        // straddles the edge: bicubic keeps it near black (17/255) where a
        // bilinear tent would give 32/255.
        let mut fb = FrameBuffer::filled(56, 56, WHITE);
        for y in 0..56 {
            for x in 0..28 {
                fb.put_pixel(x, y, 0);
            }
        }
        let t = export(&fb);
        for row in [0, 13, 27] {
            approx::assert_abs_diff_eq!(t[[0, row, 13, 0]], 17.0 / 255.0, epsilon = 1.5 / 255.0);
            approx::assert_abs_diff_eq!(t[[0, row, 14, 0]], 238.0 / 255.0, epsilon = 1.5 / 255.0);
        }
        assert_eq!(t[[0, 5, 10, 0]], 0.0);
        assert_eq!(t[[0, 5, 17, 0]], 1.0);
    }

    #[test]
    #[should_panic]
    fn test_empty_bitmap_is_a_contract_violation() {
        let fb = FrameBuffer { width: 0, height: 0, pixels: Vec::new() };
        export(&fb);
    }
}
