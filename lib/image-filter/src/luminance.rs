use crate::{
    FilterResult,
    colour_space::{lab_to_rgb, rgb_to_lab},
};
use image::RgbaImage;

/// Inverts the perceptual lightness of an image.
///
/// Each pixel moves to `L' = 255 - L` in LAB space while its chroma and
/// alpha stay put: dark saturated colors become light ones of the same hue
/// family and vice versa. Applying the filter twice returns the original
/// image up to LAB round-trip rounding.
pub fn invert_luminance(image: &RgbaImage) -> FilterResult<RgbaImage> {
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        let (l, a, b) = rgb_to_lab(pixel[0], pixel[1], pixel[2]);
        let (r, g, b) = lab_to_rgb(255.0 - l, a, b);
        pixel[0] = r;
        pixel[1] = g;
        pixel[2] = b;
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_white_and_black_swap() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 255]));
        let out = invert_luminance(&img).unwrap();
        assert_eq!(out.get_pixel(0, 0).0[..3], [0, 0, 0]);

        let img = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]));
        let out = invert_luminance(&img).unwrap();
        assert_eq!(out.get_pixel(0, 0).0[..3], [255, 255, 255]);
    }

    #[test]
    fn test_double_application_round_trips() {
        let colors = [
            [200u8, 60, 60, 255],
            [10, 240, 120, 200],
            [128, 128, 128, 255],
            [37, 99, 201, 90],
        ];

        for rgba in colors {
            let img = RgbaImage::from_pixel(1, 1, Rgba(rgba));
            let twice = invert_luminance(&invert_luminance(&img).unwrap()).unwrap();

            let p = twice.get_pixel(0, 0);
            for c in 0..3 {
                let diff = (p[c] as i32 - rgba[c] as i32).abs();
                assert!(diff <= 6, "channel {c} drifted by {diff} for {rgba:?}");
            }
        }
    }

    #[test]
    fn test_alpha_preserved() {
        let img = RgbaImage::from_pixel(2, 1, Rgba([90, 140, 30, 42]));
        let out = invert_luminance(&img).unwrap();

        for pixel in out.pixels() {
            assert_eq!(pixel[3], 42);
        }
    }

    #[test]
    fn test_inverts_lightness_ordering() {
        let dark = RgbaImage::from_pixel(1, 1, Rgba([40, 40, 40, 255]));
        let out = invert_luminance(&dark).unwrap();

        let p = out.get_pixel(0, 0);
        assert!(p[0] > 128 && p[1] > 128 && p[2] > 128);
    }
}
