use crate::{
    FilterResult,
    colour_space::{hsv_to_rgb, rgb_to_hsv},
    params::{self, ParamSchema, ParamSpec, ParamValues},
};
use derivative::Derivative;
use derive_setters::Setters;
use image::RgbaImage;

/// Hue/saturation/value adjustment configuration
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct AdjustHsvConfig {
    #[derivative(Default(value = "0.0"))]
    hue: f32, // degrees, [-180, 180]

    #[derivative(Default(value = "1.0"))]
    saturation: f32, // multiplier, [0, 2]

    #[derivative(Default(value = "1.0"))]
    value: f32, // multiplier, [0, 2]
}

impl AdjustHsvConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn schema() -> ParamSchema {
        let mut schema = ParamSchema::new();
        schema.insert(
            "Hue".to_string(),
            ParamSpec::Float {
                min: -180.0,
                max: 180.0,
                default: 0.0,
            },
        );
        schema.insert(
            "Saturation".to_string(),
            ParamSpec::Float {
                min: 0.0,
                max: 2.0,
                default: 1.0,
            },
        );
        schema.insert(
            "Value".to_string(),
            ParamSpec::Float {
                min: 0.0,
                max: 2.0,
                default: 1.0,
            },
        );
        schema
    }

    pub(crate) fn from_values(values: &ParamValues) -> FilterResult<Self> {
        Ok(Self {
            hue: params::require_float(values, "Hue")?,
            saturation: params::require_float(values, "Saturation")?,
            value: params::require_float(values, "Value")?,
        })
    }

    pub fn apply(&self, image: &RgbaImage) -> FilterResult<RgbaImage> {
        // The hue channel wraps at 256 like the 8-bit representation it
        // lives in; saturation and value saturate at the channel limits.
        let shift = self.hue.round() as i32;

        let mut out = image.clone();
        for pixel in out.pixels_mut() {
            let (h, s, v) = rgb_to_hsv(pixel[0], pixel[1], pixel[2]);

            let h = (h as i32 + shift).rem_euclid(256) as u8;
            let s = (s as f32 * self.saturation).clamp(0.0, 255.0) as u8;
            let v = (v as f32 * self.value).clamp(0.0, 255.0) as u8;

            let (r, g, b) = hsv_to_rgb(h, s, v);
            pixel[0] = r;
            pixel[1] = g;
            pixel[2] = b;
        }

        Ok(out)
    }
}

/// Per-channel gamma exposure configuration
///
/// Each scale `s` remaps its channel through `i -> 255 * (i/255)^(1/s - 1)`.
/// The curve is non-linear in `s`: 0.5 is the identity, values toward 0
/// darken steeply, values toward 1 approach full brightening, and exactly 0
/// blacks the channel out.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct AdjustRgbConfig {
    #[derivative(Default(value = "0.5"))]
    red: f32, // [0, 1]

    #[derivative(Default(value = "0.5"))]
    green: f32, // [0, 1]

    #[derivative(Default(value = "0.5"))]
    blue: f32, // [0, 1]
}

impl AdjustRgbConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn schema() -> ParamSchema {
        let mut schema = ParamSchema::new();
        for channel in ["Red", "Green", "Blue"] {
            schema.insert(
                channel.to_string(),
                ParamSpec::Float {
                    min: 0.0,
                    max: 1.0,
                    default: 0.5,
                },
            );
        }
        schema
    }

    pub(crate) fn from_values(values: &ParamValues) -> FilterResult<Self> {
        Ok(Self {
            red: params::require_float(values, "Red")?,
            green: params::require_float(values, "Green")?,
            blue: params::require_float(values, "Blue")?,
        })
    }

    pub fn apply(&self, image: &RgbaImage) -> FilterResult<RgbaImage> {
        let red = channel_lut(self.red);
        let green = channel_lut(self.green);
        let blue = channel_lut(self.blue);

        let mut out = image.clone();
        for pixel in out.pixels_mut() {
            pixel[0] = red[pixel[0] as usize];
            pixel[1] = green[pixel[1] as usize];
            pixel[2] = blue[pixel[2] as usize];
        }

        Ok(out)
    }
}

fn channel_lut(scale: f32) -> [u8; 256] {
    let mut lut = [0u8; 256];
    if scale == 0.0 {
        return lut;
    }

    let e = 1.0 / scale as f64 - 1.0;

    // Exponent 1 is the identity curve; skip the pow round trip so the
    // truncating conversion cannot drift it off by one.
    if e == 1.0 {
        for (i, slot) in lut.iter_mut().enumerate() {
            *slot = i as u8;
        }
        return lut;
    }

    for (i, slot) in lut.iter_mut().enumerate() {
        let mapped = (i as f64 / 255.0).powf(e);
        // min() also covers 0^negative blowing up to infinity
        *slot = (mapped * 255.0).min(255.0) as u8;
    }

    lut
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::default_values;
    use image::{Rgba, RgbaImage};

    fn ramp_image() -> RgbaImage {
        let mut img = RgbaImage::new(256, 1);
        for (x, _, pixel) in img.enumerate_pixels_mut() {
            let i = x as u8;
            *pixel = Rgba([i, i.wrapping_add(40), 255 - i, 200]);
        }
        img
    }

    #[test]
    fn test_hsv_defaults_keep_pure_red() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([255, 0, 0, 255]));
        let out = AdjustHsvConfig::new().apply(&img).unwrap();

        assert_eq!(out.get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_hsv_defaults_keep_primaries_and_grays() {
        for rgb in [[0, 255, 0], [0, 0, 255], [128, 128, 128], [0, 0, 0]] {
            let img = RgbaImage::from_pixel(1, 1, Rgba([rgb[0], rgb[1], rgb[2], 255]));
            let out = AdjustHsvConfig::new().apply(&img).unwrap();
            assert_eq!(out.get_pixel(0, 0).0[..3], rgb);
        }
    }

    #[test]
    fn test_hsv_zero_saturation_grays_out() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([200, 60, 60, 255]));
        let out = AdjustHsvConfig::new()
            .with_saturation(0.0)
            .apply(&img)
            .unwrap();

        let p = out.get_pixel(0, 0);
        assert_eq!(p[0], p[1]);
        assert_eq!(p[1], p[2]);
    }

    #[test]
    fn test_hsv_shift_changes_color_but_not_alpha() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([255, 0, 0, 77]));
        let out = AdjustHsvConfig::new().with_hue(128.0).apply(&img).unwrap();

        let p = out.get_pixel(0, 0);
        assert_ne!(p.0[..3], [255, 0, 0]);
        assert_eq!(p[3], 77);
    }

    #[test]
    fn test_hsv_through_value_mapping() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([255, 0, 0, 255]));
        let values = default_values(&AdjustHsvConfig::schema());
        let out = AdjustHsvConfig::from_values(&values)
            .unwrap()
            .apply(&img)
            .unwrap();

        assert_eq!(out.get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_rgb_half_scale_is_identity() {
        let img = ramp_image();
        let out = AdjustRgbConfig::new().apply(&img).unwrap();

        assert_eq!(img, out);
    }

    #[test]
    fn test_rgb_zero_scale_blacks_out_one_channel() {
        let img = ramp_image();
        let out = AdjustRgbConfig::new().with_red(0.0).apply(&img).unwrap();

        for (src, dst) in img.pixels().zip(out.pixels()) {
            assert_eq!(dst[0], 0);
            assert_eq!(dst[1], src[1]);
            assert_eq!(dst[2], src[2]);
            assert_eq!(dst[3], src[3]);
        }
    }

    #[test]
    fn test_rgb_low_scale_darkens() {
        // s = 0.25 gives exponent 3: midtones collapse toward black
        let lut = channel_lut(0.25);

        assert_eq!(lut[0], 0);
        assert_eq!(lut[255], 255);
        assert!(lut[128] < 40);
        for i in 1..256 {
            assert!(lut[i] >= lut[i - 1]);
        }
    }

    #[test]
    fn test_rgb_high_scale_brightens() {
        // s = 0.8 gives exponent 0.25: midtones lift toward white
        let lut = channel_lut(0.8);

        assert!(lut[64] > 64);
        assert_eq!(lut[255], 255);
    }

    #[test]
    fn test_rgb_input_not_mutated() {
        let img = ramp_image();
        let snapshot = img.clone();
        let _ = AdjustRgbConfig::new().with_blue(0.1).apply(&img).unwrap();

        assert_eq!(img, snapshot);
    }
}
