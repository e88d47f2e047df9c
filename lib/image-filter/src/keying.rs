use crate::{
    FilterError, FilterResult,
    colour_space::rgb_to_lab,
    params::{self, ParamSchema, ParamSpec, ParamValues},
};
use derivative::Derivative;
use derive_setters::Setters;
use image::RgbaImage;

/// Chroma key configuration
///
/// Pixels close to the key color in perceptual LAB distance become
/// transparent; distant pixels keep their alpha; pixels inside the feather
/// band interpolate linearly. Distances are normalized against the spread
/// observed in the image, so `strength` and `feather` are relative
/// thresholds in `[0, 1]`.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct ChromaKeyConfig {
    #[derivative(Default(value = "(100, 200, 50)"))]
    key: (u8, u8, u8),

    #[derivative(Default(value = "0.1"))]
    strength: f32, // inner threshold, [0, 1]

    #[derivative(Default(value = "0.1"))]
    feather: f32, // ramp width, [0, 1]

    // The declared range is [0, 1] but the shipped default has always been
    // 2.0; kept verbatim so existing front ends keep their behavior.
    #[derivative(Default(value = "2.0"))]
    luminance_weight: f32,
}

impl ChromaKeyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn schema() -> ParamSchema {
        let mut schema = ParamSchema::new();
        schema.insert(
            "Key".to_string(),
            ParamSpec::Color {
                default: (100, 200, 50),
            },
        );
        schema.insert(
            "Strength".to_string(),
            ParamSpec::Float {
                min: 0.0,
                max: 1.0,
                default: 0.1,
            },
        );
        schema.insert(
            "Feather".to_string(),
            ParamSpec::Float {
                min: 0.0,
                max: 1.0,
                default: 0.1,
            },
        );
        schema.insert(
            "Luminance Weight".to_string(),
            ParamSpec::Float {
                min: 0.0,
                max: 1.0,
                default: 2.0,
            },
        );
        schema
    }

    pub(crate) fn from_values(values: &ParamValues) -> FilterResult<Self> {
        Ok(Self {
            key: params::require_color(values, "Key")?,
            strength: params::require_float(values, "Strength")?,
            feather: params::require_float(values, "Feather")?,
            luminance_weight: params::require_float(values, "Luminance Weight")?,
        })
    }

    pub fn apply(&self, image: &RgbaImage) -> FilterResult<RgbaImage> {
        if image.width() == 0 || image.height() == 0 {
            return Err(FilterError::Computation(
                "cannot key an image with no pixels".to_string(),
            ));
        }

        let (key_l, key_a, key_b) = rgb_to_lab(self.key.0, self.key.1, self.key.2);
        let w = self.luminance_weight;

        let mut distances = Vec::with_capacity(image.pixels().len());
        for pixel in image.pixels() {
            let (l, a, b) = rgb_to_lab(pixel[0], pixel[1], pixel[2]);
            let d = ((w * (l - key_l)).powi(2) + (a - key_a).powi(2) + (b - key_b).powi(2)).sqrt();
            if !d.is_finite() {
                return Err(FilterError::Computation(format!(
                    "non-finite key distance (luminance weight {w})"
                )));
            }
            distances.push(d);
        }

        let min = distances.iter().copied().fold(f32::INFINITY, f32::min);
        let max = distances.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let spread = max - min;

        let mut out = image.clone();
        for (pixel, d) in out.pixels_mut().zip(&distances) {
            // A uniform image has no distance spread; every pixel then
            // counts as an exact key match.
            let nd = if spread == 0.0 { 0.0 } else { (d - min) / spread };

            let coeff = if self.feather == 0.0 {
                if nd >= self.strength { 1.0 } else { 0.0 }
            } else {
                ((nd - self.strength) / self.feather).clamp(0.0, 1.0)
            };

            pixel[3] = if coeff >= 1.0 {
                pixel[3]
            } else {
                (pixel[3] as f32 * coeff) as u8
            };
        }

        Ok(out)
    }
}
