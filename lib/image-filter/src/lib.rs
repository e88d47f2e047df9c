pub mod color_adjust;
pub mod colour_space;
pub mod keying;
pub mod luminance;
pub mod params;
pub mod preset_filter;
pub mod registry;

use image::RgbaImage;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::path::PathBuf;

pub use color_adjust::{AdjustHsvConfig, AdjustRgbConfig};
pub use keying::ChromaKeyConfig;
pub use params::{ParamSchema, ParamSpec, ParamValue, ParamValues};
pub use preset_filter::PresetFilter;
pub use registry::FilterRegistry;

pub type FilterResult<T> = Result<T, FilterError>;

#[derive(thiserror::Error, Debug)]
pub enum FilterError {
    #[error("invalid value for parameter `{name}`: {reason}")]
    InvalidParameterValue { name: String, reason: String },
    #[error("filter computation failed: {0}")]
    Computation(String),
    #[error("failed to load extension {path:?}: {reason}")]
    ExtensionLoad { path: PathBuf, reason: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// A stateless image filter.
///
/// Implementations never mutate the input image and never retry; a filter
/// either returns a new image or reports the failure to the caller.
pub trait Filter {
    /// Display name shown to the user.
    fn name(&self) -> &str;

    /// Declares the filter's tunable parameters: the controls a front end
    /// must render, the legal value space, and the initial values.
    fn default_params(&self) -> ParamSchema;

    /// Applies the filter and returns a new image.
    ///
    /// `values` must carry exactly the keys declared by
    /// [`default_params`](Filter::default_params); anything else is
    /// rejected as [`FilterError::InvalidParameterValue`].
    fn apply(&self, image: &RgbaImage, values: &ParamValues) -> FilterResult<RgbaImage>;
}

/// The compiled-in filters, in display order.
///
/// The `u8` conversions let a front end map a widget index to a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum BuiltinFilter {
    AdjustHsv = 0,
    AdjustRgb,
    ChromaKey,
    InvertLuminance,
}

impl BuiltinFilter {
    pub fn all() -> &'static [BuiltinFilter] {
        &[
            BuiltinFilter::AdjustHsv,
            BuiltinFilter::AdjustRgb,
            BuiltinFilter::ChromaKey,
            BuiltinFilter::InvertLuminance,
        ]
    }

    pub fn from_name(name: &str) -> Option<BuiltinFilter> {
        Self::all().iter().copied().find(|f| f.name() == name)
    }
}

impl Filter for BuiltinFilter {
    fn name(&self) -> &str {
        match self {
            BuiltinFilter::AdjustHsv => "Adjust HSV",
            BuiltinFilter::AdjustRgb => "Adjust RGB",
            BuiltinFilter::ChromaKey => "Chroma Key",
            BuiltinFilter::InvertLuminance => "Invert Luminance",
        }
    }

    fn default_params(&self) -> ParamSchema {
        match self {
            BuiltinFilter::AdjustHsv => AdjustHsvConfig::schema(),
            BuiltinFilter::AdjustRgb => AdjustRgbConfig::schema(),
            BuiltinFilter::ChromaKey => ChromaKeyConfig::schema(),
            BuiltinFilter::InvertLuminance => ParamSchema::new(),
        }
    }

    fn apply(&self, image: &RgbaImage, values: &ParamValues) -> FilterResult<RgbaImage> {
        params::validate_values(&self.default_params(), values)?;

        match self {
            BuiltinFilter::AdjustHsv => AdjustHsvConfig::from_values(values)?.apply(image),
            BuiltinFilter::AdjustRgb => AdjustRgbConfig::from_values(values)?.apply(image),
            BuiltinFilter::ChromaKey => ChromaKeyConfig::from_values(values)?.apply(image),
            BuiltinFilter::InvertLuminance => luminance::invert_luminance(image),
        }
    }
}
