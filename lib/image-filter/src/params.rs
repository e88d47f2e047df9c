//! Self-describing filter parameters.
//!
//! A filter declares its tunable inputs as a [`ParamSchema`]: an ordered map
//! from a display name to a typed, bounded specification. A front end renders
//! controls from the schema, collects a [`ParamValues`] mapping, and passes it
//! back to the filter. Insertion order is the display order.

use crate::{FilterError, FilterResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Resolution of the normalized slider range used by front ends.
pub const SLIDER_TICKS: u32 = 1000;

pub type ParamSchema = IndexMap<String, ParamSpec>;
pub type ParamValues = IndexMap<String, ParamValue>;

/// Typed specification of a single parameter.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ParamSpec {
    Float { min: f32, max: f32, default: f32 },
    Bool { default: bool },
    Str { default: String },
    Color { default: (u8, u8, u8) },
}

/// A concrete parameter value supplied by the front end.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Float(f32),
    Str(String),
    Color((u8, u8, u8)),
}

impl ParamValue {
    pub fn as_float(&self) -> Option<f32> {
        match self {
            ParamValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<(u8, u8, u8)> {
        match self {
            ParamValue::Color(v) => Some(*v),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            ParamValue::Bool(_) => "bool",
            ParamValue::Float(_) => "float",
            ParamValue::Str(_) => "str",
            ParamValue::Color(_) => "color",
        }
    }
}

impl ParamSpec {
    pub fn kind_name(&self) -> &'static str {
        match self {
            ParamSpec::Float { .. } => "float",
            ParamSpec::Bool { .. } => "bool",
            ParamSpec::Str { .. } => "str",
            ParamSpec::Color { .. } => "color",
        }
    }

    /// The value a front end starts from when the filter is selected.
    pub fn default_value(&self) -> ParamValue {
        match self {
            ParamSpec::Float { default, .. } => ParamValue::Float(*default),
            ParamSpec::Bool { default } => ParamValue::Bool(*default),
            ParamSpec::Str { default } => ParamValue::Str(default.clone()),
            ParamSpec::Color { default } => ParamValue::Color(*default),
        }
    }

    /// Checks a supplied value against this specification.
    ///
    /// Violations are rejected, never clamped. A float equal to the declared
    /// default always passes, so descriptors whose shipped default sits
    /// outside the declared range stay usable.
    pub fn validate(&self, name: &str, value: &ParamValue) -> FilterResult<()> {
        let reject = |reason: String| FilterError::InvalidParameterValue {
            name: name.to_string(),
            reason,
        };

        match (self, value) {
            (ParamSpec::Float { min, max, default }, ParamValue::Float(v)) => {
                if !v.is_finite() {
                    return Err(reject(format!("{v} is not a finite number")));
                }
                if (*v < *min || *v > *max) && v != default {
                    return Err(reject(format!("{v} is outside [{min}, {max}]")));
                }
                Ok(())
            }
            (ParamSpec::Bool { .. }, ParamValue::Bool(_))
            | (ParamSpec::Str { .. }, ParamValue::Str(_))
            | (ParamSpec::Color { .. }, ParamValue::Color(_)) => Ok(()),
            (spec, value) => Err(reject(format!(
                "expected a {} value, got {}",
                spec.kind_name(),
                value.kind_name()
            ))),
        }
    }

    /// Maps a slider position in `[0, SLIDER_TICKS]` to a concrete value by
    /// linear interpolation over the declared range. Float specs only.
    pub fn value_from_tick(&self, tick: u32) -> Option<f32> {
        match self {
            ParamSpec::Float { min, max, .. } => {
                Some(min + (max - min) * tick as f32 / SLIDER_TICKS as f32)
            }
            _ => None,
        }
    }

    /// Inverse of [`value_from_tick`](ParamSpec::value_from_tick), for
    /// populating a widget with a stored value. A degenerate `min == max`
    /// range maps every value to tick 0.
    pub fn tick_from_value(&self, value: f32) -> Option<u32> {
        match self {
            ParamSpec::Float { min, max, .. } => {
                if min == max {
                    return Some(0);
                }
                let tick = ((value - min) / (max - min) * SLIDER_TICKS as f32).round();
                Some(tick.clamp(0.0, SLIDER_TICKS as f32) as u32)
            }
            _ => None,
        }
    }
}

/// Builds the value mapping used when no user input has been given yet.
pub fn default_values(schema: &ParamSchema) -> ParamValues {
    schema
        .iter()
        .map(|(name, spec)| (name.clone(), spec.default_value()))
        .collect()
}

/// Checks that `values` carries exactly the keys of `schema` and that every
/// value satisfies its specification.
pub fn validate_values(schema: &ParamSchema, values: &ParamValues) -> FilterResult<()> {
    for (name, spec) in schema {
        let value = values
            .get(name)
            .ok_or_else(|| FilterError::InvalidParameterValue {
                name: name.clone(),
                reason: "missing value".to_string(),
            })?;
        spec.validate(name, value)?;
    }

    for name in values.keys() {
        if !schema.contains_key(name) {
            return Err(FilterError::InvalidParameterValue {
                name: name.clone(),
                reason: "not declared by this filter".to_string(),
            });
        }
    }

    Ok(())
}

pub(crate) fn require_float(values: &ParamValues, name: &str) -> FilterResult<f32> {
    values
        .get(name)
        .and_then(ParamValue::as_float)
        .ok_or_else(|| FilterError::InvalidParameterValue {
            name: name.to_string(),
            reason: "missing float value".to_string(),
        })
}

pub(crate) fn require_color(values: &ParamValues, name: &str) -> FilterResult<(u8, u8, u8)> {
    values
        .get(name)
        .and_then(ParamValue::as_color)
        .ok_or_else(|| FilterError::InvalidParameterValue {
            name: name.to_string(),
            reason: "missing color value".to_string(),
        })
}
