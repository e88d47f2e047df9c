use crate::{
    BuiltinFilter, Filter, FilterError, FilterResult,
    params::{self, ParamSchema, ParamValue, ParamValues},
};
use image::RgbaImage;
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

/// A user-supplied filter preset: a named chain of builtin filter steps
/// with fixed parameter overrides, loaded from a JSON file.
///
/// Presets are data, not code. A step can only reference a builtin filter
/// and set parameters that filter already declares; parameters left unset
/// take the builtin's defaults. A preset therefore exposes no tunable
/// parameters of its own.
///
/// ```json
/// {
///   "name": "Greenscreen Punch",
///   "steps": [
///     {"filter": "Chroma Key", "params": {"Key": [0, 255, 0], "Feather": 0.3}},
///     {"filter": "Adjust HSV", "params": {"Saturation": 1.4}}
///   ]
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PresetFilter {
    name: String,
    steps: Vec<PresetStep>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct PresetStep {
    filter: String,
    #[serde(default)]
    params: IndexMap<String, ParamValue>,
}

impl PresetFilter {
    /// Parses and validates one preset file. Every failure is reported as
    /// [`FilterError::ExtensionLoad`] carrying the offending path.
    pub fn from_path(path: &Path) -> FilterResult<Self> {
        let load_err = |reason: String| FilterError::ExtensionLoad {
            path: path.to_path_buf(),
            reason,
        };

        let text = std::fs::read_to_string(path).map_err(|e| load_err(e.to_string()))?;
        let preset: PresetFilter =
            serde_json::from_str(&text).map_err(|e| load_err(e.to_string()))?;
        preset.check().map_err(load_err)?;

        Ok(preset)
    }

    fn check(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("preset has an empty name".to_string());
        }
        if self.steps.is_empty() {
            return Err("preset declares no steps".to_string());
        }

        for step in &self.steps {
            let builtin = BuiltinFilter::from_name(&step.filter)
                .ok_or_else(|| format!("unknown filter `{}`", step.filter))?;

            let schema = builtin.default_params();
            for (name, value) in &step.params {
                let spec = schema
                    .get(name)
                    .ok_or_else(|| format!("`{}` has no parameter `{name}`", step.filter))?;
                spec.validate(name, value).map_err(|e| e.to_string())?;
            }
        }

        Ok(())
    }
}

impl Filter for PresetFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn default_params(&self) -> ParamSchema {
        ParamSchema::new()
    }

    fn apply(&self, image: &RgbaImage, values: &ParamValues) -> FilterResult<RgbaImage> {
        params::validate_values(&ParamSchema::new(), values)?;

        let mut out = image.clone();
        for step in &self.steps {
            let builtin = BuiltinFilter::from_name(&step.filter).ok_or_else(|| {
                FilterError::Computation(format!(
                    "preset `{}` references unknown filter `{}`",
                    self.name, step.filter
                ))
            })?;

            let mut merged = params::default_values(&builtin.default_params());
            for (name, value) in &step.params {
                merged.insert(name.clone(), value.clone());
            }

            out = builtin.apply(&out, &merged)?;
        }

        Ok(out)
    }
}
