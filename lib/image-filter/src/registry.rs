use crate::{BuiltinFilter, Filter, FilterError, PresetFilter};
use log::{debug, warn};
use std::path::Path;

/// The set of filters available to a front end: the compiled-in builtins
/// plus presets discovered from an extension directory at startup.
///
/// Constructed once and handed to whatever consumes it; filters are never
/// removed during a run.
#[derive(Debug, Default)]
pub struct FilterRegistry {
    builtins: Vec<BuiltinFilter>,
    extensions: Vec<PresetFilter>,
}

impl FilterRegistry {
    pub fn with_builtins() -> Self {
        Self {
            builtins: BuiltinFilter::all().to_vec(),
            extensions: Vec::new(),
        }
    }

    /// Scans `dir` once for `*.json` preset files, in path order.
    ///
    /// A file that fails to parse or validate is skipped and reported in
    /// the returned list; the remaining files still load. An unreadable
    /// directory reports a single error and loads nothing.
    pub fn load_extensions(&mut self, dir: &Path) -> Vec<FilterError> {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("cannot read extension directory {dir:?}: {e}");
                return vec![FilterError::Io(e)];
            }
        };

        let mut paths: Vec<_> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        let mut failures = Vec::new();
        for path in paths {
            match PresetFilter::from_path(&path) {
                Ok(preset) => {
                    debug!("loaded extension filter `{}` from {path:?}", preset.name());
                    self.extensions.push(preset);
                }
                Err(e) => {
                    warn!("skipping extension: {e}");
                    failures.push(e);
                }
            }
        }

        failures
    }

    pub fn builtins(&self) -> &[BuiltinFilter] {
        &self.builtins
    }

    pub fn extensions(&self) -> &[PresetFilter] {
        &self.extensions
    }

    /// All filters in display order: builtins first, then extensions.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Filter> {
        self.builtins
            .iter()
            .map(|f| f as &dyn Filter)
            .chain(self.extensions.iter().map(|f| f as &dyn Filter))
    }

    pub fn get(&self, name: &str) -> Option<&dyn Filter> {
        self.iter().find(|f| f.name() == name)
    }
}
