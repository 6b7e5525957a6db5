//! File-backed options persistence.
//!
//! The options live in a single pretty-printed JSON file. Saves go to a
//! sibling `*.tmp` file first and are renamed over the real one.

use std::path::{Path, PathBuf};

use crate::options::{Options, OPTIONS_SCHEMA_VERSION};

/// Errors from loading or saving options.
#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed options file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("schema version mismatch: file has v{file_version}, expected v{expected_version}")]
    SchemaMismatch {
        file_version: u32,
        expected_version: u32,
    },
}

/// Where options are read from and written to.
#[derive(Debug, Clone)]
pub struct OptionsStore {
    path: PathBuf,
}

impl OptionsStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the options file. A missing file yields the defaults.
    pub fn load(&self) -> Result<Options, OptionsError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no options file, using defaults");
                return Ok(Options::default());
            }
            Err(source) => {
                return Err(OptionsError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let options: Options =
            serde_json::from_slice(&bytes).map_err(|source| OptionsError::Json {
                path: self.path.clone(),
                source,
            })?;
        if options.schema_version != OPTIONS_SCHEMA_VERSION {
            return Err(OptionsError::SchemaMismatch {
                file_version: options.schema_version,
                expected_version: OPTIONS_SCHEMA_VERSION,
            });
        }
        Ok(options)
    }

    /// Like [`load`](Self::load), but any failure is logged and replaced by
    /// the defaults so the engine can still start.
    pub fn load_or_default(&self) -> Options {
        match self.load() {
            Ok(options) => options,
            Err(e) => {
                tracing::warn!("failed to load options, using defaults: {e}");
                Options::default()
            }
        }
    }

    /// Write the options, creating parent directories as needed.
    pub fn save(&self, options: &Options) -> Result<(), OptionsError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }

        let json = serde_json::to_vec_pretty(options).map_err(|source| OptionsError::Json {
            path: self.path.clone(),
            source,
        })?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|source| OptionsError::Io {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|source| self.io_error(source))?;

        tracing::debug!(path = %self.path.display(), "options saved");
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> OptionsError {
        OptionsError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_common::DisplayMode;

    #[test]
    fn missing_file_loads_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let store = OptionsStore::new(tmp.path().join("options.json"));
        assert_eq!(store.load().unwrap(), Options::default());
    }

    #[test]
    fn save_then_load_preserves_changes() {
        let tmp = tempfile::tempdir().unwrap();
        let store = OptionsStore::new(tmp.path().join("options.json"));

        let mut opts = Options::default();
        opts.toggle_vsync();
        opts.toggle_display_mode();
        store.save(&opts).unwrap();

        let loaded = OptionsStore::new(store.path()).load().unwrap();
        assert!(!loaded.vsync);
        assert_eq!(loaded.display_mode, DisplayMode::FullScreen);
    }

    #[test]
    fn save_creates_parent_dirs_and_leaves_no_temp_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("dir").join("options.json");
        let store = OptionsStore::new(&path);
        store.save(&Options::default()).unwrap();

        assert!(path.is_file());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("options.json");
        std::fs::write(&path, b"{ not json").unwrap();

        let store = OptionsStore::new(&path);
        assert!(matches!(store.load(), Err(OptionsError::Json { .. })));
        assert_eq!(store.load_or_default(), Options::default());
    }

    #[test]
    fn schema_mismatch_fail_closed() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("options.json");
        std::fs::write(&path, br#"{ "schema_version": 999, "vsync": false }"#).unwrap();

        match OptionsStore::new(&path).load() {
            Err(OptionsError::SchemaMismatch {
                file_version,
                expected_version,
            }) => {
                assert_eq!(file_version, 999);
                assert_eq!(expected_version, OPTIONS_SCHEMA_VERSION);
            }
            Err(e) => panic!("expected SchemaMismatch, got: {e}"),
            Ok(_) => panic!("expected error, got Ok"),
        }
    }
}
