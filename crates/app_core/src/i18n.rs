//! Flat JSON translation catalogs.
//!
//! Catalogs live in `<locale_dir>/app_<lang>.json` as string-to-string maps.
//! A regional language such as `pt_BR` falls back to `app_pt.json`.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info, warn};

const CATALOG_PREFIX: &str = "app_";
const CATALOG_EXTENSION: &str = "json";

#[derive(Debug, Error)]
pub enum I18nError {
    #[error("failed to read catalog '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("catalog '{path}' is not a flat JSON string map: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug)]
pub struct I18nService {
    locale_dir: PathBuf,
    language: Option<String>,
    catalog: HashMap<String, String>,
}

impl I18nService {
    pub fn new(locale_dir: impl Into<PathBuf>) -> Self {
        Self {
            locale_dir: locale_dir.into(),
            language: None,
            catalog: HashMap::new(),
        }
    }

    pub fn locale_dir(&self) -> &Path {
        &self.locale_dir
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Replaces the loaded catalog. Returns whether one was found.
    pub fn set_language(&mut self, language: &str) -> bool {
        self.catalog.clear();
        self.language = Some(language.to_string());

        for candidate in candidates(language) {
            let path = self.catalog_path(&candidate);
            if !path.exists() {
                continue;
            }
            match load_catalog(&path) {
                Ok(catalog) => {
                    info!(language, catalog = %path.display(), entries = catalog.len(), "translations loaded");
                    self.catalog = catalog;
                    return true;
                }
                Err(err) => {
                    warn!("skipping catalog: {err}");
                }
            }
        }

        debug!(language, "no translations found");
        false
    }

    /// Re-reads the catalog for the current language.
    pub fn reload(&mut self) -> bool {
        match self.language.clone() {
            Some(language) => self.set_language(&language),
            None => false,
        }
    }

    /// Translation for `key`, or `key` itself when there is none.
    pub fn tr<'a>(&'a self, key: &'a str) -> &'a str {
        self.catalog.get(key).map(String::as_str).unwrap_or(key)
    }

    pub fn available_languages(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.locale_dir) else {
            return Vec::new();
        };

        let mut languages: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension().and_then(|ext| ext.to_str()) == Some(CATALOG_EXTENSION)
            })
            .filter_map(|path| {
                let stem = path.file_stem()?.to_str()?;
                let language = stem.strip_prefix(CATALOG_PREFIX)?;
                (!language.is_empty()).then(|| language.to_string())
            })
            .collect();
        languages.sort();
        languages
    }

    fn catalog_path(&self, language: &str) -> PathBuf {
        self.locale_dir
            .join(format!("{CATALOG_PREFIX}{language}.{CATALOG_EXTENSION}"))
    }
}

fn candidates(language: &str) -> Vec<String> {
    let mut candidates = vec![language.to_string()];
    if let Some((base, _region)) = language.split_once('_') {
        candidates.push(base.to_string());
    }
    candidates
}

fn load_catalog(path: &Path) -> Result<HashMap<String, String>, I18nError> {
    let raw = fs::read_to_string(path).map_err(|source| I18nError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| I18nError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "tests/i18n_tests.rs"]
mod tests;
