// File: src/catalog.rs
// Purpose: Localized message lookup with positional placeholders

use crate::errors::{join_args, MessageSourceResolvable};
use crate::value::FieldValue;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(\d+)\}").expect("placeholder pattern is valid"));

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read message bundle {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{origin}:{line}: expected `key=template`, found {content:?}")]
    Malformed {
        origin: String,
        line: usize,
        content: String,
    },
}

/// A language tag such as `en`, `ko` or `ko_KR`, stored normalized
/// (lowercase, `_` separated)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale(String);

impl Locale {
    pub fn new(tag: &str) -> Self {
        Self(tag.trim().replace('-', "_").to_lowercase())
    }

    pub fn tag(&self) -> &str {
        &self.0
    }

    /// Primary language subtag (`ko` for `ko_kr`)
    pub fn language(&self) -> &str {
        self.0.split('_').next().unwrap_or(&self.0)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::new("en")
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Replace `{0}`, `{1}`, ... with the matching argument.
///
/// Placeholders without a matching argument are left untouched.
pub fn format_message(template: &str, args: &[FieldValue]) -> String {
    if args.is_empty() {
        return template.to_string();
    }
    PLACEHOLDER
        .replace_all(template, |caps: &regex::Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|i| args.get(i))
                .map(FieldValue::to_message_string)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Key/template bundles per locale.
///
/// Read-only once built; share it behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    /// Keyed by locale tag; `""` is the base bundle
    bundles: HashMap<String, HashMap<String, String>>,
    default_locale: Locale,
}

impl MessageCatalog {
    pub fn new(default_locale: Locale) -> Self {
        Self {
            bundles: HashMap::new(),
            default_locale,
        }
    }

    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    /// Parse properties text into the bundle for `locale` (`None` for the
    /// base bundle). Later entries override earlier ones.
    ///
    /// Returns the number of entries read.
    pub fn add_properties(
        &mut self,
        locale: Option<&Locale>,
        source: &str,
        origin: &str,
    ) -> Result<usize, CatalogError> {
        let key = locale.map(|l| l.tag().to_string()).unwrap_or_default();
        let entries = parse_properties(source, origin)?;
        let count = entries.len();
        self.bundles.entry(key).or_default().extend(entries);
        Ok(count)
    }

    /// Load `<basename>.properties` and `<basename>_<locale>.properties`
    /// files from `dir`. Returns how many files were read.
    pub fn load_dir(&mut self, dir: &Path, basenames: &[String]) -> Result<usize, CatalogError> {
        let mut files: Vec<(PathBuf, Option<Locale>)> = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_err(dir))? {
            let path = entry.map_err(io_err(dir))?.path();
            let Some(stem) = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| n.strip_suffix(".properties"))
            else {
                continue;
            };
            let matched = basenames.iter().find_map(|base| {
                if stem == base {
                    Some(None)
                } else {
                    stem.strip_prefix(base.as_str())
                        .and_then(|rest| rest.strip_prefix('_'))
                        .filter(|tag| !tag.is_empty())
                        .map(|tag| Some(Locale::new(tag)))
                }
            });
            if let Some(locale) = matched {
                files.push((path, locale));
            }
        }

        // Base bundles first, then by name, so overrides are deterministic
        files.sort_by(|a, b| (a.1.is_some(), &a.0).cmp(&(b.1.is_some(), &b.0)));

        for (path, locale) in &files {
            let source = fs::read_to_string(path).map_err(io_err(path))?;
            let origin = path.display().to_string();
            let count = self.add_properties(locale.as_ref(), &source, &origin)?;
            debug!(file = %origin, entries = count, "loaded message bundle");
        }
        Ok(files.len())
    }

    /// Raw template for `key`, walking the locale fallback chain
    pub fn lookup(&self, key: &str, locale: &Locale) -> Option<&str> {
        self.fallback_chain(locale)
            .iter()
            .filter_map(|tag| self.bundles.get(tag.as_str()))
            .find_map(|bundle| bundle.get(key))
            .map(String::as_str)
    }

    /// Formatted message for a single key
    pub fn message(&self, key: &str, args: &[FieldValue], locale: &Locale) -> Option<String> {
        self.lookup(key, locale)
            .map(|template| format_message(template, args))
    }

    /// First key that resolves wins; then the default message; then the first
    /// key itself with its arguments appended.
    pub fn resolve_keys(
        &self,
        keys: &[String],
        args: &[FieldValue],
        default_message: Option<&str>,
        locale: &Locale,
    ) -> String {
        if let Some(message) = keys.iter().find_map(|key| self.message(key, args, locale)) {
            return message;
        }
        if let Some(default) = default_message {
            return format_message(default, args);
        }
        match keys.first() {
            Some(key) if args.is_empty() => key.clone(),
            Some(key) => format!("{} [{}]", key, join_args(args)),
            None => String::new(),
        }
    }

    pub fn resolve(&self, resolvable: &dyn MessageSourceResolvable, locale: &Locale) -> String {
        self.resolve_keys(
            resolvable.codes(),
            resolvable.arguments(),
            resolvable.default_message(),
            locale,
        )
    }

    fn fallback_chain(&self, locale: &Locale) -> Vec<String> {
        let mut chain: Vec<String> = Vec::with_capacity(5);
        let candidates = [
            locale.tag(),
            locale.language(),
            self.default_locale.tag(),
            self.default_locale.language(),
            "",
        ];
        for tag in candidates {
            if !chain.iter().any(|t| t == tag) {
                chain.push(tag.to_string());
            }
        }
        chain
    }
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> CatalogError {
    let path = path.to_path_buf();
    move |source| CatalogError::Io { path, source }
}

fn parse_properties(source: &str, origin: &str) -> Result<Vec<(String, String)>, CatalogError> {
    let mut entries = Vec::new();
    for (index, line) in source.lines().enumerate() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }
        let Some((key, value)) = trimmed.split_once('=') else {
            return Err(CatalogError::Malformed {
                origin: origin.to_string(),
                line: index + 1,
                content: line.to_string(),
            });
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(CatalogError::Malformed {
                origin: origin.to_string(),
                line: index + 1,
                content: line.to_string(),
            });
        }
        entries.push((key.to_string(), value.trim().to_string()));
    }
    Ok(entries)
}
