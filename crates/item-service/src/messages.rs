// File: src/messages.rs
// Purpose: Build the message catalog from the bundled and configured bundles

use crate::config::MessagesConfig;
use anyhow::{Context, Result};
use form_binding::{Locale, MessageCatalog};
use std::path::Path;
use tracing::info;

const BUNDLED: &[(Option<&str>, &str)] = &[
    (None, include_str!("../messages/errors.properties")),
    (Some("ko"), include_str!("../messages/errors_ko.properties")),
];

/// Catalog holding only the bundles compiled into the binary
pub fn bundled_catalog(default_locale: &str) -> Result<MessageCatalog> {
    let mut catalog = MessageCatalog::new(Locale::new(default_locale));
    for (locale, source) in BUNDLED {
        let locale = locale.map(Locale::new);
        let origin = match &locale {
            Some(locale) => format!("errors_{}.properties", locale),
            None => "errors.properties".to_string(),
        };
        catalog
            .add_properties(locale.as_ref(), source, &origin)
            .with_context(|| format!("Failed to load bundled messages {}", origin))?;
    }
    Ok(catalog)
}

/// Bundled catalog, overridden by any bundles found in the configured directory
pub fn load_catalog(config: &MessagesConfig) -> Result<MessageCatalog> {
    let mut catalog = bundled_catalog(&config.default_locale)?;
    if let Some(dir) = &config.dir {
        let files = catalog
            .load_dir(Path::new(dir), &config.basenames)
            .with_context(|| format!("Failed to load message bundles from {:?}", dir))?;
        info!(dir = %dir, files, "loaded message bundles");
    }
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use form_binding::FieldValue;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("required")]
    #[case("NotBlank")]
    #[case("NotNull")]
    #[case("Null")]
    #[case("range")]
    #[case("Range")]
    #[case("max")]
    #[case("Max")]
    #[case("totalPriceMin")]
    #[case("typeMismatch")]
    #[case("idMismatch")]
    fn test_bundled_keys_present(#[case] key: &str) {
        let catalog = bundled_catalog("en").unwrap();
        assert!(catalog.lookup(key, &Locale::new("en")).is_some(), "missing {}", key);
        assert!(catalog.lookup(key, &Locale::new("ko")).is_some(), "missing ko {}", key);
    }

    #[test]
    fn test_specific_key_beats_generic() {
        let catalog = bundled_catalog("en").unwrap();
        let keys: Vec<String> = ["required.item.itemName", "required.itemName", "required"]
            .iter()
            .map(|k| k.to_string())
            .collect();
        assert_eq!(
            catalog.resolve_keys(&keys, &[], None, &Locale::new("en")),
            "Item name is required."
        );
    }

    #[test]
    fn test_total_price_message() {
        let catalog = bundled_catalog("en").unwrap();
        let message = catalog
            .message(
                "totalPriceMin",
                &[FieldValue::Int(10_000), FieldValue::Int(5_000)],
                &Locale::new("en"),
            )
            .unwrap();
        assert_eq!(
            message,
            "The total of price * quantity must be at least 10,000. Current value = 5,000"
        );
    }

    #[test]
    fn test_missing_dir_is_an_error() {
        let config = MessagesConfig {
            dir: Some("no-such-messages-dir".to_string()),
            ..MessagesConfig::default()
        };
        assert!(load_catalog(&config).is_err());
    }
}
