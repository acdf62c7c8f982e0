//! URL utilities for resolving document-relative references.
//!
//! Resolution failures never abort a parse: the original string is returned
//! and the failure is logged at warning level.

use tracing::warn;
use url::Url;

/// Resolve `uri` against `base_uri`, leaving fragment links alone when the
/// base matches the document URI.
///
/// Returns the original string when the base or the reference cannot be
/// parsed.
#[must_use]
pub fn to_absolute_uri(uri: &str, base_uri: &str, document_uri: &str) -> String {
    let uri = uri.trim();
    if uri.is_empty() {
        return String::new();
    }

    // Leave hash links alone if the base URI matches the document URI.
    if base_uri == document_uri && uri.starts_with('#') {
        return uri.to_string();
    }

    let Ok(base) = Url::parse(base_uri) else {
        warn!(base_uri, "cannot parse base URI, keeping original reference");
        return uri.to_string();
    };

    match base.join(uri) {
        Ok(resolved) => resolved.to_string(),
        Err(err) => {
            warn!(uri, %err, "cannot resolve reference, keeping original");
            uri.to_string()
        }
    }
}
