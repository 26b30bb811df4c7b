//! Canonical query-string serialization.
//!
//! The format is `key=value` pairs joined by `&`, in key order of first
//! appearance and value order within a key. Multi-valued keys are repeated
//! rather than comma-joined. Encoding follows the WHATWG
//! `application/x-www-form-urlencoded` rules: space becomes `+`, and every
//! byte outside `A-Z a-z 0-9 * - . _` is percent-escaped (so `,` is `%2C`).

use url::form_urlencoded;
use url::Url;

use crate::params::CanonicalParams;

/// Serialize `params` into a canonical, percent-encoded query string.
pub fn serialize(params: &CanonicalParams) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, values) in params {
        for value in values {
            serializer.append_pair(key, value);
        }
    }
    serializer.finish()
}

/// Append the serialized `params` to `base`, after any query the base
/// already carries.
pub fn with_query(base: &Url, params: &CanonicalParams) -> Url {
    let mut url = base.clone();
    let query = serialize(params);
    if query.is_empty() {
        return url;
    }

    match base.query() {
        Some(existing) if !existing.is_empty() => {
            url.set_query(Some(&format!("{existing}&{query}")));
        }
        _ => url.set_query(Some(&query)),
    }
    url
}
