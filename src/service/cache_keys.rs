//! Utilities for generating scan cache keys

use sha2::{Digest, Sha256};
use url::Url;

use crate::service::validator::prompts::VALIDATION_SYSTEM_PROMPT;

/// Generate cache key hash for a scan
///
/// The key is based on:
/// - the scanned URL, fragment removed
/// - judge model id
/// - rubric version (hash of the validation system prompt)
pub fn generate_scan_cache_key(url: &Url, model_id: &str) -> String {
    let mut normalized = url.clone();
    normalized.set_fragment(None);

    let prompt_version = hash_string(VALIDATION_SYSTEM_PROMPT);
    let key_components = format!("{}|{}|{}", normalized, model_id, prompt_version);

    hash_string(&key_components)
}

/// Hash a string to a hex string using SHA256
fn hash_string(s: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(s.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_key_is_stable_hex_sha256() {
        let a = generate_scan_cache_key(&url("https://example.com/post"), "gpt-4o-mini");
        let b = generate_scan_cache_key(&url("https://example.com/post"), "gpt-4o-mini");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_fragment_is_ignored_but_model_is_not() {
        let base = generate_scan_cache_key(&url("https://example.com/post"), "gpt-4o-mini");
        assert_eq!(
            base,
            generate_scan_cache_key(&url("https://example.com/post#faq"), "gpt-4o-mini")
        );
        assert_ne!(base, generate_scan_cache_key(&url("https://example.com/post"), "gpt-4o"));
        assert_ne!(
            base,
            generate_scan_cache_key(&url("https://example.com/other"), "gpt-4o-mini")
        );
    }

    #[test]
    fn test_hash_string_known_value() {
        assert_eq!(
            hash_string("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
