//! Key derivation for administrator-created nodes.
//!
//! When an administrator adds a category without supplying an explicit key,
//! one is derived from the display label: lowercased, diacritics folded to
//! their ASCII base, punctuation stripped, whitespace collapsed to
//! underscores, truncated to a bounded stem, and suffixed with a short
//! uniqueness token. Uniqueness among siblings is still the backend's call;
//! the token only makes accidental collisions unlikely.

use thiserror::Error;
use uuid::Uuid;

use crate::Key;

/// Maximum length of the label-derived stem, before the uniqueness token.
pub const KEY_STEM_MAX_LEN: usize = 40;

/// Upper bound on a derived key: stem plus `_` plus the 6-hex token.
pub const DERIVED_KEY_MAX_LEN: usize = KEY_STEM_MAX_LEN + 7;

#[derive(Debug, Error)]
pub enum KeyDerivationError {
    #[error("label must not be empty")]
    EmptyLabel,
}

/// Derive a sibling key from a display label.
///
/// The result contains only lowercase ASCII letters, digits, and
/// underscores, is non-empty, and is at most [`DERIVED_KEY_MAX_LEN`] long.
pub fn derive_key(label: &str) -> Result<Key, KeyDerivationError> {
    if label.trim().is_empty() {
        return Err(KeyDerivationError::EmptyLabel);
    }

    let mut stem = String::new();
    let mut pending_separator = false;
    for ch in label.chars().flat_map(fold_char) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_separator && !stem.is_empty() {
                stem.push('_');
            }
            pending_separator = false;
            stem.push(ch);
        } else if ch.is_whitespace() {
            pending_separator = true;
        }
        // punctuation and anything unmapped is dropped
        if stem.len() >= KEY_STEM_MAX_LEN {
            break;
        }
    }
    stem.truncate(KEY_STEM_MAX_LEN);
    while stem.ends_with('_') {
        stem.pop();
    }

    // Labels made purely of punctuation still need a usable stem.
    if stem.is_empty() {
        stem.push_str("element");
    }

    let token = Uuid::new_v4().simple().to_string();
    Ok(format!("{stem}_{}", &token[..6]))
}

/// Lowercase one character and fold common Latin diacritics to their ASCII
/// base. Unmapped non-ASCII characters pass through and are dropped by the
/// caller's charset filter.
fn fold_char(ch: char) -> impl Iterator<Item = char> {
    let folded = match ch {
        'ç' | 'Ç' => 'c',
        'ğ' | 'Ğ' => 'g',
        'ı' | 'I' => 'i',
        'İ' => 'i',
        'ö' | 'Ö' | 'ô' | 'ò' | 'ó' => 'o',
        'ş' | 'Ş' => 's',
        'ü' | 'Ü' | 'û' | 'ù' | 'ú' => 'u',
        'â' | 'à' | 'á' | 'ä' | 'Â' | 'Ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' | 'É' => 'e',
        'î' | 'ì' | 'í' | 'ï' => 'i',
        'ñ' => 'n',
        other => other,
    };
    folded.to_lowercase()
}
