//! Molecule identifier normalisation.
//!
//! Storage and lookup keys must agree, so every entry point runs the same
//! trim + title-case pass before touching the profile store.

/// Trim surrounding whitespace and title-case the identifier.
/// `"  aspirin "` → `"Aspirin"`, `"ACETYLSALICYLIC ACID"` → `"Acetylsalicylic Acid"`.
pub fn normalize_molecule(raw: &str) -> String {
    title_case(raw.trim())
}

/// Title-case a string: the first letter of every run of letters is
/// upper-cased, the rest lower-cased. Digits and punctuation break runs,
/// so `"5-fluorouracil"` → `"5-Fluorouracil"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Truncate to at most `max` characters (not bytes).
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
