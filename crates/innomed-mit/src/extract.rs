//! Molecule resolution from free-text prompts.

pub const UNKNOWN_MOLECULE: &str = "Unknown Molecule";

const TRIGGER_WORDS: [&str; 5] = ["for", "about", "molecule", "drug", "compound"];

fn strip_punctuation(token: &str) -> &str {
    token.trim_matches(|c: char| !c.is_alphanumeric())
}

fn is_trigger(token: &str) -> bool {
    let word = strip_punctuation(token);
    TRIGGER_WORDS.iter().any(|t| t.eq_ignore_ascii_case(word))
}

/// Token following the first trigger word, with surrounding punctuation
/// removed. `"Analyse market for Metformin?"` → `Some("Metformin")`.
pub fn extract_molecule(prompt: &str) -> Option<String> {
    let tokens: Vec<&str> = prompt.split_whitespace().collect();
    tokens
        .windows(2)
        .filter(|pair| is_trigger(pair[0]))
        .map(|pair| strip_punctuation(pair[1]))
        .find(|candidate| !candidate.is_empty())
        .map(str::to_string)
}

/// Explicit non-blank molecule wins; otherwise extract; otherwise the
/// `"Unknown Molecule"` placeholder.
pub fn resolve_molecule(prompt: &str, molecule: Option<&str>) -> String {
    match molecule.map(str::trim).filter(|m| !m.is_empty()) {
        Some(m) => m.to_string(),
        None => extract_molecule(prompt).unwrap_or_else(|| UNKNOWN_MOLECULE.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_token_after_for() {
        assert_eq!(
            extract_molecule("Give me the innovation outlook for Metformin please"),
            Some("Metformin".into())
        );
    }

    #[test]
    fn test_other_triggers_and_case() {
        assert_eq!(extract_molecule("Tell me ABOUT aspirin"), Some("aspirin".into()));
        assert_eq!(extract_molecule("the drug Imatinib looks promising"), Some("Imatinib".into()));
        assert_eq!(extract_molecule("Compound: semaglutide"), Some("semaglutide".into()));
    }

    #[test]
    fn test_strips_surrounding_punctuation() {
        assert_eq!(extract_molecule("What about Ivermectin?"), Some("Ivermectin".into()));
        assert_eq!(extract_molecule("data for \"5-fluorouracil\","), Some("5-fluorouracil".into()));
    }

    #[test]
    fn test_no_trigger_or_trailing_trigger() {
        assert_eq!(extract_molecule("Metformin market outlook"), None);
        assert_eq!(extract_molecule("what is this for"), None);
        assert_eq!(extract_molecule(""), None);
    }

    #[test]
    fn test_skips_punctuation_only_candidates() {
        assert_eq!(extract_molecule("for -- about Aspirin"), Some("Aspirin".into()));
    }

    #[test]
    fn test_trigger_must_be_whole_word() {
        assert_eq!(extract_molecule("information format Aspirin"), None);
    }

    #[test]
    fn test_resolve_prefers_explicit_molecule() {
        assert_eq!(resolve_molecule("outlook for Aspirin", Some("Metformin")), "Metformin");
        assert_eq!(resolve_molecule("outlook for Aspirin", Some("   ")), "Aspirin");
        assert_eq!(resolve_molecule("outlook for Aspirin", None), "Aspirin");
        assert_eq!(resolve_molecule("no hint here", None), UNKNOWN_MOLECULE);
    }
}
