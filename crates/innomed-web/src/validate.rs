//! Request validation for `/query` and `/stream-query`.
//!
//! Every rule is checked and all failures are reported together.

use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

/// Letters, digits, whitespace, hyphens and parentheses.
fn molecule_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9\s\-\(\)]+$").unwrap())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryLimits {
    pub max_molecule_length: usize,
    pub max_prompt_length: usize,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self { max_molecule_length: 100, max_prompt_length: 2000 }
    }
}

/// Body of `POST /query`; also the query string of `/stream-query`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub molecule: Option<String>,
}

/// A request that passed validation, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidQuery {
    pub prompt: String,
    pub molecule: Option<String>,
}

pub fn validate_query(req: &QueryRequest, limits: &QueryLimits) -> Result<ValidQuery, Vec<String>> {
    let mut errors = Vec::new();

    let molecule = req.molecule.as_deref().map(str::trim);
    if let Some(m) = molecule {
        if m.is_empty() {
            errors.push("Molecule name must not be blank".to_string());
        } else if m.chars().count() > limits.max_molecule_length {
            errors.push(format!(
                "Molecule name is too long (max {} characters)",
                limits.max_molecule_length
            ));
        } else if !molecule_pattern().is_match(m) {
            errors.push("Molecule name contains invalid characters".to_string());
        }
    }

    let prompt = req.prompt.as_deref().map(str::trim).unwrap_or_default();
    if prompt.is_empty() {
        errors.push("Prompt is required".to_string());
    } else if prompt.chars().count() > limits.max_prompt_length {
        errors.push(format!("Prompt is too long (max {} characters)", limits.max_prompt_length));
    }

    if errors.is_empty() {
        Ok(ValidQuery { prompt: prompt.to_string(), molecule: molecule.map(str::to_string) })
    } else {
        Err(errors)
    }
}
