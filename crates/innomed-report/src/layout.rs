//! Text layout of the summary report.

use chrono::{DateTime, Utc};
use innomed_mit::Profile;
use serde_json::Value;

/// Wrap width in characters for 11pt Helvetica on A4 with 50pt margins.
pub const WRAP_COLUMNS: usize = 90;

#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    Title(String),
    Heading(String),
    Body(String),
    Blank,
}

/// The report content, top to bottom, before pagination.
pub fn report_lines(profile: &Profile, generated_at: DateTime<Utc>) -> Vec<Line> {
    let mut lines = vec![
        Line::Title("Molecule Innovation Twin Summary".into()),
        Line::Blank,
        Line::Body(format!("Molecule: {}", profile.molecule())),
        Line::Body(format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S UTC"))),
        Line::Body(format!("Innovation Score: {}/100", profile.innovation_score())),
        Line::Blank,
        Line::Heading("Highlights".into()),
    ];

    if profile.highlights().is_empty() {
        lines.push(Line::Body("No signals available".into()));
    }
    for h in profile.highlights() {
        push_wrapped(&mut lines, &format!("- {h}"));
    }

    if let Some(market) = profile.market() {
        lines.push(Line::Blank);
        lines.push(Line::Heading("Market".into()));
        if let Some(size) = market.market_size {
            lines.push(Line::Body(format!("market_size: {size}")));
        }
        if let Some(cagr) = market.cagr {
            lines.push(Line::Body(format!("cagr: {cagr}")));
        }
        for (key, value) in &market.extra {
            if let Some(text) = scalar_text(value) {
                push_wrapped(&mut lines, &format!("{key}: {text}"));
            }
        }
    }

    lines
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn push_wrapped(lines: &mut Vec<Line>, text: &str) {
    for chunk in wrap(text, WRAP_COLUMNS) {
        lines.push(Line::Body(chunk));
    }
}

/// Greedy word wrap; words longer than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(width);
            out.push(word.into_iter().collect());
            word = rest;
        }
        let word_len = word.len();
        let word: String = word.into_iter().collect();
        if !current.is_empty() && current.chars().count() + 1 + word_len > width {
            out.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() || out.is_empty() {
        out.push(current);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use innomed_mit::ProfileBuilder;
    use innomed_sources::SourcePayloads;
    use serde_json::json;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_header_and_score_line() {
        let payloads = SourcePayloads {
            market: json!({"market_size": 2.4e9, "cagr": 3.9, "forecast": "up", "regions": []}),
            ..Default::default()
        };
        let p = ProfileBuilder::default().build_at("metformin", &payloads, at()).unwrap();
        let lines = report_lines(&p, at());

        assert_eq!(lines[0], Line::Title("Molecule Innovation Twin Summary".into()));
        assert!(lines.contains(&Line::Body("Molecule: Metformin".into())));
        assert!(lines.contains(&Line::Body("Generated: 2025-06-01 12:00:00 UTC".into())));
        assert!(lines.contains(&Line::Body("Innovation Score: 30/100".into())));
        assert!(lines.contains(&Line::Body("- Market size: $2.40B".into())));
        assert!(lines.contains(&Line::Body("forecast: up".into())));
        // Non-scalar market values are left out
        assert!(!lines.iter().any(|l| matches!(l, Line::Body(b) if b.starts_with("regions"))));
    }

    #[test]
    fn test_empty_profile_has_placeholder_and_no_market_section() {
        let p = ProfileBuilder::default().build_at("X", &SourcePayloads::default(), at()).unwrap();
        let lines = report_lines(&p, at());
        assert!(lines.contains(&Line::Body("No signals available".into())));
        assert!(!lines.contains(&Line::Heading("Market".into())));
    }

    #[test]
    fn test_wrap_breaks_on_words() {
        assert_eq!(wrap("aa bb cc", 5), vec!["aa bb", "cc"]);
        assert_eq!(wrap("", 5), vec![""]);
        assert_eq!(wrap("abcdefgh", 3), vec!["abc", "def", "gh"]);
    }
}
