//! Human-readable summary lines for a profile.
//!
//! Order is fixed (market → patents → trials → web) and never depends on
//! which provider answered first.

use std::collections::BTreeSet;

use crate::records::{MarketRecord, PatentRecord, TrialRecord, WebRecord};

/// `$2.40B`, `$310.00M`, `$68,000`.
pub fn format_currency(amount: f64) -> String {
    if amount >= 1e9 {
        format!("${:.2}B", amount / 1e9)
    } else if amount >= 1e6 {
        format!("${:.2}M", amount / 1e6)
    } else {
        format!("${}", group_thousands(amount.round() as i64))
    }
}

/// One decimal place with a `%` suffix.
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn derive_highlights(
    market: Option<&MarketRecord>,
    patents: &[PatentRecord],
    trials: &[TrialRecord],
    web: Option<&WebRecord>,
) -> Vec<String> {
    let mut out = Vec::new();

    if let Some(market) = market {
        if let Some(size) = market.market_size {
            out.push(format!("Market size: {}", format_currency(size)));
            if let Some(cagr) = market.cagr {
                out.push(format!("Projected CAGR: {}", format_percent(cagr)));
            }
        }
    }

    if !patents.is_empty() {
        let active = patents.iter().filter(|p| !p.is_expired()).count();
        out.push(format!("{} patent documents identified", patents.len()));
        out.push(format!("{active} active (non-expired) patents"));
    }

    if !trials.is_empty() {
        out.push(format!("{} clinical trials found", trials.len()));
        let phases: BTreeSet<String> = trials.iter().filter_map(TrialRecord::phase).collect();
        if !phases.is_empty() {
            let joined: Vec<String> = phases.into_iter().collect();
            out.push(format!("Phases: {}", joined.join(", ")));
        }
    }

    if let Some(web) = web {
        if !web.top_papers.is_empty() {
            out.push(format!("{} top research papers", web.top_papers.len()));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_currency_tiers() {
        assert_eq!(format_currency(2_400_000_000.0), "$2.40B");
        assert_eq!(format_currency(1_000_000_000.0), "$1.00B");
        assert_eq!(format_currency(310_000_000.0), "$310.00M");
        assert_eq!(format_currency(1_000_000.0), "$1.00M");
        assert_eq!(format_currency(68_000.0), "$68,000");
        assert_eq!(format_currency(999.0), "$999");
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(1_234_567.0), "$1.23M");
        assert_eq!(format_currency(123_456.0), "$123,456");
    }

    #[test]
    fn test_percent_one_decimal() {
        assert_eq!(format_percent(3.9), "3.9%");
        assert_eq!(format_percent(5.0), "5.0%");
        assert_eq!(format_percent(12.345), "12.3%");
    }

    #[test]
    fn test_empty_inputs_give_no_highlights() {
        assert!(derive_highlights(None, &[], &[], None).is_empty());
    }

    #[test]
    fn test_market_without_size_is_silent_even_with_cagr() {
        let m = MarketRecord::from_value(&json!({"cagr": 4.0})).unwrap();
        assert!(derive_highlights(Some(&m), &[], &[], None).is_empty());
    }

    #[test]
    fn test_full_order_and_wording() {
        let market = MarketRecord::from_value(&json!({"market_size": 2.4e9, "cagr": 3.9})).unwrap();
        let patents = PatentRecord::list_from_value(&json!([
            {"status": "expired"}, {"status": "active"}, {}
        ]));
        let trials = TrialRecord::list_from_value(&json!([
            {"phase": "Phase 3"}, {"phase": "Phase 2"}, {"phase": "Phase 3"}, {"phase": null}
        ]));
        let web = WebRecord::from_value(&json!({"top_papers": [{}, {}]})).unwrap();

        let h = derive_highlights(Some(&market), &patents, &trials, Some(&web));
        assert_eq!(
            h,
            vec![
                "Market size: $2.40B",
                "Projected CAGR: 3.9%",
                "3 patent documents identified",
                "2 active (non-expired) patents",
                "4 clinical trials found",
                "Phases: Phase 2, Phase 3",
                "2 top research papers",
            ]
        );
    }

    #[test]
    fn test_trials_without_phases_skip_phase_line() {
        let trials = TrialRecord::list_from_value(&json!([{"nct_id": "NCT1"}]));
        assert_eq!(derive_highlights(None, &[], &trials, None), vec!["1 clinical trials found"]);
    }

    #[test]
    fn test_web_without_papers_is_silent() {
        let web = WebRecord::from_value(&json!({"search_results_count": 3})).unwrap();
        assert!(derive_highlights(None, &[], &[], Some(&web)).is_empty());
    }
}
