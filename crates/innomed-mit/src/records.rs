//! Typed views over loosely-typed provider payloads.
//!
//! Known keys are lifted into typed optional fields; everything else is kept
//! verbatim in `extra`. A missing key and a key of the wrong type are the
//! same thing: absent. Wrong-typed values stay in `extra` so nothing the
//! provider sent is lost.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type RecordMap = Map<String, Value>;

/// Split `key` out of `map` if it converts with `f`; leave it otherwise.
fn take_typed<T>(map: &mut RecordMap, key: &str, f: impl Fn(&Value) -> Option<T>) -> Option<T> {
    let typed = map.get(key).and_then(f)?;
    map.remove(key);
    Some(typed)
}

/// Object payloads only; anything else is absent.
pub fn record_map(value: &Value) -> Option<RecordMap> {
    value.as_object().cloned()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cagr: Option<f64>,
    #[serde(flatten)]
    pub extra: RecordMap,
}

impl MarketRecord {
    pub fn from_value(value: &Value) -> Option<Self> {
        let mut extra = record_map(value)?;
        let market_size = take_typed(&mut extra, "market_size", Value::as_f64);
        let cagr = take_typed(&mut extra, "cagr", Value::as_f64);
        Some(Self { market_size, cagr, extra })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatentRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: RecordMap,
}

impl PatentRecord {
    /// Exact, case-sensitive match on the literal `"expired"`.
    pub fn is_expired(&self) -> bool {
        self.status.as_deref() == Some("expired")
    }

    pub fn from_value(value: &Value) -> Option<Self> {
        let mut extra = record_map(value)?;
        let status = take_typed(&mut extra, "status", |v| v.as_str().map(str::to_string));
        Some(Self { status, extra })
    }

    /// Array payloads only; non-object entries are skipped.
    pub fn list_from_value(value: &Value) -> Vec<Self> {
        value
            .as_array()
            .map(|items| items.iter().filter_map(Self::from_value).collect())
            .unwrap_or_default()
    }
}

/// Trial entries are kept exactly as the registry sent them; the phase is
/// only interpreted for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    #[serde(flatten)]
    pub extra: RecordMap,
}

impl TrialRecord {
    pub fn from_value(value: &Value) -> Option<Self> {
        record_map(value).map(|extra| Self { extra })
    }

    /// Phase as display text. Bare numbers (e.g. `3`) render as `"3"`.
    pub fn phase(&self) -> Option<String> {
        match self.extra.get("phase")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn list_from_value(value: &Value) -> Vec<Self> {
        value
            .as_array()
            .map(|items| items.iter().filter_map(Self::from_value).collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebRecord {
    #[serde(default)]
    pub top_papers: Vec<Value>,
    #[serde(flatten)]
    pub extra: RecordMap,
}

impl WebRecord {
    pub fn from_value(value: &Value) -> Option<Self> {
        let mut extra = record_map(value)?;
        let top_papers = take_typed(&mut extra, "top_papers", |v| v.as_array().cloned())
            .unwrap_or_default();
        Some(Self { top_papers, extra })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_market_lifts_known_keys() {
        let m = MarketRecord::from_value(&json!({
            "market_size": 1_500_000_000u64,
            "cagr": 4.5,
            "forecast": "up"
        }))
        .unwrap();
        assert_eq!(m.market_size, Some(1.5e9));
        assert_eq!(m.cagr, Some(4.5));
        assert_eq!(m.extra.get("forecast"), Some(&json!("up")));
        assert!(!m.extra.contains_key("market_size"));
    }

    #[test]
    fn test_wrong_type_is_absent_but_preserved() {
        let m = MarketRecord::from_value(&json!({"market_size": "huge"})).unwrap();
        assert_eq!(m.market_size, None);
        assert_eq!(m.extra.get("market_size"), Some(&json!("huge")));
    }

    #[test]
    fn test_non_object_market_is_absent() {
        assert!(MarketRecord::from_value(&json!([1, 2, 3])).is_none());
        assert!(MarketRecord::from_value(&json!(42)).is_none());
        assert!(MarketRecord::from_value(&Value::Null).is_none());
    }

    #[test]
    fn test_patent_list_tolerates_garbage() {
        let patents = PatentRecord::list_from_value(&json!([
            {"status": "expired"},
            "not a record",
            {"status": 7},
            {"status": "Expired"}
        ]));
        assert_eq!(patents.len(), 3);
        assert!(patents[0].is_expired());
        assert!(!patents[1].is_expired());
        assert!(!patents[2].is_expired(), "comparison is case-sensitive");

        assert!(PatentRecord::list_from_value(&json!({"status": "expired"})).is_empty());
    }

    #[test]
    fn test_trial_phase_forms() {
        let trials = TrialRecord::list_from_value(&json!([
            {"phase": "Phase 2"},
            {"phase": 3},
            {"phase": null},
            {}
        ]));
        let phases: Vec<Option<String>> = trials.iter().map(TrialRecord::phase).collect();
        assert_eq!(
            phases,
            vec![Some("Phase 2".to_string()), Some("3".to_string()), None, None]
        );
    }

    #[test]
    fn test_numeric_phase_serialises_unchanged() {
        let raw = json!({"id": "NCT001", "phase": 3});
        let trial = TrialRecord::from_value(&raw).unwrap();
        assert_eq!(trial.phase().as_deref(), Some("3"));
        assert_eq!(serde_json::to_value(&trial).unwrap(), raw);
    }

    #[test]
    fn test_web_without_papers() {
        let w = WebRecord::from_value(&json!({"search_results_count": 10})).unwrap();
        assert!(w.top_papers.is_empty());
        let w = WebRecord::from_value(&json!({"top_papers": "none"})).unwrap();
        assert!(w.top_papers.is_empty());
    }

    #[test]
    fn test_serialises_back_to_flat_shape() {
        let m = MarketRecord::from_value(&json!({"market_size": 10.0, "regions": []})).unwrap();
        assert_eq!(serde_json::to_value(&m).unwrap(), json!({"market_size": 10.0, "regions": []}));
    }
}
