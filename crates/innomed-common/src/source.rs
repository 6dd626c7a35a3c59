//! The six intelligence domains a molecule profile is assembled from.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Number of provider domains consulted for every profile build.
pub const AGENTS_USED: u32 = SourceKind::ALL.len() as u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Market size and growth (IQVIA-style)
    Market,
    /// Import/export flows (EXIM-style)
    Trade,
    /// Patent landscape
    Patents,
    /// Clinical trial registry
    Trials,
    /// Web and literature search
    Web,
    /// Internal documents and notes
    Internal,
}

impl SourceKind {
    /// All domains in profile field order.
    pub const ALL: [SourceKind; 6] = [
        SourceKind::Market,
        SourceKind::Trade,
        SourceKind::Patents,
        SourceKind::Trials,
        SourceKind::Web,
        SourceKind::Internal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Market   => "market",
            SourceKind::Trade    => "trade",
            SourceKind::Patents  => "patents",
            SourceKind::Trials   => "trials",
            SourceKind::Web      => "web",
            SourceKind::Internal => "internal",
        }
    }

    /// Whether this domain yields a sequence of records rather than a single record.
    pub fn is_list(&self) -> bool {
        matches!(self, SourceKind::Patents | SourceKind::Trials)
    }

    /// The value substituted when a provider fails: empty list or null.
    pub fn neutral(&self) -> Value {
        if self.is_list() {
            Value::Array(Vec::new())
        } else {
            Value::Null
        }
    }

    /// Whether a payload has the shape this domain is expected to return.
    /// Record domains accept an object (or null), list domains an array.
    pub fn accepts(&self, payload: &Value) -> bool {
        if self.is_list() {
            payload.is_array()
        } else {
            payload.is_object() || payload.is_null()
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_agents_used_is_six() {
        assert_eq!(AGENTS_USED, 6);
    }

    #[test]
    fn test_neutral_values() {
        assert_eq!(SourceKind::Patents.neutral(), json!([]));
        assert_eq!(SourceKind::Trials.neutral(), json!([]));
        assert_eq!(SourceKind::Market.neutral(), Value::Null);
        assert_eq!(SourceKind::Internal.neutral(), Value::Null);
    }

    #[test]
    fn test_shape_acceptance() {
        assert!(SourceKind::Market.accepts(&json!({"market_size": 1})));
        assert!(SourceKind::Web.accepts(&Value::Null));
        assert!(!SourceKind::Market.accepts(&json!([1, 2])));
        assert!(SourceKind::Trials.accepts(&json!([])));
        assert!(!SourceKind::Patents.accepts(&json!({"status": "expired"})));
    }

    #[test]
    fn test_serde_uses_snake_case_names() {
        assert_eq!(serde_json::to_string(&SourceKind::Internal).unwrap(), "\"internal\"");
        assert_eq!(SourceKind::Trade.to_string(), "trade");
    }
}
