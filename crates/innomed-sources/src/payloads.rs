//! The six raw provider payloads for one query.

use innomed_common::SourceKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::safe::SourceOutcome;

/// Raw provider outputs, one slot per domain. Every slot always holds
/// either real data or the domain's neutral value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcePayloads {
    pub market: Value,
    pub trade: Value,
    pub patents: Value,
    pub trials: Value,
    pub web: Value,
    pub internal: Value,
}

impl Default for SourcePayloads {
    fn default() -> Self {
        Self {
            market:   SourceKind::Market.neutral(),
            trade:    SourceKind::Trade.neutral(),
            patents:  SourceKind::Patents.neutral(),
            trials:   SourceKind::Trials.neutral(),
            web:      SourceKind::Web.neutral(),
            internal: SourceKind::Internal.neutral(),
        }
    }
}

impl SourcePayloads {
    pub fn get(&self, kind: SourceKind) -> &Value {
        match kind {
            SourceKind::Market   => &self.market,
            SourceKind::Trade    => &self.trade,
            SourceKind::Patents  => &self.patents,
            SourceKind::Trials   => &self.trials,
            SourceKind::Web      => &self.web,
            SourceKind::Internal => &self.internal,
        }
    }

    pub fn set(&mut self, kind: SourceKind, value: Value) {
        let slot = match kind {
            SourceKind::Market   => &mut self.market,
            SourceKind::Trade    => &mut self.trade,
            SourceKind::Patents  => &mut self.patents,
            SourceKind::Trials   => &mut self.trials,
            SourceKind::Web      => &mut self.web,
            SourceKind::Internal => &mut self.internal,
        };
        *slot = value;
    }

    /// Builder-style `set`.
    pub fn with(mut self, kind: SourceKind, value: Value) -> Self {
        self.set(kind, value);
        self
    }

    /// Collect outcomes into slots; failed outcomes leave the neutral value.
    pub fn from_outcomes(outcomes: &[SourceOutcome]) -> Self {
        let mut payloads = Self::default();
        for outcome in outcomes {
            payloads.set(outcome.kind, outcome.value_or_neutral());
        }
        payloads
    }
}
