//! Scripted provider for tests and local experiments.

use async_trait::async_trait;
use innomed_common::SourceKind;
use serde_json::Value;
use std::time::Duration;

use crate::DataSource;

#[derive(Debug, Clone)]
enum Behaviour {
    Respond(Value),
    Fail(String),
    Panic(String),
}

/// A provider that returns a fixed payload, a fixed error, or panics.
#[derive(Debug, Clone)]
pub struct StaticSource {
    kind: SourceKind,
    behaviour: Behaviour,
    delay: Option<Duration>,
}

impl StaticSource {
    pub fn ok(kind: SourceKind, payload: Value) -> Self {
        Self { kind, behaviour: Behaviour::Respond(payload), delay: None }
    }

    pub fn failing(kind: SourceKind, message: &str) -> Self {
        Self { kind, behaviour: Behaviour::Fail(message.to_string()), delay: None }
    }

    pub fn panicking(kind: SourceKind, message: &str) -> Self {
        Self { kind, behaviour: Behaviour::Panic(message.to_string()), delay: None }
    }

    /// Sleep before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl DataSource for StaticSource {
    fn kind(&self) -> SourceKind {
        self.kind
    }

    async fn fetch(&self, _molecule: &str) -> anyhow::Result<Value> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.behaviour {
            Behaviour::Respond(v) => Ok(v.clone()),
            Behaviour::Fail(msg) => Err(anyhow::anyhow!("{msg}")),
            Behaviour::Panic(msg) => panic!("{msg}"),
        }
    }
}
