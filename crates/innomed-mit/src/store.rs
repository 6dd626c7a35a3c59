//! Profile store: normalized molecule identifier → most recent profile.
//!
//! Writes overwrite unconditionally. Nothing expires; entries disappear only
//! through [`ProfileStore::clear`].

use std::collections::HashMap;

use async_trait::async_trait;
use innomed_common::{normalize_molecule, InnomedError, Result};
use tokio::sync::RwLock;
use tracing::debug;

use crate::profile::Profile;

#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Insert or replace the profile for `molecule`.
    async fn put(&self, molecule: &str, profile: Profile) -> Result<()>;

    /// Latest profile for `molecule`, `None` if never stored.
    async fn get(&self, molecule: &str) -> Option<Profile>;

    /// Drop every stored profile, returning how many were removed.
    async fn clear(&self) -> usize;

    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Stored identifiers, sorted.
    async fn molecules(&self) -> Vec<String>;
}

#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<String, Profile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn put(&self, molecule: &str, profile: Profile) -> Result<()> {
        let key = normalize_molecule(molecule);
        if key.is_empty() {
            return Err(InnomedError::Store("cannot store a profile under an empty key".into()));
        }
        let replaced = self.profiles.write().await.insert(key.clone(), profile).is_some();
        debug!(molecule = %key, replaced, "profile stored");
        Ok(())
    }

    async fn get(&self, molecule: &str) -> Option<Profile> {
        let key = normalize_molecule(molecule);
        self.profiles.read().await.get(&key).cloned()
    }

    async fn clear(&self) -> usize {
        let mut guard = self.profiles.write().await;
        let removed = guard.len();
        guard.clear();
        removed
    }

    async fn len(&self) -> usize {
        self.profiles.read().await.len()
    }

    async fn molecules(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.profiles.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ProfileBuilder;
    use innomed_sources::SourcePayloads;
    use serde_json::json;

    fn profile(molecule: &str, trials: usize) -> Profile {
        let trials: Vec<_> = (0..trials).map(|_| json!({})).collect();
        let payloads = SourcePayloads { trials: json!(trials), ..Default::default() };
        ProfileBuilder::default().build(molecule, &payloads).unwrap()
    }

    #[tokio::test]
    async fn test_case_equivalent_keys_overwrite() {
        let store = InMemoryProfileStore::new();
        let p1 = profile("Aspirin", 1);
        let p2 = profile("aspirin", 3);

        store.put("Aspirin", p1).await.unwrap();
        store.put("aspirin", p2.clone()).await.unwrap();

        assert_eq!(store.get("ASPIRIN").await, Some(p2));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_missing_key_is_none() {
        let store = InMemoryProfileStore::new();
        assert!(store.get("Nothing").await.is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_whitespace_is_ignored_in_keys() {
        let store = InMemoryProfileStore::new();
        store.put("  imatinib ", profile("Imatinib", 0)).await.unwrap();
        assert!(store.get("Imatinib").await.is_some());
        assert_eq!(store.molecules().await, vec!["Imatinib".to_string()]);
    }

    #[tokio::test]
    async fn test_clear_removes_everything() {
        let store = InMemoryProfileStore::new();
        store.put("Aspirin", profile("Aspirin", 0)).await.unwrap();
        store.put("Metformin", profile("Metformin", 0)).await.unwrap();
        assert_eq!(store.clear().await, 2);
        assert!(store.is_empty().await);
        assert!(store.get("Aspirin").await.is_none());
    }

    #[tokio::test]
    async fn test_blank_key_is_a_store_error() {
        let store = InMemoryProfileStore::new();
        let err = store.put(" ", profile("Aspirin", 0)).await.unwrap_err();
        assert!(matches!(err, InnomedError::Store(_)));
    }
}
