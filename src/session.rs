//! In-memory conversation sessions keyed by user id
//!
//! Sessions are created lazily and live for the lifetime of the process.
//! There is no eviction and no persistence.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One role-tagged message in a transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Shared map of user key to ordered transcript
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Vec<Turn>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the session's transcript, creating an empty one if absent
    pub async fn get_or_create(&self, key: &str) -> Vec<Turn> {
        let mut sessions = self.sessions.write().await;
        sessions.entry(key.to_string()).or_default().clone()
    }

    /// Append a turn, creating the session if needed.
    ///
    /// Returns the transcript length after the append, which doubles as the
    /// position marker for [`SessionStore::remove_last_if`].
    pub async fn append(&self, key: &str, turn: Turn) -> usize {
        let mut sessions = self.sessions.write().await;
        let turns = sessions.entry(key.to_string()).or_default();
        turns.push(turn);
        turns.len()
    }

    /// Remove the last turn only if the transcript is still exactly as the
    /// caller left it: `position` turns long, ending in `turn`.
    pub async fn remove_last_if(&self, key: &str, position: usize, turn: &Turn) -> bool {
        let mut sessions = self.sessions.write().await;
        let Some(turns) = sessions.get_mut(key) else {
            return false;
        };
        if turns.len() == position && turns.last() == Some(turn) {
            turns.pop();
            true
        } else {
            false
        }
    }

    /// Reset a session to empty. Unknown keys are left alone.
    pub async fn clear(&self, key: &str) {
        if let Some(turns) = self.sessions.write().await.get_mut(key) {
            turns.clear();
        }
    }

    /// Snapshot of a session's transcript; empty for unknown keys
    pub async fn read(&self, key: &str) -> Vec<Turn> {
        self.sessions
            .read()
            .await
            .get(key)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of known session keys, including emptied ones
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_read_unknown_key_is_empty() {
        let store = SessionStore::new();
        assert!(store.read("nobody").await.is_empty());
        // Reading never creates a session
        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_get_or_create_registers_key() {
        let store = SessionStore::new();
        assert!(store.get_or_create("u1").await.is_empty());
        assert_eq!(store.session_count().await, 1);

        store.append("u1", Turn::user("hi")).await;
        assert_eq!(store.get_or_create("u1").await, vec![Turn::user("hi")]);
        assert_eq!(store.session_count().await, 1);
    }

    #[tokio::test]
    async fn test_append_preserves_order() {
        let store = SessionStore::new();
        assert_eq!(store.append("u1", Turn::user("one")).await, 1);
        assert_eq!(store.append("u1", Turn::assistant("two")).await, 2);
        assert_eq!(store.append("u1", Turn::user("three")).await, 3);

        let turns = store.read("u1").await;
        let contents: Vec<_> = turns.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, ["one", "two", "three"]);
    }

    #[tokio::test]
    async fn test_clear_empties_but_keeps_key() {
        let store = SessionStore::new();
        store.append("u1", Turn::user("hello")).await;
        store.clear("u1").await;
        assert!(store.read("u1").await.is_empty());
        assert_eq!(store.session_count().await, 1);
    }

    #[tokio::test]
    async fn test_clear_unknown_key_is_noop() {
        let store = SessionStore::new();
        store.clear("ghost").await;
        assert!(store.read("ghost").await.is_empty());
        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_remove_last_if_matches_position_and_turn() {
        let store = SessionStore::new();
        let turn = Turn::user("hello");
        let position = store.append("u1", turn.clone()).await;

        assert!(store.remove_last_if("u1", position, &turn).await);
        assert!(store.read("u1").await.is_empty());
        // Second attempt has nothing to remove
        assert!(!store.remove_last_if("u1", position, &turn).await);
    }

    #[tokio::test]
    async fn test_remove_last_if_skips_when_tail_moved() {
        let store = SessionStore::new();
        let turn = Turn::user("hello");
        let position = store.append("u1", turn.clone()).await;
        store.append("u1", Turn::user("someone else")).await;

        assert!(!store.remove_last_if("u1", position, &turn).await);
        assert_eq!(store.read("u1").await.len(), 2);
    }

    #[tokio::test]
    async fn test_remove_last_if_skips_after_clear() {
        let store = SessionStore::new();
        let turn = Turn::user("hello");
        let position = store.append("u1", turn.clone()).await;
        store.clear("u1").await;

        assert!(!store.remove_last_if("u1", position, &turn).await);
        assert!(!store.remove_last_if("missing", 1, &turn).await);
    }

    #[tokio::test]
    async fn test_concurrent_appends_lose_nothing() {
        let store = Arc::new(SessionStore::new());
        let mut handles = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                for j in 0..25 {
                    store.append(&format!("user-{}", i % 4), Turn::user(format!("{i}-{j}"))).await;
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.session_count().await, 4);
        for k in 0..4 {
            assert_eq!(store.read(&format!("user-{k}")).await.len(), 100);
        }
    }

    #[test]
    fn test_turn_serialization() {
        let json = serde_json::to_value(Turn::assistant("Let's talk about it.")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"role": "assistant", "content": "Let's talk about it."})
        );
        let turn: Turn = serde_json::from_value(serde_json::json!({"role": "user", "content": "hi"})).unwrap();
        assert_eq!(turn, Turn::user("hi"));
    }
}
