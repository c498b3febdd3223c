use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;
use tracing::{debug, info};

use bcilab_types::models::{NewStarredResult, StarredResult, User};

use crate::error::{StoreError, StoreResult};
use crate::records;
use crate::{AccountStore, StarredStore};

#[derive(Default)]
struct State {
    users: HashMap<String, User>,
    next_user_id: u64,
    starred: HashMap<String, Vec<StarredResult>>,
}

/// Process-memory repository. Every operation runs as one critical section,
/// and all data is lost when the process exits.
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        info!("In-memory store initialised; data will not survive a restart");
        Self {
            state: Mutex::new(State {
                next_user_id: 1,
                ..State::default()
            }),
        }
    }

    fn with_state<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&mut State) -> StoreResult<T>,
    {
        let mut state = self
            .state
            .lock()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;
        f(&mut state)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountStore for MemoryStore {
    fn create_user(&self, username: &str, password_hash: &str) -> StoreResult<User> {
        self.with_state(|state| {
            if state.users.values().any(|u| u.username == username) {
                return Err(StoreError::UsernameTaken);
            }

            let id = state.next_user_id.to_string();
            state.next_user_id += 1;

            let user = User {
                id: id.clone(),
                username: username.to_string(),
                password_hash: password_hash.to_string(),
            };
            state.users.insert(id.clone(), user.clone());
            state.starred.insert(id, Vec::new());
            Ok(user)
        })
    }

    fn get_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        self.with_state(|state| {
            Ok(state
                .users
                .values()
                .find(|u| u.username == username)
                .cloned())
        })
    }

    fn get_user_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        self.with_state(|state| Ok(state.users.get(id).cloned()))
    }
}

impl StarredStore for MemoryStore {
    fn add_result(&self, user_id: &str, draft: NewStarredResult) -> StoreResult<StarredResult> {
        self.with_state(|state| {
            let list = state.starred.entry(user_id.to_string()).or_default();
            let record = records::assemble(user_id, list.len(), draft, Utc::now(), |id| {
                list.iter().any(|r| r.id == id)
            });
            list.push(record.clone());
            debug!(user_id, result_id = %record.id, "Starred result stored");
            Ok(record)
        })
    }

    fn remove_result(&self, user_id: &str, result_id: &str) -> StoreResult<bool> {
        self.with_state(|state| {
            let Some(list) = state.starred.get_mut(user_id) else {
                return Ok(false);
            };
            let before = list.len();
            list.retain(|r| r.id != result_id);
            Ok(list.len() != before)
        })
    }

    fn list_results(&self, user_id: &str) -> StoreResult<Vec<StarredResult>> {
        self.with_state(|state| Ok(state.starred.get(user_id).cloned().unwrap_or_default()))
    }

    fn rename_result(&self, user_id: &str, result_id: &str, name: &str) -> StoreResult<bool> {
        self.with_state(|state| {
            let record = state
                .starred
                .get_mut(user_id)
                .and_then(|list| list.iter_mut().find(|r| r.id == result_id));
            match record {
                Some(record) => {
                    record.name = name.to_string();
                    Ok(true)
                }
                None => Ok(false),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, Value, json};

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected a JSON object"),
        }
    }

    fn draft(modality: &str, name: Option<&str>) -> NewStarredResult {
        NewStarredResult {
            modality: modality.to_string(),
            parameters: object(json!({ "electrodes": 32, "noise": 5, "training": 10 })),
            metrics: object(json!({ "accuracy": 80, "latency": 93 })),
            name: name.map(str::to_string),
        }
    }

    #[test]
    fn user_ids_are_sequential_strings() {
        let store = MemoryStore::new();
        let a = store.create_user("alice", "hash-a").unwrap();
        let b = store.create_user("bob", "hash-b").unwrap();
        assert_eq!(a.id, "1");
        assert_eq!(b.id, "2");
        assert_eq!(store.get_user_by_id("2").unwrap().unwrap().username, "bob");
    }

    #[test]
    fn duplicate_username_is_rejected() {
        let store = MemoryStore::new();
        store.create_user("alice", "hash").unwrap();
        let err = store.create_user("alice", "other").unwrap_err();
        assert!(matches!(err, StoreError::UsernameTaken));
        // The failed attempt must not consume an id.
        assert_eq!(store.create_user("carol", "hash").unwrap().id, "2");
    }

    #[test]
    fn lookup_by_username() {
        let store = MemoryStore::new();
        store.create_user("alice", "hash").unwrap();
        assert!(store.get_user_by_username("alice").unwrap().is_some());
        assert!(store.get_user_by_username("mallory").unwrap().is_none());
    }

    #[test]
    fn new_user_starts_with_empty_list() {
        let store = MemoryStore::new();
        let user = store.create_user("alice", "hash").unwrap();
        assert!(store.list_results(&user.id).unwrap().is_empty());
        assert!(store.list_results("never-registered").unwrap().is_empty());
    }

    #[test]
    fn add_then_list_returns_record() {
        let store = MemoryStore::new();
        let created = store.add_result("1", draft("eeg", None)).unwrap();

        let listed = store.list_results("1").unwrap();
        assert_eq!(listed, vec![created.clone()]);
        assert!(created.id.starts_with("1_0_"));
        assert_eq!(created.name, "Configuration 1");
        assert_eq!(created.parameters["electrodes"], 32);
    }

    #[test]
    fn list_keeps_insertion_order() {
        let store = MemoryStore::new();
        let first = store.add_result("1", draft("eeg", Some("first"))).unwrap();
        let second = store.add_result("1", draft("emg", None)).unwrap();

        let names: Vec<_> = store
            .list_results("1")
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["first", "Configuration 2"]);
        assert_ne!(first.id, second.id);
        assert!(second.id.starts_with("1_1_"));
    }

    #[test]
    fn remove_missing_id_is_a_noop() {
        let store = MemoryStore::new();
        store.add_result("1", draft("eeg", None)).unwrap();

        assert!(!store.remove_result("1", "1_99_0.000000").unwrap());
        assert!(!store.remove_result("nobody", "x").unwrap());
        assert_eq!(store.list_results("1").unwrap().len(), 1);
    }

    #[test]
    fn remove_drops_matching_record() {
        let store = MemoryStore::new();
        let keep = store.add_result("1", draft("eeg", None)).unwrap();
        let gone = store.add_result("1", draft("ecog", None)).unwrap();

        assert!(store.remove_result("1", &gone.id).unwrap());
        assert_eq!(store.list_results("1").unwrap(), vec![keep]);
    }

    #[test]
    fn rename_touches_only_target() {
        let store = MemoryStore::new();
        let a = store.add_result("1", draft("eeg", Some("a"))).unwrap();
        let b = store.add_result("1", draft("emg", Some("b"))).unwrap();

        assert!(store.rename_result("1", &b.id, "renamed").unwrap());
        let listed = store.list_results("1").unwrap();
        assert_eq!(listed[0], a);
        assert_eq!(listed[1].name, "renamed");
        assert_eq!(listed[1].modality, b.modality);

        assert!(!store.rename_result("1", "missing", "x").unwrap());
    }

    #[test]
    fn lists_are_isolated_per_user() {
        let store = MemoryStore::new();
        let r = store.add_result("1", draft("eeg", None)).unwrap();

        assert!(store.list_results("2").unwrap().is_empty());
        // Another user cannot rename or remove it either.
        assert!(!store.rename_result("2", &r.id, "stolen").unwrap());
        assert!(!store.remove_result("2", &r.id).unwrap());
        assert_eq!(store.list_results("1").unwrap(), vec![r]);
    }
}
