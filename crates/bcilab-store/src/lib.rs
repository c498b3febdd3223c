pub mod error;
pub mod memory;
pub mod records;

use bcilab_types::models::{NewStarredResult, StarredResult, User};

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;

/// Credential records keyed by user id, unique by username.
pub trait AccountStore: Send + Sync {
    /// Insert a new user under the next sequential id. Fails with
    /// [`StoreError::UsernameTaken`] if the username already exists; the
    /// check and the insert are one atomic step.
    fn create_user(&self, username: &str, password_hash: &str) -> StoreResult<User>;

    fn get_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    fn get_user_by_id(&self, id: &str) -> StoreResult<Option<User>>;
}

/// Per-user ordered lists of starred results.
pub trait StarredStore: Send + Sync {
    /// Append a new record built by [`records::assemble`] and return it.
    fn add_result(&self, user_id: &str, draft: NewStarredResult) -> StoreResult<StarredResult>;

    /// Remove every record with `result_id`. Returns whether anything was
    /// removed; a miss is not an error.
    fn remove_result(&self, user_id: &str, result_id: &str) -> StoreResult<bool>;

    /// The user's records in insertion order, empty for unknown users.
    fn list_results(&self, user_id: &str) -> StoreResult<Vec<StarredResult>>;

    /// Rename the first record with `result_id`. Returns `false` if none matched.
    fn rename_result(&self, user_id: &str, result_id: &str, name: &str) -> StoreResult<bool>;
}
