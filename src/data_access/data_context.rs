//! User documents ↔ redb.
//!
//! One `users` table holds whole user documents (postcard-encoded, tasks
//! embedded). `users_by_email` is a non-unique index: one email may point at
//! several user ids, and lookups take the first one in key order.

use redb::{
    backends::InMemoryBackend, Database, MultimapTableDefinition, ReadableMultimapTable,
    ReadableTable, TableDefinition,
};
use std::sync::Arc;
#[cfg(feature = "profile")]
use std::time::Instant;

use crate::{
    gateway::UserGateway,
    store_error::StoreError,
    task::{NewTask, Task, TaskId, TaskPatch},
    user::User,
    user_add_request::UserAddRequest,
};

const USERS_TABLE: TableDefinition<&[u8], &[u8]> = TableDefinition::new("users");
const EMAIL_INDEX: MultimapTableDefinition<&str, &[u8]> =
    MultimapTableDefinition::new("users_by_email");

/// Thin handle to the redb database. Cloneable (Arc inside).
#[derive(Clone)]
pub struct DataContext {
    db: Arc<Database>,
}

impl DataContext {
    /// Open (or create) the database file at `path`.
    pub fn open(path: &str) -> Result<Self, StoreError> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// A database that lives and dies with this handle.
    pub fn in_memory() -> Result<Self, StoreError> {
        let db = Database::builder().create_with_backend(InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> Result<Self, StoreError> {
        // Ensure tables exist
        let txn = db.begin_write()?;
        {
            let _ = txn.open_table(USERS_TABLE)?;
            let _ = txn.open_multimap_table(EMAIL_INDEX)?;
        }
        txn.commit()?;

        Ok(DataContext { db: Arc::new(db) })
    }

    /// Insert the configured users if the store has none. Returns how many were created.
    pub fn ensure_seed_users(&self, seeds: &[UserAddRequest]) -> Result<usize, StoreError> {
        if !self.find_all()?.is_empty() {
            return Ok(0);
        }

        for seed in seeds {
            self.insert_user(seed.clone())?;
        }

        Ok(seeds.len())
    }

    /// Load the user behind `email`, let `change` mutate it, write it back.
    /// Read and write share one write transaction; an error from `change`
    /// drops the transaction uncommitted.
    fn modify_user<T>(
        &self,
        email: &str,
        change: impl FnOnce(&mut User) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        #[cfg(feature = "profile")]
        let start = Instant::now();
        let txn = self.db.begin_write()?;
        let outcome = {
            let index = txn.open_multimap_table(EMAIL_INDEX)?;
            let mut users = txn.open_table(USERS_TABLE)?;

            let id = first_user_id(&index, email)?
                .ok_or_else(|| StoreError::user_not_found(email))?;
            let mut user = match users.get(id.as_slice())? {
                Some(data) => decode(data.value())?,
                None => return Err(StoreError::user_not_found(email)),
            };

            let outcome = change(&mut user)?;
            users.insert(id.as_slice(), encode(&user)?.as_slice())?;
            outcome
        };
        txn.commit()?;
        #[cfg(feature = "profile")]
        tracing::debug!(elapsed_us = start.elapsed().as_micros() as u64, email, "user document rewritten");
        Ok(outcome)
    }
}

impl UserGateway for DataContext {
    fn find_all(&self) -> Result<Vec<User>, StoreError> {
        let txn = self.db.begin_read()?;
        let users_table = txn.open_table(USERS_TABLE)?;

        let mut users = Vec::new();
        for entry in users_table.iter()? {
            let (_, value) = entry?;
            users.push(decode(value.value())?);
        }
        Ok(users)
    }

    fn find_by_email(&self, email: &str) -> Result<User, StoreError> {
        let txn = self.db.begin_read()?;
        let index = txn.open_multimap_table(EMAIL_INDEX)?;
        let users = txn.open_table(USERS_TABLE)?;

        let id = first_user_id(&index, email)?.ok_or_else(|| StoreError::user_not_found(email))?;
        let user = match users.get(id.as_slice())? {
            Some(data) => decode(data.value())?,
            None => return Err(StoreError::user_not_found(email)),
        };
        Ok(user)
    }

    fn append_task(&self, email: &str, new_task: NewTask) -> Result<Vec<Task>, StoreError> {
        self.modify_user(email, |user| Ok(user.push_todo(new_task).to_vec()))
    }

    fn update_task(
        &self,
        email: &str,
        task_id: TaskId,
        patch: TaskPatch,
    ) -> Result<Task, StoreError> {
        self.modify_user(email, |user| {
            user.patch_todo(&task_id, patch)
                .cloned()
                .ok_or_else(|| StoreError::task_not_found(email, task_id))
        })
    }

    fn delete_task(&self, email: &str, task_id: TaskId) -> Result<(), StoreError> {
        self.modify_user(email, |user| {
            user.remove_todo(&task_id)
                .map(|_| ())
                .ok_or_else(|| StoreError::task_not_found(email, task_id))
        })
    }

    fn insert_user(&self, request: UserAddRequest) -> Result<User, StoreError> {
        let user = User::new(request);
        let txn = self.db.begin_write()?;
        {
            let mut users = txn.open_table(USERS_TABLE)?;
            let mut index = txn.open_multimap_table(EMAIL_INDEX)?;
            let id = user.id.as_bytes();
            users.insert(id.as_slice(), encode(&user)?.as_slice())?;
            index.insert(user.email.as_str(), id.as_slice())?;
        }
        txn.commit()?;
        Ok(user)
    }
}

fn first_user_id(
    index: &impl ReadableMultimapTable<&'static str, &'static [u8]>,
    email: &str,
) -> Result<Option<Vec<u8>>, StoreError> {
    let mut ids = index.get(email)?;
    let first = match ids.next() {
        Some(id) => Some(id?.value().to_vec()),
        None => None,
    };
    Ok(first)
}

fn encode(user: &User) -> Result<Vec<u8>, StoreError> {
    postcard::to_allocvec(user).map_err(|e| StoreError::Encode(e.to_string()))
}

fn decode(bytes: &[u8]) -> Result<User, StoreError> {
    postcard::from_bytes(bytes).map_err(|e| StoreError::Decode(e.to_string()))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn seed(email: &str) -> UserAddRequest {
        UserAddRequest {
            email: email.into(),
            first_name: Some("Alice".into()),
            last_name: None,
        }
    }

    fn milk() -> NewTask {
        NewTask {
            description: "Buy milk".into(),
            completed: false,
        }
    }

    fn store_with_alice() -> DataContext {
        let store = DataContext::in_memory().unwrap();
        store.insert_user(seed("alice@example.com")).unwrap();
        store
    }

    #[test]
    fn empty_store_lists_nothing() {
        let store = DataContext::in_memory().unwrap();
        assert!(store.find_all().unwrap().is_empty());
    }

    #[test]
    fn insert_then_find_by_email() {
        let store = store_with_alice();

        let user = store.find_by_email("alice@example.com").unwrap();
        assert_eq!(user.first_name.as_deref(), Some("Alice"));
        assert_eq!(store.find_all().unwrap().len(), 1);
    }

    #[test]
    fn unknown_email_is_user_not_found() {
        let store = store_with_alice();
        assert!(matches!(
            store.find_by_email("bob@example.com"),
            Err(StoreError::UserNotFound { ref email }) if email == "bob@example.com"
        ));
        assert!(matches!(
            store.append_task("bob@example.com", milk()),
            Err(StoreError::UserNotFound { .. })
        ));
    }

    #[test]
    fn append_task_persists_into_todo() {
        let store = store_with_alice();

        let todo = store.append_task("alice@example.com", milk()).unwrap();
        assert_eq!(todo.len(), 1);

        let todo = store.append_task("alice@example.com", milk()).unwrap();
        assert_eq!(todo.len(), 2);
        assert_ne!(todo[0].id, todo[1].id);

        let user = store.find_by_email("alice@example.com").unwrap();
        assert_eq!(user.todo, todo);
        assert!(user.doing.is_empty());
    }

    #[test]
    fn update_task_merges_fields() {
        let store = store_with_alice();
        let id = store.append_task("alice@example.com", milk()).unwrap()[0].id;

        let updated = store
            .update_task(
                "alice@example.com",
                id,
                TaskPatch {
                    description: None,
                    completed: Some(true),
                },
            )
            .unwrap();

        assert_eq!(updated.description, "Buy milk");
        assert!(updated.completed);
        let user = store.find_by_email("alice@example.com").unwrap();
        assert_eq!(user.todo_task(&id), Some(&updated));
    }

    #[test]
    fn missing_task_leaves_document_untouched() {
        let store = store_with_alice();
        store.append_task("alice@example.com", milk()).unwrap();
        let before = store.find_by_email("alice@example.com").unwrap();

        let missing = TaskId::new();
        assert!(matches!(
            store.update_task("alice@example.com", missing, TaskPatch::default()),
            Err(StoreError::TaskNotFound { task_id, .. }) if task_id == missing
        ));
        assert!(matches!(
            store.delete_task("alice@example.com", missing),
            Err(StoreError::TaskNotFound { .. })
        ));

        assert_eq!(store.find_by_email("alice@example.com").unwrap(), before);
    }

    #[test]
    fn delete_task_removes_it() {
        let store = store_with_alice();
        let id = store.append_task("alice@example.com", milk()).unwrap()[0].id;

        store.delete_task("alice@example.com", id).unwrap();

        let user = store.find_by_email("alice@example.com").unwrap();
        assert!(user.todo_task(&id).is_none());
        assert!(matches!(
            store.delete_task("alice@example.com", id),
            Err(StoreError::TaskNotFound { .. })
        ));
    }

    #[test]
    fn duplicate_emails_resolve_to_one_stable_user() {
        let store = DataContext::in_memory().unwrap();
        store.insert_user(seed("twin@example.com")).unwrap();
        store.insert_user(seed("twin@example.com")).unwrap();

        let first = store.find_by_email("twin@example.com").unwrap();
        let again = store.find_by_email("twin@example.com").unwrap();
        assert_eq!(first.id, again.id);

        let todo = store.append_task("twin@example.com", milk()).unwrap();
        assert_eq!(store.find_by_email("twin@example.com").unwrap().todo, todo);
        assert_eq!(store.find_all().unwrap().len(), 2);
    }

    #[test]
    fn seeding_only_fills_an_empty_store() {
        let store = DataContext::in_memory().unwrap();
        let seeds = [seed("alice@example.com"), seed("bob@example.com")];

        assert_eq!(store.ensure_seed_users(&seeds).unwrap(), 2);
        assert_eq!(store.ensure_seed_users(&seeds).unwrap(), 0);
        assert_eq!(store.find_all().unwrap().len(), 2);
    }

    #[test]
    fn file_store_survives_reopen() {
        let path = std::env::temp_dir()
            .join(format!("tasklists_test_reopen_{}.redb", std::process::id()));
        let path = path.to_str().unwrap().to_string();
        let _ = fs::remove_file(&path); // clean up any leftover

        {
            let store = DataContext::open(&path).unwrap();
            store.insert_user(seed("alice@example.com")).unwrap();
            store.append_task("alice@example.com", milk()).unwrap();
        }

        let store = DataContext::open(&path).unwrap();
        let user = store.find_by_email("alice@example.com").unwrap();
        assert_eq!(user.todo.len(), 1);
        assert_eq!(user.todo[0].description, "Buy milk");

        drop(store);
        let _ = fs::remove_file(&path);
    }
}
