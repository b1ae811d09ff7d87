use async_trait::async_trait;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, User, UserPatch};

/// Repository trait for User storage.
///
/// Implementations must make each mutation, including its email uniqueness
/// check, atomic with respect to the others.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users in ascending id order
    async fn list(&self) -> UserResult<Vec<User>>;

    /// Get a user by ID
    async fn get_by_id(&self, id: u64) -> UserResult<Option<User>>;

    /// Store a new user under the next id
    async fn create(&self, user: NewUser) -> UserResult<User>;

    /// Overwrite all mutable fields of an existing user
    async fn replace(&self, id: u64, user: NewUser) -> UserResult<User>;

    /// Overwrite only the fields present in `patch`
    async fn patch(&self, id: u64, patch: UserPatch) -> UserResult<User>;

    /// Remove a user, returning it if it existed
    async fn delete(&self, id: u64) -> UserResult<Option<User>>;

    /// Count stored users
    async fn count(&self) -> UserResult<usize>;
}

#[derive(Debug)]
struct Directory {
    users: BTreeMap<u64, User>,
    next_id: u64,
}

impl Directory {
    fn email_taken(&self, email: &str, except: Option<u64>) -> bool {
        self.users
            .values()
            .any(|u| Some(u.id) != except && u.email == email)
    }
}

impl Default for Directory {
    fn default() -> Self {
        Self {
            users: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// In-memory implementation of UserRepository.
///
/// All state sits behind one lock; clones share it.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    inner: Arc<RwLock<Directory>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository holding two demo users (ids 1 and 2); the next id is 3.
    pub fn with_demo_users() -> Self {
        let demo = [
            NewUser {
                name: "John Doe".to_string(),
                email: "john@example.com".to_string(),
                age: Some(json!(30)),
                phone: Some("+1234567890".to_string()),
            },
            NewUser {
                name: "Jane Smith".to_string(),
                email: "jane@example.com".to_string(),
                age: Some(json!(25)),
                phone: Some("+0987654321".to_string()),
            },
        ];

        let mut directory = Directory::default();
        for fields in demo {
            let user = User::new(directory.next_id, fields);
            directory.users.insert(user.id, user);
            directory.next_id += 1;
        }

        tracing::info!(users = directory.users.len(), "Loaded demo users");
        Self {
            inner: Arc::new(RwLock::new(directory)),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self) -> UserResult<Vec<User>> {
        let directory = self.inner.read().await;
        Ok(directory.users.values().cloned().collect())
    }

    async fn get_by_id(&self, id: u64) -> UserResult<Option<User>> {
        let directory = self.inner.read().await;
        Ok(directory.users.get(&id).cloned())
    }

    async fn create(&self, user: NewUser) -> UserResult<User> {
        let mut directory = self.inner.write().await;

        if directory.email_taken(&user.email, None) {
            return Err(UserError::DuplicateEmail(user.email));
        }

        let user = User::new(directory.next_id, user);
        directory.next_id += 1;
        directory.users.insert(user.id, user.clone());

        tracing::info!(user_id = user.id, email = %user.email, "Created user");
        Ok(user)
    }

    async fn replace(&self, id: u64, user: NewUser) -> UserResult<User> {
        let mut directory = self.inner.write().await;

        if !directory.users.contains_key(&id) {
            return Err(UserError::NotFound(id));
        }
        if directory.email_taken(&user.email, Some(id)) {
            return Err(UserError::DuplicateEmail(user.email));
        }

        let stored = directory
            .users
            .get_mut(&id)
            .ok_or(UserError::NotFound(id))?;
        stored.replace(user);

        tracing::info!(user_id = id, "Replaced user");
        Ok(stored.clone())
    }

    async fn patch(&self, id: u64, patch: UserPatch) -> UserResult<User> {
        let mut directory = self.inner.write().await;

        if !directory.users.contains_key(&id) {
            return Err(UserError::NotFound(id));
        }
        if let Some(Some(email)) = &patch.email {
            if directory.email_taken(email, Some(id)) {
                return Err(UserError::DuplicateEmail(email.clone()));
            }
        }

        let stored = directory
            .users
            .get_mut(&id)
            .ok_or(UserError::NotFound(id))?;
        stored.apply_patch(patch);

        tracing::info!(user_id = id, "Patched user");
        Ok(stored.clone())
    }

    async fn delete(&self, id: u64) -> UserResult<Option<User>> {
        let mut directory = self.inner.write().await;

        let removed = directory.users.remove(&id);
        if removed.is_some() {
            tracing::info!(user_id = id, "Deleted user");
        }
        Ok(removed)
    }

    async fn count(&self) -> UserResult<usize> {
        Ok(self.inner.read().await.users.len())
    }
}
