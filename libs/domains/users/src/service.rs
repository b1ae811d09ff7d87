use std::sync::Arc;

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, User, UserField, UserPatch, UserPayload};
use crate::repository::UserRepository;

pub const NO_DATA_PROVIDED: &str = "No data provided";
pub const INVALID_EMAIL_FORMAT: &str = "Invalid email format";

/// Service layer for User business logic
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    required_fields: Vec<UserField>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self::with_required_fields(repository, UserField::DEFAULT_REQUIRED.to_vec())
    }

    /// Use a custom required-field set for create and full replace.
    ///
    /// `name` and `email` are always stored, so they stay required even when
    /// omitted from `required_fields`.
    pub fn with_required_fields(repository: R, required_fields: Vec<UserField>) -> Self {
        let mut fields = required_fields;
        for field in UserField::DEFAULT_REQUIRED.iter().rev() {
            if !fields.contains(field) {
                fields.insert(0, *field);
            }
        }

        Self {
            repository: Arc::new(repository),
            required_fields: fields,
        }
    }

    pub fn required_fields(&self) -> &[UserField] {
        &self.required_fields
    }

    /// List all users with their count
    pub async fn list_users(&self) -> UserResult<(Vec<User>, usize)> {
        let users = self.repository.list().await?;
        let count = users.len();
        Ok((users, count))
    }

    pub async fn count_users(&self) -> UserResult<usize> {
        self.repository.count().await
    }

    /// Get a user by ID
    pub async fn get_user(&self, id: u64) -> UserResult<User> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    /// Create a new user
    pub async fn create_user(&self, input: Option<UserPayload>) -> UserResult<User> {
        let fields = self.validate_payload(input)?;
        self.repository.create(fields).await
    }

    /// Full replace: fields absent from `input` are cleared
    pub async fn replace_user(&self, id: u64, input: Option<UserPayload>) -> UserResult<User> {
        self.ensure_exists(id).await?;
        let fields = self.validate_payload(input)?;
        self.repository.replace(id, fields).await
    }

    /// Partial update: only fields present in `input` change
    pub async fn patch_user(&self, id: u64, input: Option<UserPatch>) -> UserResult<User> {
        self.ensure_exists(id).await?;
        let patch = validate_patch(input)?;
        self.repository.patch(id, patch).await
    }

    /// Delete a user, returning the removed record
    pub async fn delete_user(&self, id: u64) -> UserResult<User> {
        self.repository
            .delete(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    async fn ensure_exists(&self, id: u64) -> UserResult<()> {
        match self.repository.get_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(UserError::NotFound(id)),
        }
    }

    fn validate_payload(&self, input: Option<UserPayload>) -> UserResult<NewUser> {
        let payload = input
            .filter(|p| !p.is_empty())
            .ok_or_else(|| UserError::Validation(NO_DATA_PROVIDED.to_string()))?;

        if let Some(field) = self
            .required_fields
            .iter()
            .find(|field| payload.is_blank(**field))
        {
            return Err(UserError::Validation(format!(
                "Missing required field: {}",
                field
            )));
        }

        let UserPayload {
            name,
            email,
            age,
            phone,
            ..
        } = payload;

        let (Some(name), Some(email)) = (name.flatten(), email.flatten()) else {
            return Err(UserError::Validation(format!(
                "Missing required field: {}",
                UserField::Name
            )));
        };
        validate_email(&email)?;

        Ok(NewUser {
            name,
            email,
            age: age.flatten(),
            phone: phone.flatten(),
        })
    }
}

fn validate_patch(input: Option<UserPatch>) -> UserResult<UserPatch> {
    let patch = input
        .filter(|p| !p.is_empty())
        .ok_or_else(|| UserError::Validation(NO_DATA_PROVIDED.to_string()))?;

    match &patch.email {
        Some(Some(email)) => validate_email(email)?,
        Some(None) => return Err(UserError::Validation(INVALID_EMAIL_FORMAT.to_string())),
        None => {}
    }

    if let Some(name) = &patch.name {
        if name.as_deref().is_none_or(str::is_empty) {
            return Err(UserError::Validation(format!(
                "Missing required field: {}",
                UserField::Name
            )));
        }
    }

    Ok(patch)
}

/// The only format rule: the address must contain `@`.
fn validate_email(email: &str) -> UserResult<()> {
    if email.contains('@') {
        Ok(())
    } else {
        Err(UserError::Validation(INVALID_EMAIL_FORMAT.to_string()))
    }
}
