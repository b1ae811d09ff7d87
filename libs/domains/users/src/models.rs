use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// Fields a client may supply for a user.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum UserField {
    Name,
    Email,
    Age,
    Phone,
}

impl UserField {
    /// Fields required on create and full replace unless configured otherwise.
    pub const DEFAULT_REQUIRED: [UserField; 2] = [UserField::Name, UserField::Email];
}

/// User entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Unique identifier, never reused
    pub id: u64,
    /// Display name
    pub name: String,
    /// Email address (unique, exact match)
    pub email: String,
    /// Age, stored exactly as supplied
    #[schema(value_type = Option<Object>)]
    pub age: Option<Value>,
    /// Phone number
    pub phone: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Request body for create (POST) and full replace (PUT).
///
/// Every field is optional here; which ones are required is decided by the
/// service's validation. The outer `Option` records whether the key was sent
/// at all, so `{"age": null}` is not mistaken for an empty body.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
pub struct UserPayload {
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<Object>)]
    pub age: Option<Option<Value>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub phone: Option<Option<String>>,
    /// Unrecognised keys, accepted and ignored
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl UserPayload {
    /// True only for `{}`: no key was sent, known or not.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.age.is_none()
            && self.phone.is_none()
            && self.extra.is_empty()
    }

    /// Whether `field` is missing or carries an empty value.
    pub fn is_blank(&self, field: UserField) -> bool {
        match field {
            UserField::Name => supplied(&self.name).is_none_or(String::is_empty),
            UserField::Email => supplied(&self.email).is_none_or(String::is_empty),
            UserField::Age => supplied(&self.age).is_none_or(is_blank_value),
            UserField::Phone => supplied(&self.phone).is_none_or(String::is_empty),
        }
    }
}

/// Request body for partial update (PATCH).
///
/// The outer `Option` records presence: `None` means the key was absent,
/// `Some(None)` means it was sent as `null`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
pub struct UserPatch {
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<Object>)]
    pub age: Option<Option<Value>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub phone: Option<Option<String>>,
    /// Unrecognised keys, accepted and ignored
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl UserPatch {
    /// True only for `{}`. A body of unknown keys still counts as an update.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.age.is_none()
            && self.phone.is_none()
            && self.extra.is_empty()
    }
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// The value of a presence-tracked field, if one was sent and was not `null`.
fn supplied<T>(field: &Option<Option<T>>) -> Option<&T> {
    field.as_ref().and_then(Option::as_ref)
}

/// `null`, `false`, `0`, `""`, `[]` and `{}` count as blank.
fn is_blank_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Validated field set for a create or full replace.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub age: Option<Value>,
    pub phone: Option<String>,
}

impl User {
    /// Build a user with `created_at == updated_at == now`.
    pub fn new(id: u64, fields: NewUser) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: fields.name,
            email: fields.email,
            age: fields.age,
            phone: fields.phone,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every mutable field. Absent optionals are cleared.
    pub fn replace(&mut self, fields: NewUser) {
        self.name = fields.name;
        self.email = fields.email;
        self.age = fields.age;
        self.phone = fields.phone;
        self.touch();
    }

    /// Overwrite only the fields present in `patch`.
    ///
    /// `name` and `email` are expected to be validated already; an explicit
    /// `null` for either leaves the current value in place.
    pub fn apply_patch(&mut self, patch: UserPatch) {
        if let Some(Some(name)) = patch.name {
            self.name = name;
        }
        if let Some(Some(email)) = patch.email {
            self.email = email;
        }
        if let Some(age) = patch.age {
            self.age = age;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.created_at);
    }
}
