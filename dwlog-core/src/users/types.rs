use serde::{Deserialize, Serialize};

pub const DEFAULT_ROLE: &str = "user";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub password: String,
    /// Unix seconds.
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

fn default_role() -> String {
    DEFAULT_ROLE.to_string()
}

fn default_active() -> bool {
    true
}

/// Body of the create endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewUser {
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub active: Option<bool>,
    pub password: Option<String>,
}

/// Picks a user by any of its identifiers; the first user matching one of
/// the non-blank selectors wins.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserSelector {
    pub id: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
}

impl UserSelector {
    pub fn matches(&self, user: &User) -> bool {
        selects(&self.id, &user.id)
            || selects(&self.username, &user.username)
            || selects(&self.email, &user.email)
    }
}

fn selects(wanted: &Option<String>, actual: &str) -> bool {
    match wanted.as_deref().map(str::trim) {
        Some(w) if !w.is_empty() => actual.trim() == w,
        _ => false,
    }
}

/// Fields to overwrite on update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub active: Option<bool>,
    pub password: Option<String>,
}

impl UserPatch {
    pub fn apply(self, user: &mut User) {
        if let Some(username) = self.username {
            user.username = username;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(role) = self.role {
            user.role = role;
        }
        if let Some(active) = self.active {
            user.active = active;
        }
        if let Some(password) = self.password {
            user.password = password;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub email: Option<String>,
}
