use crate::users::UserError;
use crate::users::types::{DEFAULT_ROLE, LoginRequest, NewUser, User, UserPatch, UserSelector};
use chrono::Utc;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

/// Users JSON file plus the lock serializing read-modify-write cycles.
#[derive(Debug)]
pub struct UserStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl UserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// A missing file is an empty user list.
    fn load(&self) -> Result<Vec<User>, UserError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(UserError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&text).map_err(|source| UserError::Json {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, users: &[User]) -> Result<(), UserError> {
        let io_err = |source| UserError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let body = serde_json::to_vec_pretty(users).map_err(|source| UserError::Json {
            path: self.path.clone(),
            source,
        })?;

        fs::write(&self.path, body).map_err(io_err)
    }

    pub fn list(&self) -> Result<Vec<User>, UserError> {
        let _guard = self.guard();
        self.load()
    }

    /// Username and email are required and must both be unused.
    pub fn create(&self, request: NewUser) -> Result<User, UserError> {
        let username = required(request.username, "username")?;
        let email = required(request.email, "email")?;

        let _guard = self.guard();
        let mut users = self.load()?;

        if users
            .iter()
            .any(|u| u.username == username || u.email == email)
        {
            return Err(UserError::Duplicate);
        }

        let role = request
            .role
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| DEFAULT_ROLE.to_string());

        let now = Utc::now().timestamp();
        let user = User {
            id: Uuid::new_v4().to_string(),
            username,
            email,
            role,
            active: request.active.unwrap_or(true),
            password: request
                .password
                .map(|p| p.trim().to_string())
                .unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };

        users.push(user.clone());
        self.save(&users)?;

        tracing::info!(user_id = %user.id, username = %user.username, "user created");
        Ok(user)
    }

    pub fn update(&self, selector: &UserSelector, patch: UserPatch) -> Result<User, UserError> {
        let _guard = self.guard();
        let mut users = self.load()?;

        let user = users
            .iter_mut()
            .find(|u| selector.matches(u))
            .ok_or(UserError::NotFound)?;

        patch.apply(user);
        user.updated_at = Utc::now().timestamp();
        let updated = user.clone();

        self.save(&users)?;

        tracing::info!(user_id = %updated.id, "user updated");
        Ok(updated)
    }

    pub fn delete(&self, id: Option<&str>) -> Result<(), UserError> {
        let id = id.map(str::trim).filter(|s| !s.is_empty());
        let Some(id) = id else {
            return Err(UserError::MissingField("id"));
        };

        let _guard = self.guard();
        let mut users = self.load()?;

        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(UserError::NotFound);
        }

        self.save(&users)?;

        tracing::info!(user_id = id, "user deleted");
        Ok(())
    }

    /// Looks a user up by username or email. There is no password check.
    pub fn login(&self, request: &LoginRequest) -> Result<User, UserError> {
        let selector = UserSelector {
            id: None,
            username: request.username.clone(),
            email: request.email.clone(),
        };

        self.list()?
            .into_iter()
            .find(|u| selector.matches(u))
            .ok_or(UserError::NotFound)
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, UserError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(UserError::MissingField(field))
}
