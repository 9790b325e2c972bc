use serde::{Deserialize, Serialize};

use crate::role::Role;

pub mod db;

pub static USER_RECORD_NAME: &str = "users";

#[derive(Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub name: String,
    #[serde(default)]
    pub role: Role,
    // Stored in the clear; this tool trusts its single process.
    pub password: String,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "User:{}", self.username)
    }
}

#[derive(Clone, Deserialize)]
pub struct UserSignupData {
    pub username: String,
    pub name: String,
    pub password: String,
    /// Defaults to `Role::Student` when left out.
    #[serde(default)]
    pub role: Option<Role>,
}

impl std::fmt::Debug for UserSignupData {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "UserSignupInfo:{}", self.username)
    }
}

#[derive(Clone, Deserialize)]
pub struct UserLoginData {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for UserLoginData {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "UserLoginInfo:{}", self.username)
    }
}
