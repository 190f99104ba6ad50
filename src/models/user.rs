use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
    Admin,
    Parent,
}

impl Role {
    /// Path segment of the role specific login endpoint.
    pub fn login_segment(self) -> &'static str {
        match self {
            Role::Student => "students",
            Role::Teacher => "teachers",
            Role::Admin => "admins",
            Role::Parent => "parents",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
            Role::Admin => "admin",
            Role::Parent => "parent",
        };
        f.write_str(name)
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "student" | "etudiant" => Ok(Role::Student),
            "teacher" | "professeur" => Ok(Role::Teacher),
            "admin" => Ok(Role::Admin),
            "parent" => Ok(Role::Parent),
            other => Err(AppError::BadRequest(format!("Unknown role: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, alias = "prenom")]
    pub first_name: String,
    #[serde(default, alias = "nom")]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(
        alias = "student",
        alias = "teacher",
        alias = "admin",
        alias = "parent",
        alias = "etudiant",
        alias = "professeur"
    )]
    pub user: UserProfile,
}

/// Combined blob persisted under the `userInfo` session key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub role: Role,
    pub token: String,
    pub profile: UserProfile,
}
