use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Api error {status}: {}", message.as_deref().unwrap_or("<no message>"))]
    Api {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("Not authenticated")]
    Unauthorized,

    #[error("Not found")]
    NotFound,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Body returned by the backend on failure. Only `message` is relied upon.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// What the user was doing when a request failed; selects the fallback text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Create,
    Update,
    Delete,
    Login,
    Upload,
}

impl Operation {
    fn fallback_message(self) -> &'static str {
        match self {
            Operation::Load => "Erreur lors du chargement des données",
            Operation::Create => "Erreur lors de la création",
            Operation::Update => "Erreur lors de la mise à jour",
            Operation::Delete => "Erreur lors de la suppression",
            Operation::Login => "Identifiants incorrects ou serveur indisponible",
            Operation::Upload => "Erreur lors de l'envoi du fichier",
        }
    }
}

impl AppError {
    /// Human readable French message. Server supplied messages win over the
    /// generic fallback for the operation.
    pub fn user_message(&self, op: Operation) -> String {
        match self {
            AppError::Api {
                message: Some(msg), ..
            } if !msg.trim().is_empty() => msg.clone(),
            AppError::Unauthorized => "Session expirée, veuillez vous reconnecter".to_string(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Http(e) if e.is_connect() || e.is_timeout() => {
                "Impossible de contacter le serveur".to_string()
            }
            _ => op.fallback_message().to_string(),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AppError::Api { status, .. } => Some(*status),
            AppError::Http(e) => e.status(),
            AppError::NotFound => Some(StatusCode::NOT_FOUND),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_is_preferred() {
        let err = AppError::Api {
            status: StatusCode::CONFLICT,
            message: Some("Email déjà utilisé".to_string()),
        };
        assert_eq!(err.user_message(Operation::Create), "Email déjà utilisé");
    }

    #[test]
    fn falls_back_to_operation_message() {
        let err = AppError::Api {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: None,
        };
        assert_eq!(
            err.user_message(Operation::Delete),
            "Erreur lors de la suppression"
        );
        assert_eq!(
            AppError::NotFound.user_message(Operation::Load),
            "Erreur lors du chargement des données"
        );
    }
}
