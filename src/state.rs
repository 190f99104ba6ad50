use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use crate::api::LearnUpHttpClient;
use crate::config::AppConfig;
use crate::db::SessionStore;
use crate::error::AppError;
use crate::models::ResourceKind;
use crate::services::RefreshBus;

/// Application level state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Invalidate(ResourceKind),
    SetDarkMode(bool),
    ToggleDarkMode,
    Logout,
}

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub session: SessionStore,
    pub api: Arc<LearnUpHttpClient>,
    pub bus: RefreshBus,
    dark_mode: Arc<watch::Sender<bool>>,
}

impl AppState {
    /// Connects the session store and restores the saved preferences.
    pub async fn init(config: AppConfig) -> Result<Self, AppError> {
        let session = SessionStore::connect(&config.session_db_url).await?;
        Self::with_session(config, session).await
    }

    pub async fn with_session(config: AppConfig, session: SessionStore) -> Result<Self, AppError> {
        let api = Arc::new(LearnUpHttpClient::new(&config, session.clone())?);
        let dark = session.dark_mode().await?;
        let (dark_mode, _) = watch::channel(dark);
        Ok(Self {
            config,
            session,
            api,
            bus: RefreshBus::new(),
            dark_mode: Arc::new(dark_mode),
        })
    }

    pub fn dark_mode(&self) -> bool {
        *self.dark_mode.borrow()
    }

    pub fn watch_dark_mode(&self) -> watch::Receiver<bool> {
        self.dark_mode.subscribe()
    }

    pub async fn dispatch(&self, action: Action) -> Result<(), AppError> {
        match action {
            Action::Invalidate(kind) => {
                self.bus.invalidate(kind);
            }
            Action::SetDarkMode(enabled) => self.set_dark_mode(enabled).await?,
            Action::ToggleDarkMode => self.set_dark_mode(!self.dark_mode()).await?,
            Action::Logout => {
                self.api.logout().await?;
                info!("logged out");
            }
        }
        Ok(())
    }

    async fn set_dark_mode(&self, enabled: bool) -> Result<(), AppError> {
        self.session.set_dark_mode(enabled).await?;
        self.dark_mode.send_replace(enabled);
        Ok(())
    }
}
