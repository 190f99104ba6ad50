use learnup::config::AppConfig;
use learnup::db::SessionStore;
use learnup::models::{ResourceKind, Role, UserInfo, UserProfile};
use learnup::state::{Action, AppState};

async fn state_with(session: SessionStore) -> AppState {
    AppState::with_session(AppConfig::default(), session)
        .await
        .expect("Failed to build app state")
}

async fn memory_session() -> SessionStore {
    SessionStore::connect("sqlite::memory:")
        .await
        .expect("Failed to create session store")
}

#[tokio::test]
async fn dark_mode_is_persisted_and_broadcast() {
    let session = memory_session().await;
    let state = state_with(session.clone()).await;
    let mut watcher = state.watch_dark_mode();
    assert!(!state.dark_mode());

    state.dispatch(Action::SetDarkMode(true)).await.unwrap();
    watcher.changed().await.unwrap();
    assert!(*watcher.borrow_and_update());
    assert!(session.dark_mode().await.unwrap());

    state.dispatch(Action::ToggleDarkMode).await.unwrap();
    assert!(!state.dark_mode());
    assert!(!session.dark_mode().await.unwrap());
}

#[tokio::test]
async fn saved_preference_is_restored_on_startup() {
    let session = memory_session().await;
    session.set_dark_mode(true).await.unwrap();

    let state = state_with(session).await;

    assert!(state.dark_mode());
}

#[tokio::test]
async fn invalidate_reaches_subscribers() {
    let state = state_with(memory_session().await).await;
    let mut rx = state.bus.subscribe();

    state
        .dispatch(Action::Invalidate(ResourceKind::Rappels))
        .await
        .unwrap();

    assert_eq!(rx.recv().await.unwrap(), ResourceKind::Rappels);
}

#[tokio::test]
async fn logout_clears_credentials() {
    let session = memory_session().await;
    session
        .save_login(&UserInfo {
            role: Role::Admin,
            token: "tok".to_string(),
            profile: UserProfile {
                id: "a1".to_string(),
                first_name: "Admin".to_string(),
                last_name: "LearnUp".to_string(),
                email: "admin@learnup.fr".to_string(),
            },
        })
        .await
        .unwrap();
    let state = state_with(session.clone()).await;

    state.dispatch(Action::Logout).await.unwrap();

    assert!(session.token().await.unwrap().is_none());
    assert!(session.user_info().await.unwrap().is_none());
}
