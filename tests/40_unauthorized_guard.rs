use anyhow::Result;
use showreel_client_rust::session::store;
use showreel_client_rust::session::{ClearOnUnauthorized, Session, SessionGuard};

// The guard the CLI installs on its API client: any 401/403 must drop the
// persisted session so the next command starts logged out.

#[tokio::test]
async fn unauthorized_response_clears_the_stored_session() -> Result<()> {
    let dir = tempfile::tempdir()?;
    std::env::set_var("SHOWREEL_CONFIG_DIR", dir.path());

    let session = Session::from_login(
        "stale-token".to_string(),
        "acme".to_string(),
        "editor".to_string(),
        "member".to_string(),
    );
    store::save_session(&session)?;
    assert!(store::load_session()?.is_some());

    ClearOnUnauthorized.on_unauthorized(401).await;

    assert!(store::load_session()?.is_none());
    assert!(!dir.path().join("session.json").exists());

    // Firing again with no session stored is a no-op, not an error
    ClearOnUnauthorized.on_unauthorized(403).await;

    Ok(())
}
