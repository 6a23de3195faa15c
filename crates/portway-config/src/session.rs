// ── Session persistence ──
//
// The browser front end kept the bearer token and the logged-in admin
// id in localStorage; here they live in the platform keyring when one
// is available, with a plain session file as the fallback (headless
// boxes, CI). Resolution order on load: profile's token_env variable,
// then keyring, then session file.

use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{ConfigError, Profile, data_dir};

const KEYRING_SERVICE: &str = "portway";

/// A stored admin session.
#[derive(Debug, Serialize, Deserialize)]
pub struct Session {
    pub admin: String,
    pub token: String,
}

fn session_path(profile_name: &str) -> PathBuf {
    data_dir().join(format!("session-{profile_name}.json"))
}

fn keyring_entry(profile_name: &str) -> Option<keyring::Entry> {
    keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/token")).ok()
}

/// Resolve the session token for a profile.
pub fn load_token(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    // 1. Profile's token_env → env var lookup
    if let Some(ref env_name) = profile.token_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. System keyring
    if let Some(entry) = keyring_entry(profile_name) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    // 3. Session file
    if let Ok(contents) = std::fs::read_to_string(session_path(profile_name)) {
        if let Ok(session) = serde_json::from_str::<Session>(&contents) {
            return Ok(SecretString::from(session.token));
        }
    }

    Err(ConfigError::NoSession {
        profile: profile_name.to_owned(),
    })
}

/// Persist a fresh session after login: keyring when available, session
/// file otherwise (and always, so the admin id survives).
pub fn save_session(
    profile_name: &str,
    admin: &str,
    token: &SecretString,
) -> Result<(), ConfigError> {
    if let Some(entry) = keyring_entry(profile_name) {
        if entry.set_password(token.expose_secret()).is_ok() {
            debug!(profile = profile_name, "session token stored in keyring");
        }
    }

    let path = session_path(profile_name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let session = Session {
        admin: admin.to_owned(),
        token: token.expose_secret().to_owned(),
    };
    std::fs::write(&path, serde_json::to_string_pretty(&session)?)?;
    Ok(())
}

/// Load the stored admin id for a profile, if any.
pub fn load_admin(profile_name: &str) -> Option<String> {
    let contents = std::fs::read_to_string(session_path(profile_name)).ok()?;
    let session: Session = serde_json::from_str(&contents).ok()?;
    Some(session.admin)
}

/// Drop the stored session (logout).
pub fn clear_session(profile_name: &str) -> Result<(), ConfigError> {
    if let Some(entry) = keyring_entry(profile_name) {
        let _ = entry.delete_credential();
    }
    match std::fs::remove_file(session_path(profile_name)) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
