//! Resolving profiles and building the console.
//!
//! Precedence for every setting: CLI flag → environment → profile →
//! default. The session token follows its own chain (flag/env → keyring
//! → session file); a command that needs auth and finds no token fails
//! before any request is sent.

use std::time::Duration;

use secrecy::SecretString;
use tracing::debug;

use portway_api::{PortalClient, TlsMode, TransportConfig};
use portway_core::{AppState, Console};
use portway_config::{Config, Profile, ledger, session};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// What a command handler needs beyond the console itself.
pub struct Workspace {
    pub console: Console,
    pub profile_name: String,
    /// Admin identity for login/logout bodies.
    pub admin: String,
    /// Whether a session token was found and installed.
    pub authenticated: bool,
}

impl Workspace {
    /// Persist the voucher ledger back to disk (ledger-local commands).
    pub fn save_ledger(&self) -> Result<(), CliError> {
        ledger::save_ledger(&self.profile_name, &self.console.state().vouchers())?;
        Ok(())
    }
}

/// The profile name to use: flag/env, then the config default.
pub fn active_profile_name(global: &GlobalOpts, cfg: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| cfg.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build the console from config, profile, and CLI overrides.
pub fn build_workspace(global: &GlobalOpts) -> Result<Workspace, CliError> {
    let cfg = portway_config::load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);
    let profile = cfg.profiles.get(&profile_name).cloned();

    // Portal URL: flag/env wins, then the profile.
    let portal = global
        .portal
        .clone()
        .or_else(|| profile.as_ref().map(|p| p.portal.clone()))
        .ok_or(CliError::NoConfig)?;
    let url: url::Url = portal.parse().map_err(|_| CliError::Validation {
        field: "portal".into(),
        reason: format!("invalid URL: {portal}"),
    })?;

    let transport = build_transport(global, profile.as_ref());
    let api = PortalClient::new(url, &transport)
        .map_err(|e| CliError::from(portway_core::CoreError::from(e)))?;

    // Session token chain: flag/env → keyring → session file.
    let token: Option<SecretString> = global
        .token
        .clone()
        .map(SecretString::from)
        .or_else(|| {
            profile
                .as_ref()
                .and_then(|p| session::load_token(p, &profile_name).ok())
        });
    let authenticated = token.is_some();
    if let Some(token) = token {
        api.set_token(token);
    } else {
        debug!(profile = %profile_name, "no stored session token");
    }

    let admin = profile
        .as_ref()
        .map(|p| p.admin.clone())
        .or_else(|| session::load_admin(&profile_name))
        .unwrap_or_else(|| "ADMIN".into());

    // Restore the local voucher ledger into the injectable state.
    let state = AppState::new();
    state.set_vouchers(ledger::load_ledger(&profile_name)?);

    Ok(Workspace {
        console: Console::with_state(api, state),
        profile_name,
        admin,
        authenticated,
    })
}

fn build_transport(global: &GlobalOpts, profile: Option<&Profile>) -> TransportConfig {
    let insecure = global.insecure || profile.and_then(|p| p.insecure).unwrap_or(false);
    let tls = if insecure {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ca) = profile.and_then(|p| p.ca_cert.clone()) {
        TlsMode::CustomCa(ca)
    } else {
        TlsMode::System
    };

    let timeout = global
        .timeout
        .or_else(|| profile.and_then(|p| p.timeout))
        .unwrap_or(30);

    TransportConfig {
        tls,
        timeout: Duration::from_secs(timeout),
    }
}
