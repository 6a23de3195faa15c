//! Login / logout handlers.

use secrecy::SecretString;

use portway_config::session;

use crate::cli::{GlobalOpts, LoginArgs};
use crate::config::Workspace;
use crate::error::CliError;

/// Authenticate and persist the session token.
pub async fn login(
    workspace: &Workspace,
    args: LoginArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let admin = args.admin.unwrap_or_else(|| workspace.admin.clone());

    if workspace.authenticated && !global.quiet {
        eprintln!("Replacing the existing session for this profile");
    }

    let password = SecretString::from(
        rpassword::prompt_password(format!("Password for {admin}: "))
            .map_err(CliError::Io)?,
    );

    let token = workspace
        .console
        .api()
        .login(&admin, &password)
        .await
        .map_err(portway_core::CoreError::from)
        .map_err(CliError::from)?;

    session::save_session(&workspace.profile_name, &admin, &token)?;

    if !global.quiet {
        eprintln!("Logged in as {admin}; session stored");
    }
    Ok(())
}

/// End the session. The stored token is cleared even when the backend
/// call fails -- a dead backend should not pin a stale session.
pub async fn logout(workspace: &Workspace, global: &GlobalOpts) -> Result<(), CliError> {
    let result = workspace
        .console
        .api()
        .logout(&workspace.admin)
        .await
        .map_err(portway_core::CoreError::from)
        .map_err(CliError::from);

    session::clear_session(&workspace.profile_name)?;

    if !global.quiet {
        match &result {
            Ok(()) => eprintln!("Logged out"),
            Err(_) => eprintln!("Session cleared locally (backend logout failed)"),
        }
    }
    // Local cleanup succeeded; a backend failure is not fatal here.
    Ok(())
}
