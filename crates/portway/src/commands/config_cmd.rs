//! Config command handlers (no portal connection required).

use dialoguer::{Confirm, Input};

use portway_config::{Config, Profile, config_path, load_config_or_default, save_config};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(global),
        ConfigCommand::Show => {
            let cfg = load_config_or_default();
            let rendered = toml::to_string_pretty(&cfg)
                .map_err(portway_config::ConfigError::Serialization)?;
            crate::output::print_output(&rendered, global.quiet);
            Ok(())
        }
        ConfigCommand::Path => {
            crate::output::print_output(&config_path().display().to_string(), global.quiet);
            Ok(())
        }
    }
}

/// Interactive profile setup.
fn init(global: &GlobalOpts) -> Result<(), CliError> {
    let mut cfg: Config = load_config_or_default();

    let name: String = Input::new()
        .with_prompt("Profile name")
        .default(global.profile.clone().unwrap_or_else(|| "default".into()))
        .interact_text()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;

    let portal: String = Input::new()
        .with_prompt("Portal base URL")
        .default(
            cfg.profiles
                .get(&name)
                .map(|p| p.portal.clone())
                .unwrap_or_else(|| "http://192.168.1.1:5000".into()),
        )
        .interact_text()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;

    let admin: String = Input::new()
        .with_prompt("Admin identifier")
        .default(
            cfg.profiles
                .get(&name)
                .map(|p| p.admin.clone())
                .unwrap_or_else(|| "ADMIN".into()),
        )
        .interact_text()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;

    let insecure = Confirm::new()
        .with_prompt("Accept self-signed TLS certificates?")
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;

    cfg.profiles.insert(
        name.clone(),
        Profile {
            portal,
            admin,
            token_env: None,
            ca_cert: None,
            insecure: Some(insecure),
            timeout: None,
        },
    );
    if cfg.default_profile.is_none() {
        cfg.default_profile = Some(name.clone());
    }

    save_config(&cfg)?;
    if !global.quiet {
        eprintln!("Profile '{name}' saved to {}", config_path().display());
        eprintln!("Next: portway login --profile {name}");
    }
    Ok(())
}
