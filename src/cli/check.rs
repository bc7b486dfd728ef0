//! The `check` subcommand: validate configuration and store files.

use super::{output, ConfigPathArg};
use crate::config::Config;
use crate::error::Result;

pub fn config(args: &ConfigPathArg) -> Result<()> {
    let config = Config::load(&args.config)?;
    output::ok(&format!("config {} is valid", args.config.display()));
    output::key_value("rules file", config.stores.rules.display());
    output::key_value("matches file", config.stores.matches.display());
    output::key_value("grid size", config.model.max_goals);
    output::key_value("rho", config.model.rho);

    if !config.stores.rules.exists() {
        output::warn("rules file does not exist yet");
    }
    if !config.stores.matches.exists() {
        output::warn("matches file does not exist yet");
    }
    Ok(())
}
