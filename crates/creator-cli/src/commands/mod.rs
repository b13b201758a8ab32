pub mod account;
pub mod draft;
pub mod history;
pub mod onboard;
pub mod plan;

mod clipboard;

use anyhow::{Result, bail};
use colored::Colorize;
use std::fmt::Display;
use std::sync::Arc;
use strum::IntoEnumIterator;

use creator_application::{Outcome, Workflow};
use creator_core::SystemClock;
use creator_infrastructure::{ConfigService, CreatorPaths, HttpCreatorBackend, TomlSessionStore};

use clipboard::TerminalClipboard;

/// Everything a command needs, wired from config.toml and the environment.
pub struct App {
    pub workflow: Workflow,
    pub backend_url: String,
    pub paths: CreatorPaths,
}

impl App {
    pub fn build(backend_url: Option<String>) -> Result<Self> {
        let paths = CreatorPaths::from_env();
        let config_service = ConfigService::from_paths(&paths)?;

        let mut config = config_service.effective_config()?;
        if let Some(url) = backend_url {
            config = config.with_backend_url(url);
            config.validate()?;
        }
        tracing::debug!(
            "Using backend {} (timeout {}s)",
            config.backend_url,
            config.request_timeout_secs
        );

        let backend = HttpCreatorBackend::from_config(&config)?;
        let sessions = TomlSessionStore::from_paths(&paths)?;
        let workflow = Workflow::new(
            Arc::new(backend),
            Arc::new(sessions),
            Arc::new(SystemClock),
            Arc::new(TerminalClipboard),
        );

        Ok(Self {
            workflow,
            backend_url: config.backend_url,
            paths,
        })
    }
}

/// Turns a non-applied outcome into a command failure.
pub fn ensure(outcome: Outcome) -> Result<()> {
    match outcome {
        Outcome::Applied | Outcome::Busy | Outcome::Stale => Ok(()),
        Outcome::Failed(notice) => bail!("{}", notice.message),
        Outcome::SessionExpired => bail!(
            "Your profile could not be found. Run `creator onboard` to set it up again."
        ),
        Outcome::NoSession => bail!("No profile yet. Run `creator onboard` to get started."),
    }
}

/// Case-insensitive parser for closed vocabularies.
pub fn parse_choice<T>(value: &str) -> std::result::Result<T, String>
where
    T: IntoEnumIterator + Display,
{
    let value = value.trim();
    T::iter()
        .find(|choice| choice.to_string().eq_ignore_ascii_case(value))
        .ok_or_else(|| {
            let options: Vec<String> = T::iter().map(|c| c.to_string()).collect();
            format!("'{}' is not one of: {}", value, options.join(", "))
        })
}

pub fn heading(text: &str) {
    println!("{}", text.bright_magenta().bold());
}
