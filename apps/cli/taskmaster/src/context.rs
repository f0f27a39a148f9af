use crate::cli::Cli;
use crate::console::{ConsoleNavigator, ConsoleNotifier};
use crate::error::TaskmasterError;

use client_core::api_client::TaskmasterClientBuilder;
use client_core::{ClientConfig, FileTokenStore, TaskmasterClient};

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use log::debug;

/// Everything a command needs: resolved config, where state lives, and a
/// client wired to the file token store and terminal collaborators.
pub struct AppContext {
    pub config: ClientConfig,
    pub data_dir: PathBuf,
    pub client: TaskmasterClient,
}

impl AppContext {
    /// Resolve config the way the binary does: file, then environment, then
    /// command line flags.
    pub fn from_cli(cli: &Cli) -> Result<Self, TaskmasterError> {
        let config_dir = match &cli.config_dir {
            Some(dir) => dir.clone(),
            None => ClientConfig::default_dir()?,
        };

        let mut config = ClientConfig::load(&config_dir)?;
        config.apply_env_overrides()?;

        if let Some(base_url) = &cli.base_url {
            config.server.base_url = base_url.clone();
            config.validate()?;
        }

        Self::with_config(config)
    }

    /// Build from an already resolved config.
    pub fn with_config(config: ClientConfig) -> Result<Self, TaskmasterError> {
        let store = match &config.storage.data_dir {
            Some(dir) => FileTokenStore::new(dir, config.storage.token_key.clone()),
            None => FileTokenStore::in_default_dir(config.storage.token_key.clone())?,
        };

        let data_dir = store
            .path()
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| TaskmasterError::taskmaster("Token file has no parent directory"))?;
        debug!("Using data directory {}", data_dir.display());

        let client = TaskmasterClientBuilder::from_config(&config)
            .with_token_store(Arc::new(store))
            .with_notifier(Arc::new(ConsoleNotifier))
            .with_navigator(Arc::new(ConsoleNavigator::new(
                config.session.login_page.clone(),
            )))
            .build()?;

        Ok(Self {
            config,
            data_dir,
            client,
        })
    }

    /// Create the data directory that holds the token file and the log.
    pub fn ensure_data_dir(&self) -> Result<(), TaskmasterError> {
        std::fs::create_dir_all(&self.data_dir).map_err(|e| {
            TaskmasterError::taskmaster(format!(
                "Failed to create data directory {}: {e}",
                self.data_dir.display()
            ))
        })
    }

    /// How long the client waits before navigating after a 401.
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.config.session.redirect_delay_ms)
    }
}
