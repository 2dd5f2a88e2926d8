//! CLI command implementations.

pub mod engage;
pub mod me;
pub mod tweet;
pub mod user;
pub mod version;
pub mod watch;

use anyhow::Result;
use std::io::IsTerminal;
use xcli_core::Envelope;
use xcli_fetch::ApiClient;
use xcli_store::{Config, load_credentials};

use crate::Cli;
use crate::output::{self, OutputMode, RenderOptions};

/// Everything a command needs: an authenticated client and output settings.
pub struct Session {
    pub client: ApiClient,
    pub config: Config,
    pub mode: OutputMode,
    pub opts: RenderOptions,
}

impl Session {
    /// Loads config and credentials and builds the client.
    pub fn open(cli: &Cli) -> Result<Self> {
        let config = Config::load()?;
        let credentials = load_credentials()?;
        let client = ApiClient::new(credentials)?.with_base_url(config.api.base_url.clone());

        Ok(Self {
            client,
            mode: cli.output_mode(),
            opts: render_options(cli, &config),
            config,
        })
    }

    /// Renders an envelope in the selected mode and writes it out.
    pub fn print(&self, envelope: &Envelope, title: &str) -> Result<()> {
        output::render(envelope, self.mode, title, self.opts)?.emit()
    }
}

/// Colors are on unless `--no-color`, `NO_COLOR`, the config, or a
/// non-terminal stdout says otherwise.
pub fn render_options(cli: &Cli, config: &Config) -> RenderOptions {
    let use_colors = !cli.no_color
        && std::env::var_os("NO_COLOR").is_none()
        && config.output.color
        && std::io::stdout().is_terminal();

    RenderOptions {
        use_colors,
        verbose: cli.verbose,
    }
}
