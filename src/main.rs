use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use owo_colors::OwoColorize;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winfocus::cli::{Cli, Commands, ConfigAction};
use winfocus::config::Config;
use winfocus::diagnostics::check_focus_tools;
use winfocus::exec::{CommandExecutor, SystemCommandExecutor};
use winfocus::focus::focus_terminal;
use winfocus::identity::{TerminalIdentity, detect_terminal_name};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose);

    match cli.command {
        Commands::Focus {
            name,
            override_command,
            timeout,
        } => {
            let mut config = load_config(cli.config.as_deref())?;
            if let Some(name) = name {
                config.focus.terminal = Some(name);
            }
            if let Some(command) = override_command {
                config.focus.override_command = command;
            }
            // --timeout keeps sub-second precision; 0 disables the bound
            let timeout = match timeout {
                Some(timeout) => (!timeout.is_zero()).then_some(timeout),
                None => config.focus.timeout(),
            };

            let executor: Arc<dyn CommandExecutor> =
                Arc::new(SystemCommandExecutor::with_timeout(timeout));
            let focused = focus_terminal(&config.focus, executor)
                .context("Could not focus the terminal window")?;

            if !cli.quiet {
                println!("{} Focused via {}", "✓".green(), focused);
            }
        }
        Commands::Check { json } => {
            let config = load_config(cli.config.as_deref())?;
            let executor = SystemCommandExecutor::with_timeout(config.focus.timeout());
            check_focus_tools(&executor, json)?;
        }
        Commands::Resolve { name } => {
            let name = name.unwrap_or_else(detect_terminal_name);
            let identity = TerminalIdentity::resolve(&name);
            println!("terminal:    {}", identity.raw);
            println!("app id:      {}", identity.app_id);
            println!("search term: {}", identity.search_term);
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let config = load_config(cli.config.as_deref())?;
                print!(
                    "{}",
                    toml::to_string_pretty(&config).context("Failed to render configuration")?
                );
            }
            ConfigAction::Path => {
                let path = cli.config.unwrap_or_else(Config::default_path);
                println!("{}", path.display());
            }
        },
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "winfocus",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

/// Install the stderr log subscriber. `RUST_LOG` takes precedence over flags.
fn init_tracing(quiet: bool, verbose: u8) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("winfocus={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(custom_path: Option<&Path>) -> Result<Config> {
    let config = if let Some(path) = custom_path {
        Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?
    } else {
        Config::load_or_default(&Config::default_path())?
    };

    Ok(config.with_env_overrides())
}
