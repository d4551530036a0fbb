//! Argument parsing and command dispatch.

use clap::{Args, Parser, Subcommand, ValueEnum};
use photoframe_api::{ClientConfig, ENV_API_BASE_URL, ENV_API_ORIGIN};
use photoframe_telemetry::{LogFormat, LoggingConfig, init_logging};
use uuid::Uuid;

use crate::client::{AppContext, CliResult};
use crate::commands::settings::{handle_settings_get, handle_settings_set};
use crate::commands::status::{handle_albums, handle_status};

const DEFAULT_LOG_LEVEL: &str = "warn";

/// Parses CLI arguments, executes the requested command, and reports
/// failures on stderr. Returns the process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();

    let logging = LoggingConfig {
        level: &cli.log_level,
        format: cli.log_format.unwrap_or_else(LogFormat::infer),
        ..LoggingConfig::default()
    };
    if let Err(err) = init_logging(&logging) {
        eprintln!("warning: {err}");
    }

    let command_name = command_label(&cli.command);
    let trace_id = Uuid::new_v4().to_string();
    let result = dispatch(cli, &trace_id).await;

    match result {
        Ok(()) => {
            tracing::debug!(command = command_name, trace_id = %trace_id, "command succeeded");
            0
        }
        Err(err) => {
            let exit_code = err.exit_code();
            let message = err.display_message();
            tracing::debug!(
                command = command_name,
                trace_id = %trace_id,
                exit_code,
                "command failed"
            );
            eprintln!("error: {message}");
            exit_code
        }
    }
}

async fn dispatch(cli: Cli, trace_id: &str) -> CliResult<()> {
    let config = client_config(&cli)?;
    let ctx = AppContext::new(&config, trace_id)?;

    match cli.command {
        Command::Settings(SettingsCommand::Get) => handle_settings_get(&ctx, cli.output).await,
        Command::Settings(SettingsCommand::Set(args)) => {
            handle_settings_set(&ctx, args, cli.output).await
        }
        Command::Status => handle_status(&ctx, cli.output).await,
        Command::Albums => handle_albums(&ctx, cli.output).await,
    }
}

fn client_config(cli: &Cli) -> CliResult<ClientConfig> {
    let config = ClientConfig::from_lookup(|name| match name {
        ENV_API_BASE_URL => cli.api_url.clone(),
        ENV_API_ORIGIN => cli.api_origin.clone(),
        _ => None,
    })?;
    Ok(config)
}

#[derive(Parser)]
#[command(name = "photoframe", about = "Command-line client for a photoframe backend")]
pub(crate) struct Cli {
    #[arg(
        long,
        global = true,
        env = ENV_API_BASE_URL,
        help = "API base URL; relative paths resolve against --api-origin [default: /api]"
    )]
    api_url: Option<String>,
    #[arg(
        long,
        global = true,
        env = ENV_API_ORIGIN,
        help = "Origin used for relative API base URLs [default: http://127.0.0.1:8080]"
    )]
    api_origin: Option<String>,
    #[arg(
        long,
        global = true,
        env = "PHOTOFRAME_LOG_LEVEL",
        default_value = DEFAULT_LOG_LEVEL
    )]
    log_level: String,
    #[arg(
        long,
        global = true,
        env = "PHOTOFRAME_LOG_FORMAT",
        value_parser = parse_log_format
    )]
    log_format: Option<LogFormat>,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    output: OutputFormat,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read or update backend settings.
    #[command(subcommand)]
    Settings(SettingsCommand),
    /// Show the backend status object.
    Status,
    /// List albums from the Google Photos integration.
    Albums,
}

#[derive(Subcommand)]
enum SettingsCommand {
    /// Fetch all settings.
    Get,
    /// Save one or more `KEY=VALUE` pairs.
    Set(SettingsSetArgs),
}

#[derive(Args)]
pub(crate) struct SettingsSetArgs {
    #[arg(required = true, value_name = "KEY=VALUE", value_parser = parse_assignment)]
    pub(crate) pairs: Vec<(String, String)>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
}

const fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Settings(SettingsCommand::Get) => "settings_get",
        Command::Settings(SettingsCommand::Set(_)) => "settings_set",
        Command::Status => "status",
        Command::Albums => "albums",
    }
}

fn parse_assignment(input: &str) -> Result<(String, String), String> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{input}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("setting key cannot be empty in '{input}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

fn parse_log_format(input: &str) -> Result<LogFormat, String> {
    LogFormat::parse(input).ok_or_else(|| format!("unknown log format '{input}'"))
}
