use anyhow::anyhow;
use photoframe_api::Settings;

use crate::cli::{OutputFormat, SettingsSetArgs};
use crate::client::{AppContext, CliError, CliResult};
use crate::output::render_settings;

pub(crate) async fn handle_settings_get(ctx: &AppContext, format: OutputFormat) -> CliResult<()> {
    ctx.store.fetch_settings().await;
    if let Some(message) = ctx.store.error() {
        return Err(CliError::failure(anyhow!(message)));
    }
    render_settings(&ctx.store.settings(), format)
}

pub(crate) async fn handle_settings_set(
    ctx: &AppContext,
    args: SettingsSetArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let changes: Settings = args.pairs.into_iter().collect();
    ctx.store.save_settings(changes).await?;
    render_settings(&ctx.store.settings(), format)
}
