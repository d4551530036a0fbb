use photoframe_api::PhotoframeApi;

use crate::cli::OutputFormat;
use crate::client::{AppContext, CliResult};
use crate::output::render_value;

pub(crate) async fn handle_status(ctx: &AppContext, format: OutputFormat) -> CliResult<()> {
    let status = ctx.api.get_status().await?;
    render_value(&status, format)
}

pub(crate) async fn handle_albums(ctx: &AppContext, format: OutputFormat) -> CliResult<()> {
    let albums = ctx.api.get_google_albums().await?;
    render_value(&albums, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, anyhow};
    use httpmock::prelude::*;
    use serde_json::json;

    use crate::client::tests::context_with;

    #[tokio::test]
    async fn status_fetches_backend_status() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET).path("/api/status");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "status": "ok" }));
        });

        let ctx = context_with(&server)?;
        handle_status(&ctx, OutputFormat::Table).await?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn albums_gone_is_an_operational_failure() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET).path("/api/google/albums");
            then.status(410)
                .header("content-type", "application/json")
                .json_body(json!({ "error": "This feature is no longer supported" }));
        });

        let ctx = context_with(&server)?;
        let Err(err) = handle_albums(&ctx, OutputFormat::Json).await else {
            return Err(anyhow!("expected albums to fail"));
        };
        mock.assert();
        assert_eq!(err.exit_code(), 3);
        assert_eq!(err.display_message(), "request failed with status code 410");
        Ok(())
    }
}
