//! dbq - command-line client for the db_query API.

mod cli;
mod logging;
mod output;

use cli::{Cli, Command, OutputFormat};
use db_query_client::api::{NlQueryPayload, RunQueryPayload, SyncPayload, UpdateConnectionPayload};
use db_query_client::config::{Config, EnvOverrides};
use db_query_client::{ApiClient, ApiError, Result};
use serde::Serialize;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() {
    // Missing .env is fine
    let _ = dotenvy::dotenv();

    logging::init_stderr_logging();

    if let Err(e) = run().await {
        error!("{}: {}", e.category(), e);
        if let Some(body) = e.error_body() {
            error!("Backend detail: {}", body.detail_text());
        }
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse_args();

    // Precedence: --api-url, then environment, then config file, then default.
    let config_path = cli.config_path();
    debug!("Loading config from: {}", config_path.display());
    let mut config = Config::load_from_file(&config_path)?;
    config.resolve_base_url(&EnvOverrides::from_env(), cli.api_url.as_deref())?;

    let client = ApiClient::from_config(&config)?;
    info!("Using backend at {}", client.base_url());

    let format = cli.format;
    match cli.command {
        Command::Sync {
            connection_url,
            name,
            refresh,
        } => {
            let mut payload = SyncPayload::new(connection_url);
            payload.name = name;
            payload.refresh = refresh.then_some(true);
            let meta = client.sync_metadata(&payload).await?;
            info!(
                "Synced connection {} ({} tables)",
                meta.connection.id,
                meta.tables.len()
            );
            emit(format, &meta, output::render_metadata)
        }
        Command::Connections => {
            let connections = client.fetch_connections().await?;
            emit(format, &connections, |c| output::render_connections(c))
        }
        Command::Metadata { id } => {
            let meta = client.get_metadata(id).await?;
            emit(format, &meta, output::render_metadata)
        }
        Command::Rename { id, name } => {
            let connection = client
                .update_connection(id, &UpdateConnectionPayload { name })
                .await?;
            emit(format, &connection, output::render_connection)
        }
        Command::Query { id, sql } => {
            let result = client.run_query(&RunQueryPayload::new(id, sql)).await?;
            emit(format, &result, output::render_query_result)
        }
        Command::Ask {
            id,
            prompt,
            api_key,
        } => {
            let mut payload = NlQueryPayload::new(id, prompt);
            payload.api_key = api_key;
            debug!("Sending {:?}", payload);
            let result = client.nl_query(&payload).await?;
            emit(format, &result, output::render_nl_query_result)
        }
        Command::Health => {
            let health = client.health().await?;
            emit(format, &health, output::render_health)
        }
    }
}

/// Prints a response in the requested format.
fn emit<T: Serialize>(
    format: OutputFormat,
    value: &T,
    render: impl Fn(&T) -> String,
) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", output::to_json(value).map_err(ApiError::from)?),
        OutputFormat::Table => print!("{}", render(value)),
    }
    Ok(())
}
