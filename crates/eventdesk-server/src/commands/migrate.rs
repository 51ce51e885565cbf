//! `eventdesk migrate`: create or update the database schema.

use tracing::info;

use eventdesk_adapters::sqlite;

use crate::{
    cli::MigrateArgs,
    config::AppConfig,
    error::ServerResult,
    output::OutputManager,
};

pub fn execute(args: MigrateArgs, config: AppConfig, output: OutputManager) -> ServerResult<()> {
    let url = args.database_url.unwrap_or(config.database.url);
    output.info(&format!("Migrating {url}"))?;

    let version = super::runtime()?.block_on(async {
        let pool = sqlite::connect(&url, 1).await?;
        sqlite::migrate(&pool).await?;
        let version = sqlite::schema_version(&pool).await?;
        pool.close().await;
        ServerResult::Ok(version)
    })?;

    info!(%url, version, "Schema migrated");
    output.success(&format!("Schema at version {version} ({url})"))?;
    Ok(())
}
