use clap::Args;
use eshop_app::database::{self, MIGRATOR};

#[derive(Debug, Args)]
pub(crate) struct MigrateArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: MigrateArgs) -> Result<(), String> {
    let db = crate::cli::connect(&args.database_url).await?;

    database::migrate(db.pool())
        .await
        .map_err(|error| format!("failed to apply migrations: {error}"))?;

    println!("schema is at version {}", latest_version());

    Ok(())
}

fn latest_version() -> String {
    MIGRATOR
        .iter()
        .map(|migration| migration.version)
        .max()
        .map_or_else(|| "none".to_string(), |version| version.to_string())
}
