use clap::{Parser, Subcommand};

mod db;
mod token;
mod user;

/// Pool size for one-shot administrative commands.
const CLI_MAX_CONNECTIONS: u32 = 2;

#[derive(Debug, Parser)]
#[command(name = "eshop-app", about = "Shop administration CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    User(user::UserCommand),
    Token(token::TokenCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::User(command) => user::run(command).await,
            Commands::Token(command) => token::run(command).await,
        }
    }
}

async fn connect(database_url: &str) -> Result<eshop_app::database::Db, String> {
    eshop_app::database::connect(database_url, CLI_MAX_CONNECTIONS)
        .await
        .map(eshop_app::database::Db::new)
        .map_err(|error| format!("failed to connect to database: {error}"))
}
