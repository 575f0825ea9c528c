use clap::{Args, Subcommand};

mod list;
mod revoke;

#[derive(Debug, Args)]
pub(crate) struct TokenCommand {
    #[command(subcommand)]
    command: TokenSubcommand,
}

#[derive(Debug, Subcommand)]
enum TokenSubcommand {
    /// List a user's session tokens
    List(list::ListTokensArgs),
    /// Revoke a session token
    Revoke(revoke::RevokeTokenArgs),
}

pub(crate) async fn run(command: TokenCommand) -> Result<(), String> {
    match command.command {
        TokenSubcommand::List(args) => list::run(args).await,
        TokenSubcommand::Revoke(args) => revoke::run(args).await,
    }
}
