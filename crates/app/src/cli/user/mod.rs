use clap::{Args, Subcommand};

mod create_admin;

#[derive(Debug, Args)]
pub(crate) struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Debug, Subcommand)]
enum UserSubcommand {
    /// Create a user with administrator rights
    CreateAdmin(create_admin::CreateAdminArgs),
}

pub(crate) async fn run(command: UserCommand) -> Result<(), String> {
    match command.command {
        UserSubcommand::CreateAdmin(args) => create_admin::run(args).await,
    }
}
