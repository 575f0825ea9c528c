use clap::Args;
use eshop_app::{
    auth::PgAuthService,
    domain::users::{PgUsersService, UsersService},
};
use jiff::{SignedDuration, Timestamp};

#[derive(Debug, Args)]
pub(crate) struct ListTokensArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Email of the user whose tokens should be listed
    #[arg(long)]
    email: String,
}

pub(crate) async fn run(args: ListTokensArgs) -> Result<(), String> {
    let db = crate::cli::connect(&args.database_url).await?;

    let user = PgUsersService::new(db.clone())
        .find_user_by_email(&args.email)
        .await
        .map_err(|error| format!("failed to find user {}: {error}", args.email))?;

    // Listing never issues tokens, so the ttl is irrelevant here.
    let tokens = PgAuthService::new(&db, SignedDuration::ZERO)
        .list_session_tokens(user.uuid)
        .await
        .map_err(|error| format!("failed to list tokens: {error}"))?;

    if tokens.is_empty() {
        println!("no tokens found for {}", user.email);
        return Ok(());
    }

    let now = Timestamp::now();

    for token in tokens {
        println!("token_uuid: {}", token.uuid);
        println!("user_uuid: {}", token.user_uuid);
        println!("token_version: {}", token.version.as_i16());
        println!("created_at: {}", token.created_at);
        println!(
            "last_used_at: {}",
            token
                .last_used_at
                .map_or_else(|| "never".to_string(), |value| value.to_string())
        );
        println!("expires_at: {}", token.expires_at);
        println!(
            "revoked_at: {}",
            token
                .revoked_at
                .map_or_else(|| "-".to_string(), |value| value.to_string())
        );
        println!("active: {}", token.is_active(now));
        println!();
    }

    Ok(())
}
