use clap::Args;
use eshop_app::domain::users::{
    PgUsersService, UsersService,
    data::NewUser,
    records::UserUuid,
};

#[derive(Debug, Args)]
pub(crate) struct CreateAdminArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Display name
    #[arg(long)]
    name: String,

    /// Login email
    #[arg(long)]
    email: String,

    /// Login password
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    password: String,

    /// Contact phone number
    #[arg(long, default_value = "")]
    phone: String,
}

pub(crate) async fn run(args: CreateAdminArgs) -> Result<(), String> {
    if args.email.trim().is_empty() {
        return Err("email cannot be empty".to_string());
    }

    let db = crate::cli::connect(&args.database_url).await?;
    let service = PgUsersService::new(db);

    let user = service
        .create_user(NewUser {
            uuid: UserUuid::new(),
            name: args.name,
            email: args.email,
            password: args.password,
            phone: args.phone,
            is_admin: true,
            street: String::new(),
            apartment: String::new(),
            zip: String::new(),
            city: String::new(),
            country: String::new(),
        })
        .await
        .map_err(|error| format!("failed to create admin: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("email: {}", user.email);
    println!("is_admin: {}", user.is_admin);

    Ok(())
}
