//! Register a user with a role.
//!
//! Identity is provisioned out of band; this tool writes the user row the
//! gateway's `X-Authenticated-User` header will later refer to.
//!
//! ```text
//! create-user --email ada@example.com --role LANDLORD --first-name Ada
//! ```

use std::process::ExitCode;

use clap::Parser;
use hotel_backend::domain::ports::{UserPersistenceError, UserRepository};
use hotel_backend::domain::{Email, Language, NewUser, Role, UserValidationError};
use hotel_backend::outbound::persistence::{
    DbPool, DieselUserRepository, MigrationError, PoolConfig, PoolError, run_pending_migrations,
};
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Parser)]
#[command(name = "create-user", about = "Register a hotel booking user")]
struct Cli {
    /// PostgreSQL URL of the booking database.
    #[arg(long, env = "HOTEL_DATABASE_URL")]
    database_url: String,
    /// Unique email address.
    #[arg(long)]
    email: String,
    /// CLIENT, LANDLORD, or ADMIN.
    #[arg(long, default_value = "CLIENT")]
    role: Role,
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    /// Interface language: RU, EN, or KZ.
    #[arg(long, default_value = "RU")]
    language: Language,
    /// Skip applying pending migrations first.
    #[arg(long)]
    skip_migrations: bool,
}

#[derive(Debug, thiserror::Error)]
enum CreateUserError {
    #[error(transparent)]
    Validation(#[from] UserValidationError),
    #[error(transparent)]
    Migration(#[from] MigrationError),
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error(transparent)]
    Persistence(#[from] UserPersistenceError),
}

async fn run(cli: Cli) -> Result<String, CreateUserError> {
    let registration = NewUser::new(Email::new(&cli.email)?, cli.role)
        .with_names(cli.first_name, cli.last_name)
        .with_language(cli.language);

    if !cli.skip_migrations {
        run_pending_migrations(&cli.database_url).await?;
    }
    let pool = DbPool::new(PoolConfig::new(cli.database_url).with_max_size(1)).await?;
    let user = DieselUserRepository::new(pool).insert(&registration).await?;
    Ok(format!("{} {} {}", user.id(), user.email(), user.role()))
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("tracing init failed: {e}");
    }

    match run(Cli::parse()).await {
        Ok(summary) => {
            println!("{summary}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "user registration failed");
            eprintln!("create-user: {err}");
            ExitCode::FAILURE
        }
    }
}
