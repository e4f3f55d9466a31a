use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

use jobboard::cli::{create_user, list_users};
use jobboard::config::database::{DatabaseConfig, init_db_pool};
use jobboard::jobboard_config::AuthConfig;
use jobboard::storage::PgCredentialStore;

#[derive(Parser)]
#[command(name = "jobboard-cli")]
#[command(about = "Jobboard CLI - Administrative tools for Jobboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a user account
    CreateUser {
        /// Display name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address (stored exactly as given)
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// List all registered users
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    let pool = init_db_pool(&DatabaseConfig::from_env()?).await?;
    let store = PgCredentialStore::new(pool);

    match cli.command {
        Commands::CreateUser {
            name,
            email,
            password,
        } => handle_create_user(&store, name, email, password).await,
        Commands::ListUsers => handle_list_users(&store).await,
    }
}

async fn handle_create_user(
    store: &PgCredentialStore,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let name = match name {
        Some(name) => name,
        None => Input::new()
            .with_prompt("Name")
            .interact_text()
            .context("Failed to read name")?,
    };

    let email = match email {
        Some(email) => email,
        None => Input::new()
            .with_prompt("Email address")
            .interact_text()
            .context("Failed to read email")?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .context("Failed to read password")?,
    };

    let cost = AuthConfig::from_env().password_cost;
    let record = create_user(store, &name, &email, &password, cost).await?;

    println!("\nUser created successfully!");
    println!("   ID: {}", record.id);
    println!("   Email: {}", record.email);
    println!("   Name: {}", record.name);

    Ok(())
}

async fn handle_list_users(store: &PgCredentialStore) -> anyhow::Result<()> {
    let users = list_users(store).await?;

    if users.is_empty() {
        println!("No users registered.");
        return Ok(());
    }

    println!("{:<38} {:<30} {:<32} CREATED", "ID", "NAME", "EMAIL");
    for user in users {
        println!(
            "{:<38} {:<30} {:<32} {}",
            user.id,
            user.name,
            user.email,
            user.created_at.format("%Y-%m-%d %H:%M")
        );
    }

    Ok(())
}
