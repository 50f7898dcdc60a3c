//! CLI administration tool for bloglist.
//!
//! Provides commands for managing users and their login sessions, viewing
//! blog statistics, and performing database checks without going through the
//! HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a user (password is prompted)
//! cargo run --bin admin -- user create --username root --name Superuser
//!
//! # List all users
//! cargo run --bin admin -- user list
//!
//! # Log a user out everywhere
//! cargo run --bin admin -- token revoke root
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `BCRYPT_COST` (optional): password hashing work factor, default 10

use bloglist::application::services::{AuthService, BlogService, UserService};
use bloglist::infrastructure::persistence::{
    PgBlogRepository, PgTokenRepository, PgUserRepository,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing bloglist.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage login tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Show blog statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Login name (at least 3 characters)
        #[arg(short, long)]
        username: Option<String>,

        /// Display name
        #[arg(short, long)]
        name: Option<String>,
    },

    /// List all users
    List,
}

/// Token management subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Revoke every login token of a user
    Revoke {
        /// Username whose tokens are revoked
        username: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Token { action } => handle_token_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn user_service(pool: &PgPool) -> UserService<PgUserRepository, PgBlogRepository> {
    let pool = Arc::new(pool.clone());
    let bcrypt_cost = std::env::var("BCRYPT_COST")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);

    UserService::new(
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(PgBlogRepository::new(pool)),
        bcrypt_cost,
    )
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let service = user_service(pool);

    match action {
        UserAction::Create { username, name } => create_user(&service, username, name).await?,
        UserAction::List => list_users(&service).await?,
    }

    Ok(())
}

/// Creates a user with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for username and display name (unless provided)
/// 2. Prompt for the password twice, hidden
/// 3. Hash with bcrypt and store
async fn create_user(
    service: &UserService<PgUserRepository, PgBlogRepository>,
    username: Option<String>,
    name: Option<String>,
) -> Result<()> {
    println!("{}", "👤 Create User".bright_blue().bold());
    println!();

    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    let name = match name {
        Some(n) => Some(n),
        None => {
            let entered: String = Input::new()
                .with_prompt("Name (optional)")
                .allow_empty(true)
                .interact_text()?;
            Some(entered)
        }
    };

    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()?;

    let user = service
        .create_user(username, name, password)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!();
    println!("{}", "✅ User created successfully!".green().bold());
    println!("  ID:       {}", user.id.to_string().bright_black());
    println!("  Username: {}", user.username.cyan());
    println!();

    Ok(())
}

/// Lists all users with the number of posts each created.
///
/// # Output Format
///
/// ```text
/// 📋 Users
///
///   ID  Username             Name                      Blogs
///   ───────────────────────────────────────────────────────────
///   1   root                 Superuser                 3
/// ```
async fn list_users(service: &UserService<PgUserRepository, PgBlogRepository>) -> Result<()> {
    println!("{}", "📋 Users".bright_blue().bold());
    println!();

    let users = service
        .list_with_blogs()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        println!();
        println!(
            "  Create one with: {} admin user create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<3} {:<20} {:<25} {:<6}",
        "ID".bright_white().bold(),
        "Username".bright_white().bold(),
        "Name".bright_white().bold(),
        "Blogs".bright_white().bold()
    );
    println!("  {}", "─".repeat(59).bright_black());

    for entry in &users {
        println!(
            "  {:<3} {:<20} {:<25} {}",
            entry.user.id.to_string().bright_black(),
            entry.user.username.cyan(),
            entry.user.name.as_deref().unwrap_or("-"),
            entry.blogs.len().to_string().bright_green()
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Dispatches token management commands.
async fn handle_token_action(action: TokenAction, pool: &PgPool) -> Result<()> {
    match action {
        TokenAction::Revoke { username } => revoke_tokens(pool, username).await,
    }
}

/// Revokes every login token of a user after confirmation.
async fn revoke_tokens(pool: &PgPool, username: String) -> Result<()> {
    println!("{}", "🔒 Revoke Login Tokens".bright_blue().bold());
    println!();

    let user = user_service(pool)
        .get_by_username(&username)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("  User: {}", user.username.cyan());
    println!("  ID:   {}", user.id.to_string().bright_black());
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Revoke all tokens of this user?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    // Revocation never hashes a token, so the signing secret is not needed.
    let pool = Arc::new(pool.clone());
    let auth = AuthService::new(
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(PgTokenRepository::new(pool)),
        String::new(),
        0,
    );
    let revoked = auth
        .revoke_all(user.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke tokens: {}", e))?;

    println!();
    if revoked == 0 {
        println!("{}", "⚠️  No active tokens found".yellow());
    } else {
        println!(
            "{} {}",
            "✅ Revoked tokens:".green().bold(),
            revoked.to_string().bright_white().bold()
        );
    }
    println!();

    Ok(())
}

/// Displays blog list statistics.
///
/// Shows post and like counts, the favorite post and the leading authors.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let service = BlogService::new(Arc::new(PgBlogRepository::new(Arc::new(pool.clone()))));
    let summary = service
        .summary()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to compute statistics: {}", e))?;

    let users_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    let tokens_count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM user_tokens WHERE revoked_at IS NULL AND expires_at > NOW()",
    )
    .fetch_one(pool)
    .await?;

    println!(
        "  Blogs:         {}",
        summary.blog_count.to_string().bright_green().bold()
    );
    println!(
        "  Likes:         {}",
        summary.total_likes.to_string().bright_green().bold()
    );
    println!(
        "  Users:         {}",
        users_count.to_string().bright_green().bold()
    );
    println!(
        "  Active tokens: {}",
        tokens_count.to_string().bright_green().bold()
    );
    println!();

    match summary.favorite_blog {
        Some(fav) => println!(
            "  Favorite:      {} by {} ({} likes)",
            fav.title.cyan(),
            fav.author,
            fav.likes
        ),
        None => println!("  Favorite:      {}", "-".bright_black()),
    }
    match summary.most_blogs {
        Some(top) => println!("  Most blogs:    {} ({})", top.author.cyan(), top.blogs),
        None => println!("  Most blogs:    {}", "-".bright_black()),
    }
    match summary.most_likes {
        Some(top) => println!("  Most likes:    {} ({})", top.author.cyan(), top.likes),
        None => println!("  Most likes:    {}", "-".bright_black()),
    }
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let migrations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await
                .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
