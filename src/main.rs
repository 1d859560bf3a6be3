use clap::{Parser, Subcommand, ValueEnum};
use dotenvy::dotenv;
use rewards_seed::config::categories::{default_category_tree, load_category_tree};
use rewards_seed::config::database::{create_connection, create_tables, get_database_url};
use rewards_seed::config::settings::{Environment, SeedSettings};
use rewards_seed::seeds::{
    self, FileRewardSource, HttpRewardSource, seed_categories, seed_reward_points,
    undo_categories, undo_reward_points,
};
use rewards_seed::Result;
use sea_orm::DatabaseConnection;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Seed and undo card reward data")]
struct Cli {
    /// Database URL; defaults to DATABASE_URL
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Deployment environment; defaults to APP_ENV
    #[arg(long, global = true)]
    env: Option<String>,

    /// Schema namespace for production truncates; defaults to SCHEMA
    #[arg(long, global = true)]
    schema: Option<String>,

    /// Create the tables before running
    #[arg(long, global = true)]
    init_schema: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Insert seed data
    Seed {
        #[arg(value_enum, default_value_t = Target::All)]
        target: Target,

        /// TOML file replacing the built-in category tree
        #[arg(long)]
        categories_file: Option<PathBuf>,

        /// Reward data URL; defaults to REWARDS_URL
        #[arg(long, conflicts_with = "rewards_file")]
        rewards_url: Option<String>,

        /// Read reward data from a local JSON file instead of the network
        #[arg(long)]
        rewards_file: Option<PathBuf>,
    },
    /// Remove seeded data
    Undo {
        #[arg(value_enum, default_value_t = Target::All)]
        target: Target,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Target {
    All,
    Categories,
    RewardPoints,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    let cli = Cli::parse();

    let mut settings = SeedSettings::from_env()
        .inspect_err(|e| error!("Failed to load settings: {}", e))?;
    if let Some(env) = &cli.env {
        settings.environment = env.parse().unwrap_or(Environment::Development);
    }
    if let Some(schema) = &cli.schema {
        settings = settings.with_schema(schema)?;
    }
    info!("Running in {} environment", settings.environment);

    let database_url = cli.database_url.clone().unwrap_or_else(get_database_url);
    let db = create_connection(&database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;

    if cli.init_schema {
        create_tables(&db).await?;
    }

    run(&db, cli.command, settings)
        .await
        .inspect_err(|e| error!("Seeding failed: {}", e))
}

async fn run(db: &DatabaseConnection, command: Commands, mut settings: SeedSettings) -> Result<()> {
    match command {
        Commands::Seed {
            target,
            categories_file,
            rewards_url,
            rewards_file,
        } => {
            if let Some(url) = rewards_url {
                settings.rewards_url = url;
            }
            let tree = match categories_file {
                Some(path) => load_category_tree(path)?,
                None => default_category_tree(),
            };

            match (target, rewards_file) {
                (Target::Categories, _) => {
                    seed_categories(db, &tree).await?;
                }
                (Target::RewardPoints, Some(path)) => {
                    seed_reward_points(db, &FileRewardSource::new(path)).await?;
                }
                (Target::RewardPoints, None) => {
                    seed_reward_points(db, &HttpRewardSource::from_settings(&settings)).await?;
                }
                (Target::All, Some(path)) => {
                    seeds::seed_all(db, &tree, &FileRewardSource::new(path)).await?;
                }
                (Target::All, None) => {
                    seeds::seed_all(db, &tree, &HttpRewardSource::from_settings(&settings))
                        .await?;
                }
            }
        }
        Commands::Undo { target } => match target {
            Target::All => seeds::undo_all(db, &settings).await?,
            Target::Categories => undo_categories(db, &settings).await?,
            Target::RewardPoints => undo_reward_points(db, &settings).await?,
        },
    }
    Ok(())
}
