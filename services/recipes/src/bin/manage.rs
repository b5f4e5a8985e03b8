//! Administrative commands for the recipes service.
//!
//! ```bash
//! manage import-ingredients data/ingredients.json
//! SUPERUSER_EMAIL=root@example.com SUPERUSER_USERNAME=root SUPERUSER_PASSWORD=... \
//!     manage create-superuser
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sea_orm::Database;
use serde::Deserialize;

use larder_core::config::Config;
use larder_core::tracing::init_tracing;

use larder_recipes::domain::account::NewAccount;
use larder_recipes::domain::types::NewIngredient;
use larder_recipes::infra::db::{DbCatalogRepository, DbUserRepository};
use larder_recipes::usecase::catalog::ImportIngredientsUseCase;
use larder_recipes::usecase::user::CreateSuperuserUseCase;

#[derive(Parser)]
#[command(about = "Recipes service administration")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load ingredients from a JSON array of {"name", "measurement_unit"} objects
    ImportIngredients {
        /// Path to the JSON file
        file: PathBuf,
    },
    /// Create an admin account from SUPERUSER_* variables unless one exists
    CreateSuperuser,
}

#[derive(Debug, Deserialize)]
struct ManageConfig {
    database_url: String,
}

impl Config for ManageConfig {}

#[derive(Debug, Deserialize)]
struct SuperuserConfig {
    superuser_email: String,
    superuser_username: String,
    superuser_password: String,
    #[serde(default = "default_first_name")]
    superuser_first_name: String,
    #[serde(default = "default_last_name")]
    superuser_last_name: String,
}

impl Config for SuperuserConfig {}

fn default_first_name() -> String {
    "Admin".to_owned()
}

fn default_last_name() -> String {
    "Admin".to_owned()
}

#[derive(Debug, Deserialize)]
struct IngredientRow {
    name: String,
    measurement_unit: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = ManageConfig::try_from_env().context("DATABASE_URL must be set")?;
    let db = Database::connect(&config.database_url)
        .await
        .context("connect to database")?;

    match args.command {
        Command::ImportIngredients { file } => {
            let raw = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("read {}", file.display()))?;
            let rows: Vec<IngredientRow> = serde_json::from_str(&raw)
                .with_context(|| format!("parse {}", file.display()))?;
            let usecase = ImportIngredientsUseCase {
                catalog: DbCatalogRepository { db },
            };
            let report = usecase
                .execute(
                    rows.into_iter()
                        .map(|row| NewIngredient {
                            name: row.name,
                            measurement_unit: row.measurement_unit,
                        })
                        .collect(),
                )
                .await?;
            for (row, reason) in &report.skipped {
                println!(
                    "skipped {} ({}): {reason}",
                    row.name, row.measurement_unit
                );
            }
            println!(
                "imported {} ingredient(s), skipped {}",
                report.imported,
                report.skipped.len()
            );
        }
        Command::CreateSuperuser => {
            let superuser =
                SuperuserConfig::try_from_env().context("SUPERUSER_* variables must be set")?;
            let usecase = CreateSuperuserUseCase {
                users: DbUserRepository { db },
            };
            let created = usecase
                .execute(NewAccount {
                    email: superuser.superuser_email,
                    username: superuser.superuser_username,
                    first_name: superuser.superuser_first_name,
                    last_name: superuser.superuser_last_name,
                    password: superuser.superuser_password,
                })
                .await?;
            match created {
                Some(user) => println!("created superuser {} ({})", user.username, user.id),
                None => println!("an admin account already exists; nothing to do"),
            }
        }
    }
    Ok(())
}
