use std::error::Error;

use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection, EntityTrait, QueryOrder, Set};

mod access_codes {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "access_codes")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub code: String,
        pub remaining_uses: i64,
        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

#[derive(Parser, Debug)]
#[command(name = "yearplan_admin")]
#[command(about = "Admin utilities for yearplan (schema, access codes)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./yearplan.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply or inspect schema migrations.
    Migrate(Migrate),
    Code(Code),
}

#[derive(Args, Debug)]
struct Migrate {
    #[arg(value_enum, default_value_t = MigrateAction::Up)]
    action: MigrateAction,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MigrateAction {
    Up,
    Down,
    Fresh,
    Status,
}

#[derive(Args, Debug)]
struct Code {
    #[command(subcommand)]
    command: CodeCommand,
}

#[derive(Subcommand, Debug)]
enum CodeCommand {
    Create(CodeCreateArgs),
    List,
    /// Delete a code together with its plan.
    Revoke(CodeRevokeArgs),
}

#[derive(Args, Debug)]
struct CodeCreateArgs {
    #[arg(long, value_parser = clap::value_parser!(i64).range(1..))]
    uses: i64,
    /// Defaults to a random code.
    #[arg(long)]
    code: Option<String>,
}

#[derive(Args, Debug)]
struct CodeRevokeArgs {
    #[arg(long)]
    code: String,
}

fn random_code() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..12].to_uppercase()
}

async fn migrate(
    db: &DatabaseConnection,
    action: MigrateAction,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    match action {
        MigrateAction::Up => migration::Migrator::up(db, None).await?,
        MigrateAction::Down => migration::Migrator::down(db, Some(1)).await?,
        MigrateAction::Fresh => migration::Migrator::fresh(db).await?,
        MigrateAction::Status => migration::Migrator::status(db).await?,
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = Database::connect(&cli.database_url).await?;

    let command = match cli.command {
        Command::Migrate(Migrate { action }) => {
            migrate(&db, action).await?;
            println!("migrate {action:?}: done");
            return Ok(());
        }
        Command::Code(Code { command }) => command,
    };

    migration::Migrator::up(&db, None).await?;

    match command {
        CodeCommand::Create(args) => {
            let code = args
                .code
                .map(|code| code.trim().to_string())
                .unwrap_or_else(random_code);
            if code.is_empty() {
                eprintln!("access code must not be empty");
                std::process::exit(2);
            }

            if access_codes::Entity::find_by_id(code.clone())
                .one(&db)
                .await?
                .is_some()
            {
                eprintln!("access code already exists: {code}");
                std::process::exit(1);
            }

            let model = access_codes::ActiveModel {
                code: Set(code.clone()),
                remaining_uses: Set(args.uses),
                created_at: Set(Utc::now()),
            };
            access_codes::Entity::insert(model).exec(&db).await?;

            println!("created access code: {code} ({} uses)", args.uses);
        }
        CodeCommand::List => {
            let codes = access_codes::Entity::find()
                .order_by_asc(access_codes::Column::CreatedAt)
                .all(&db)
                .await?;
            for code in codes {
                println!(
                    "{}\t{}\t{}",
                    code.code,
                    code.remaining_uses,
                    code.created_at.to_rfc3339()
                );
            }
        }
        CodeCommand::Revoke(args) => {
            let result = access_codes::Entity::delete_by_id(args.code.clone())
                .exec(&db)
                .await?;
            if result.rows_affected == 0 {
                eprintln!("access code not found: {}", args.code);
                std::process::exit(1);
            }
            println!("revoked access code: {}", args.code);
        }
    }

    Ok(())
}
