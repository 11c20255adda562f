// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Workspace automation for Larder.
//!
//! ```bash
//! cargo xtask ci                       # lint, test, verify migrations
//! cargo xtask lint                     # clippy, rustfmt --check, rustdoc
//! cargo xtask fmt                      # rustfmt in place
//! cargo xtask test                     # every target, then doc tests
//! cargo xtask coverage                 # lcov report in target/lcov.info
//! cargo xtask migrate -d larder.db     # create or upgrade a database file
//! cargo xtask verify-migrations        # up/down round trip on a scratch file
//! ```

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use cargo_metadata::MetadataCommand;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{
    Result,
    eyre::{Context, eyre},
};
use diesel::sql_types::{Nullable, Text};
use diesel::{Connection, QueryableByName, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{error, info};
use tracing_log::AsTrace;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../crates/persistence/migrations");

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    task: Task,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

#[derive(Clone, Debug, Subcommand)]
enum Task {
    /// Lint, test, and verify migrations
    Ci,

    /// Run clippy, check formatting, and build docs with warnings denied
    #[command(visible_alias = "l")]
    Lint,

    /// Format the workspace
    Fmt,

    /// Run all tests
    #[command(visible_alias = "t")]
    Test,

    /// Write an lcov coverage report to `target/lcov.info`
    #[command(visible_alias = "cov")]
    Coverage,

    /// Create or upgrade a `SQLite` database file
    Migrate {
        /// Path to the database file
        #[arg(short, long)]
        database: PathBuf,
    },

    /// Apply and revert all migrations on a scratch database
    #[command(visible_alias = "vm")]
    VerifyMigrations,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args: Args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.verbosity.log_level_filter().as_trace())
        .without_time()
        .init();

    if let Err(err) = run(&args.task) {
        error!("{err:?}");
        std::process::exit(1);
    }
    Ok(())
}

fn run(task: &Task) -> Result<()> {
    match task {
        Task::Ci => {
            lint()?;
            test()?;
            verify_migrations()
        }
        Task::Lint => lint(),
        Task::Fmt => cargo(&["fmt", "--all"]),
        Task::Test => test(),
        Task::Coverage => cargo(&[
            "llvm-cov",
            "--workspace",
            "--lcov",
            "--output-path",
            "target/lcov.info",
        ]),
        Task::Migrate { database } => migrate(database),
        Task::VerifyMigrations => verify_migrations(),
    }
}

/// Runs `cargo` with `args`, failing on a non-zero exit.
fn cargo(args: &[&str]) -> Result<()> {
    info!("cargo {}", args.join(" "));
    duct::cmd("cargo", args.iter().copied())
        .run()
        .wrap_err_with(|| format!("cargo {} failed", args.join(" ")))?;
    Ok(())
}

fn lint() -> Result<()> {
    cargo(&["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"])?;
    cargo(&["fmt", "--all", "--check"])?;

    let metadata = MetadataCommand::new()
        .no_deps()
        .exec()
        .wrap_err("Failed to read workspace metadata")?;
    for package in metadata.workspace_default_packages() {
        info!("Documenting {}", package.name.as_str());
        duct::cmd!("cargo", "doc", "--no-deps", "--package", package.name.as_str())
            .env("RUSTDOCFLAGS", "-D warnings")
            .run()
            .wrap_err_with(|| format!("rustdoc failed for {}", package.name.as_str()))?;
    }
    Ok(())
}

fn test() -> Result<()> {
    cargo(&["test", "--workspace", "--all-targets"])?;
    // --all-targets skips doc tests
    cargo(&["test", "--workspace", "--doc"])
}

/// Opens `database` the way the server does, applying pending migrations.
fn migrate(database: &Path) -> Result<()> {
    info!("Migrating {}", database.display());
    larder_persistence::Persistence::new_with_file(database)
        .wrap_err_with(|| format!("Failed to migrate {}", database.display()))?;
    info!("{} is up to date", database.display());
    Ok(())
}

/// Applies every migration to a scratch file, checks the resulting schema,
/// reverts everything, and checks that no tables are left.
///
/// The scratch file is removed whether or not verification passes.
fn verify_migrations() -> Result<()> {
    let scratch: PathBuf = std::env::temp_dir().join("larder-verify-migrations.sqlite");
    let _ = std::fs::remove_file(&scratch);

    let outcome: Result<()> = round_trip(&scratch);
    let _ = std::fs::remove_file(&scratch);
    outcome?;

    info!("Migrations verified");
    Ok(())
}

fn round_trip(scratch: &Path) -> Result<()> {
    let mut conn: SqliteConnection = SqliteConnection::establish(&scratch.display().to_string())
        .wrap_err("Failed to open scratch database")?;

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| eyre!("Failed to apply migrations: {err}"))?;
    info!("Applied {} migration(s)", applied.len());

    let schema: Schema = Schema::read(&mut conn)?;
    let problems: Vec<String> = schema.problems();
    if !problems.is_empty() {
        return Err(eyre!("Schema check failed:\n  {}", problems.join("\n  ")));
    }
    info!("Schema has {} table(s)", schema.tables.len());

    conn.revert_all_migrations(MIGRATIONS)
        .map_err(|err| eyre!("Failed to revert migrations: {err}"))?;

    let leftover: Schema = Schema::read(&mut conn)?;
    if !leftover.tables.is_empty() {
        let names: Vec<&str> = leftover.tables.keys().map(String::as_str).collect();
        return Err(eyre!("Tables left after revert: {}", names.join(", ")));
    }
    Ok(())
}

/// One row of a join between `sqlite_master` and a pragma table function.
#[derive(QueryableByName)]
struct TableColumn {
    #[diesel(sql_type = Text)]
    table_name: String,
    #[diesel(sql_type = Nullable<Text>)]
    column_name: Option<String>,
}

#[derive(QueryableByName)]
struct ForeignKeyRow {
    #[diesel(sql_type = Text)]
    table_name: String,
    #[diesel(sql_type = Text)]
    from_column: String,
    #[diesel(sql_type = Text)]
    to_table: String,
    #[diesel(sql_type = Nullable<Text>)]
    to_column: Option<String>,
}

#[derive(Debug, Default)]
struct TableShape {
    columns: BTreeSet<String>,
    primary_key: BTreeSet<String>,
    /// Columns that lead at least one index.
    index_heads: BTreeSet<String>,
    /// `(from_column, to_table, to_column)`; a missing target column means
    /// the target's primary key.
    foreign_keys: Vec<(String, String, Option<String>)>,
}

#[derive(Debug)]
struct Schema {
    tables: BTreeMap<String, TableShape>,
}

const USER_TABLES: &str = "sqlite_master m WHERE m.type = 'table' \
     AND m.name NOT LIKE 'sqlite_%' AND m.name <> '__diesel_schema_migrations'";

impl Schema {
    fn read(conn: &mut SqliteConnection) -> Result<Self> {
        let mut tables: BTreeMap<String, TableShape> = BTreeMap::new();

        let columns: Vec<TableColumn> = diesel::sql_query(format!(
            "SELECT m.name AS table_name, p.name AS column_name \
             FROM {USER_TABLES}, pragma_table_info(m.name) p"
        ))
        .load(conn)
        .wrap_err("Failed to read columns")?;
        let keys: Vec<TableColumn> = diesel::sql_query(format!(
            "SELECT m.name AS table_name, p.name AS column_name \
             FROM {USER_TABLES}, pragma_table_info(m.name) p WHERE p.pk > 0"
        ))
        .load(conn)
        .wrap_err("Failed to read primary keys")?;
        let heads: Vec<TableColumn> = diesel::sql_query(format!(
            "SELECT m.name AS table_name, c.name AS column_name \
             FROM {USER_TABLES}, pragma_index_list(m.name) i, pragma_index_info(i.name) c \
             WHERE c.seqno = 0"
        ))
        .load(conn)
        .wrap_err("Failed to read indexes")?;
        let foreign_keys: Vec<ForeignKeyRow> = diesel::sql_query(format!(
            "SELECT m.name AS table_name, f.\"from\" AS from_column, \
             f.\"table\" AS to_table, f.\"to\" AS to_column \
             FROM {USER_TABLES}, pragma_foreign_key_list(m.name) f"
        ))
        .load(conn)
        .wrap_err("Failed to read foreign keys")?;

        for row in columns {
            let shape: &mut TableShape = tables.entry(row.table_name).or_default();
            shape.columns.extend(row.column_name);
        }
        for row in keys {
            let shape: &mut TableShape = tables.entry(row.table_name).or_default();
            shape.primary_key.extend(row.column_name);
        }
        for row in heads {
            let shape: &mut TableShape = tables.entry(row.table_name).or_default();
            shape.index_heads.extend(row.column_name);
        }
        for row in foreign_keys {
            let shape: &mut TableShape = tables.entry(row.table_name).or_default();
            shape
                .foreign_keys
                .push((row.from_column, row.to_table, row.to_column));
        }

        Ok(Self { tables })
    }

    /// Tables without a primary key, dangling foreign keys, and foreign key
    /// columns no index leads with.
    fn problems(&self) -> Vec<String> {
        let mut problems: Vec<String> = Vec::new();

        for (name, shape) in &self.tables {
            if shape.primary_key.is_empty() {
                problems.push(format!("{name}: no primary key"));
            }

            for (from, to_table, to_column) in &shape.foreign_keys {
                let resolves: bool = self.tables.get(to_table).is_some_and(|target| {
                    to_column.as_ref().map_or(!target.primary_key.is_empty(), |column| {
                        target.columns.contains(column)
                    })
                });
                if !resolves {
                    problems.push(format!(
                        "{name}.{from}: references missing {to_table}.{}",
                        to_column.as_deref().unwrap_or("<primary key>")
                    ));
                }
                // A single-column integer primary key is the rowid and needs no index.
                let rowid: bool = shape.primary_key.len() == 1 && shape.primary_key.contains(from);
                if !rowid && !shape.index_heads.contains(from) {
                    problems.push(format!("{name}.{from}: foreign key is not indexed"));
                }
            }
        }

        problems
    }
}
