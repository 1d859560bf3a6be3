//! Clearing seeded tables.
//!
//! Both undo operations go through [`clear_table`], parameterized by
//! [`ClearOptions`]. On `PostgreSQL` a cascading or identity-resetting clear is a
//! `TRUNCATE`; a plain clear is a `DELETE`. `SQLite` has no `TRUNCATE`, so cascade
//! is expressed by clearing dependent tables first and identity reset by
//! dropping the table's `sqlite_sequence` entry.

use crate::config::settings::Environment;
use crate::errors::Result;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};
use tracing::{debug, info, instrument};

/// Tables owned by the seeders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedTable {
    /// `categories`
    Categories,
    /// `reward_points`
    RewardPoints,
}

impl SeedTable {
    /// Unqualified table name, as declared on the entity.
    #[must_use]
    pub const fn table_name(self) -> &'static str {
        match self {
            Self::Categories => "categories",
            Self::RewardPoints => "reward_points",
        }
    }

    /// Seeded tables holding foreign keys into this one.
    #[must_use]
    pub const fn dependents(self) -> &'static [Self] {
        match self {
            Self::Categories => &[Self::RewardPoints],
            Self::RewardPoints => &[],
        }
    }
}

/// How a table is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearOptions {
    /// Also clear rows in dependent tables
    pub cascade: bool,
    /// Restart the identity sequence so the next row gets the minimum id
    pub reset_identity: bool,
}

impl ClearOptions {
    /// Plain delete: no cascade, identities keep counting.
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            cascade: false,
            reset_identity: false,
        }
    }

    /// Truncate semantics: cascade and restart identities.
    #[must_use]
    pub const fn truncate() -> Self {
        Self {
            cascade: true,
            reset_identity: true,
        }
    }

    /// Production clears truncate; every other environment deletes.
    #[must_use]
    pub const fn for_environment(environment: Environment) -> Self {
        if environment.is_production() {
            Self::truncate()
        } else {
            Self::plain()
        }
    }
}

/// Builds the SQL statements clearing `table` on `backend`, in execution order.
///
/// `schema` qualifies the table name on `PostgreSQL` and is ignored elsewhere.
#[must_use]
pub fn clear_statements(
    backend: DatabaseBackend,
    table: SeedTable,
    schema: Option<&str>,
    options: ClearOptions,
) -> Vec<String> {
    match backend {
        DatabaseBackend::Postgres => {
            let qualified = schema.map_or_else(
                || table.table_name().to_string(),
                |schema| format!("{schema}.{}", table.table_name()),
            );
            if options == ClearOptions::plain() {
                return vec![format!("DELETE FROM {qualified}")];
            }
            let mut sql = format!("TRUNCATE TABLE {qualified}");
            if options.reset_identity {
                sql.push_str(" RESTART IDENTITY");
            }
            if options.cascade {
                sql.push_str(" CASCADE");
            }
            vec![sql]
        }
        DatabaseBackend::Sqlite => {
            let tables = affected_tables(table, options);
            let mut statements: Vec<String> = tables
                .iter()
                .map(|t| format!("DELETE FROM \"{}\"", t.table_name()))
                .collect();
            if options.reset_identity {
                statements.extend(tables.iter().map(|t| {
                    format!(
                        "DELETE FROM sqlite_sequence WHERE name = '{}'",
                        t.table_name()
                    )
                }));
            }
            statements
        }
        DatabaseBackend::MySql => {
            let tables = affected_tables(table, options);
            let mut statements: Vec<String> = tables
                .iter()
                .map(|t| format!("DELETE FROM `{}`", t.table_name()))
                .collect();
            if options.reset_identity {
                statements.extend(
                    tables
                        .iter()
                        .map(|t| format!("ALTER TABLE `{}` AUTO_INCREMENT = 1", t.table_name())),
                );
            }
            statements
        }
    }
}

/// Dependents first, so their foreign keys never point at deleted rows.
fn affected_tables(table: SeedTable, options: ClearOptions) -> Vec<SeedTable> {
    let mut tables = Vec::new();
    if options.cascade {
        tables.extend_from_slice(table.dependents());
    }
    tables.push(table);
    tables
}

/// Removes every row of `table`. Clearing an empty table is a no-op.
#[instrument(skip(db))]
pub async fn clear_table<C>(
    db: &C,
    table: SeedTable,
    schema: Option<&str>,
    options: ClearOptions,
) -> Result<()>
where
    C: ConnectionTrait,
{
    let backend = db.get_database_backend();
    for sql in clear_statements(backend, table, schema, options) {
        debug!("Executing: {}", sql);
        db.execute(Statement::from_string(backend, sql)).await?;
    }
    info!("Cleared table '{}'", table.table_name());
    Ok(())
}
