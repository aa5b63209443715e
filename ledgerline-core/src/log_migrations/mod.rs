//! Log database migrations - embedded SQL files
//!
//! The event log lives in its own logs.duckdb with its own migration
//! history, so the reporting schema can evolve independently.

/// All log migrations, embedded at compile time.
/// Format: (filename, sql_content)
pub const LOG_MIGRATIONS: &[(&str, &str)] = &[
    ("000_migrations.sql", include_str!("000_migrations.sql")),
    (
        "001_initial_schema.sql",
        include_str!("001_initial_schema.sql"),
    ),
];
