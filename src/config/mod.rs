/// Database configuration and connection management
pub mod database;

/// Category tree definition and loading from a TOML file
pub mod categories;

/// Environment-driven settings: production flag, schema, rewards source
pub mod settings;
