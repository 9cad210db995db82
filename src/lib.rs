use std::env;

use diesel::connection::SimpleConnection;
use diesel::{Connection, SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations};
use dotenvy::dotenv;

pub mod error;
pub mod handlers;
pub mod models;
pub mod schema;
pub mod store;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

pub fn establish_connection() -> SqliteConnection {
    dotenv().ok();

    let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| "catalog.db".to_string());
    let mut conn = SqliteConnection::establish(&database_url)
        .unwrap_or_else(|_| panic!("Error connecting to {}", database_url));
    // SQLite leaves REFERENCES clauses inert unless the pragma is set.
    conn.batch_execute("PRAGMA foreign_keys = ON;")
        .expect("Failed to enable foreign keys");
    conn
}
