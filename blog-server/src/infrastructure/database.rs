use anyhow::{Context, Result};
use bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};

pub const DEFAULT_DATABASE_NAME: &str = "blog-app";

/// Connects to the document store and checks it answers a ping.
///
/// The database is the one named in the connection string, or
/// [`DEFAULT_DATABASE_NAME`] when the URL carries none.
pub async fn connect(database_url: &str) -> Result<(Client, Database)> {
    let options = ClientOptions::parse(database_url)
        .await
        .context("Invalid DATABASE_URL")?;

    let database_name = options
        .default_database
        .clone()
        .unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string());

    let client = Client::with_options(options)?;
    let database = client.database(&database_name);

    database
        .run_command(doc! { "ping": 1 })
        .await
        .with_context(|| format!("Failed to reach database `{}`", database_name))?;

    tracing::info!("Connected to database `{}`", database_name);
    Ok((client, database))
}
