//! Basic usage example for fluentql
//!
//! Run with: cargo run --example basic -p fluentql
//!
//! Set DATABASE_URL (or the FLUENTQL_* variables) in a .env file or the environment.
//! Without a database the example still prints every rendered statement.

use fluentql::{
    ConnectionConfig, FulltextMode, QbError, Query, Traced, create_pool, reference,
};
use tracing::Level;

fn statements() -> Result<Vec<Query>, QbError> {
    let select = Query::new()
        .select("users", &["id", "username", "email"])?
        .left_join("profiles", "user_id", "id")?
        .where_("active", true)?
        .and_where("email", None::<&str>)?
        .or_where("username", "admin")?
        .order_by_desc("id")
        .limit(0, 10)?;

    let count = Query::new()
        .count("orders", "id")?
        .inner_join("users", "id", reference("orders", "user_id"))?
        .where_("status", "paid")?;

    let search = Query::new()
        .select("articles", &["id", "title"])?
        .fulltext("title,body", "rust", FulltextMode::Boolean)?
        .where_fulltext("title,body", "rust", FulltextMode::Boolean)?
        .order_by_desc("score");

    let insert = Query::new().insert(
        "users",
        [("username", "alice"), ("email", "alice@example.com")],
    )?;

    let update = Query::new()
        .update("users", [("email", "alice@example.org")])?
        .where_("username", "alice")?;

    Ok(vec![select, count, search, insert, update])
}

#[tokio::main]
async fn main() -> Result<(), QbError> {
    // Load .env file
    dotenvy::dotenv().ok();

    let mut queries = Vec::new();
    for query in statements()? {
        let query = query.prepare()?;
        println!("{}", query.sql().unwrap_or_default());
        queries.push(query);
    }

    let config = match ConnectionConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            println!("skipping execution: {err}");
            return Ok(());
        }
    };

    let pool = Traced::new(create_pool(&config)?).level(Level::INFO);
    for query in &queries {
        let messages = query.execute(&pool).await?;
        println!("{} messages", messages.len());
    }

    Ok(())
}
