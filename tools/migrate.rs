use std::env;

use anyhow::Context;
use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use sqlx::Row;

use textbin::infrastructure::{
    persistence::{applied_migrations, MIGRATOR},
    storage::ContentHasher,
};

/// Apply or inspect the textbin database schema
#[derive(Parser)]
struct Cli {
    #[arg(long)]
    database_url: Option<String>,

    /// List pending migrations without applying them
    #[arg(long)]
    check: bool,

    /// Report stored documents whose content no longer matches their hash
    #[arg(long)]
    audit_hashes: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let db_url = cli
        .database_url
        .or_else(|| env::var("DATABASE_URL").ok())
        .context("DATABASE_URL must be set or passed with --database-url")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await
        .context("failed to connect to database")?;

    if cli.check {
        let applied = applied_migrations(&pool)
            .await
            .context("failed to read migration ledger")?;

        let pending: Vec<_> = MIGRATOR
            .iter()
            .filter(|m| !applied.contains(&m.version))
            .collect();

        println!("Pending migrations: {}", pending.len());
        for m in &pending {
            println!("  {} {}", m.version, m.description);
        }
    } else {
        MIGRATOR
            .run(&pool)
            .await
            .context("failed to apply migrations")?;
        println!("Migrations applied");
    }

    if cli.audit_hashes {
        let rows = sqlx::query("SELECT id, content, content_hash FROM documents")
            .fetch_all(&pool)
            .await
            .context("failed to read documents")?;

        let mut mismatched = 0usize;
        for r in rows.iter() {
            let id: String = r.get("id");
            let content: String = r.get("content");
            let stored: String = r.get("content_hash");

            let actual = ContentHasher::hash(content.as_bytes());
            if actual.as_hex() != stored {
                mismatched += 1;
                println!("id: {}, stored: {}, actual: {}", id, stored, actual);
            }
        }

        println!(
            "Audited {} documents, {} hash mismatches",
            rows.len(),
            mismatched
        );
    }

    pool.close().await;
    Ok(())
}
