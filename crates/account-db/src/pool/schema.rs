//! Table bootstrap run once at startup

use sqlx::PgPool;
use tracing::info;

/// The unique index on `email` is what settles concurrent registrations
const CREATE_ACCOUNTS: &str = r"
CREATE TABLE IF NOT EXISTS accounts (
    id            UUID PRIMARY KEY,
    username      TEXT NOT NULL,
    email         TEXT NOT NULL,
    password_hash TEXT NOT NULL,
    created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CONSTRAINT accounts_email_key UNIQUE (email)
)
";

/// Create the tables this crate needs if they are missing
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_ACCOUNTS).execute(pool).await?;

    // Warm the pool so the first client request does not pay for it
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM accounts")
        .fetch_one(pool)
        .await?;

    info!("Account schema ready");
    Ok(())
}
