//! Database schema bootstrap

use anyhow::Result;
use log::error;

pub fn apply_migrations(conn: &mut diesel::PgConnection) -> Result<()> {
    use diesel_migrations::HarnessWithOutput;
    use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

    const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

    let mut harness = HarnessWithOutput::write_to_stdout(conn);
    if let Err(e) = harness.run_pending_migrations(MIGRATIONS) {
        error!("Failed to apply migrations: {}", e);
        return Err(anyhow::anyhow!("Migration error: {}", e));
    }

    Ok(())
}
