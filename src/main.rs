use dotenvy::dotenv;
use log::{error, info};
use std::sync::Arc;

use taskserver::config::AppConfig;
use taskserver::main_module::{apply_migrations, run_server};
use taskserver::shared::state::AppState;
use taskserver::shared::utils::create_conn;
use taskserver::tasks::PgTaskStore;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env()
        .map_err(|e| std::io::Error::other(format!("Failed to load config: {}", e)))?;

    let pool = match create_conn() {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to create database pool: {}", e);
            return Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                format!("Database pool creation failed: {}", e),
            ));
        }
    };

    {
        let mut conn = pool.get().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                format!("Database connection failed: {}", e),
            )
        })?;
        apply_migrations(&mut conn).map_err(std::io::Error::other)?;
    }

    let app_state = Arc::new(AppState {
        tasks: Arc::new(PgTaskStore::new(pool)),
    });

    info!(
        "Starting HTTP server on {}:{}",
        config.server.host, config.server.port
    );
    run_server(app_state, &config.server.host, config.server.port).await
}
