//! Single binary web server: round-robin tournaments over a JSON REST API.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! Set DATA_DIR to keep tournaments on disk across restarts.

use actix_web::{web::Data, App, HttpServer};
use round_robin_web::api::{configure, AppState};
use round_robin_web::{ServerConfig, TournamentStore};
use std::time::Duration;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();

    let store = match &config.data_dir {
        Some(dir) => match TournamentStore::new(dir) {
            Ok(store) => Some(store),
            Err(e) => {
                log::error!("Cannot open data dir {}: {}", dir.display(), e);
                return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
            }
        },
        None => None,
    };

    let state = Data::new(AppState::new(store));
    match state.restore() {
        Ok(0) => {}
        Ok(n) => log::info!("Loaded {} saved tournament(s)", n),
        Err(e) => log::warn!("Could not load saved tournaments: {}", e),
    }

    // Background task: every 30 minutes, drop tournaments idle past the timeout
    let state_cleanup = state.clone();
    let timeout = config.inactivity_timeout;
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let removed = state_cleanup.cleanup_inactive(timeout);
            if removed > 0 {
                log::info!(
                    "Cleaned up {} inactive tournament(s) (no activity for {}h)",
                    removed,
                    timeout.as_secs() / 3600
                );
            }
        }
    });

    log::info!("Starting server at http://{}:{}", config.host, config.port);
    HttpServer::new(move || App::new().app_data(state.clone()).configure(configure))
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}
