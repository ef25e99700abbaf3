//! Roster Server
//!
//! A REST server exposing the employees collection, backed by SQLite.
//!
//! # Configuration
//!
//! Environment variables:
//! - `ROSTER_PORT`: Port to listen on (default: 3000)
//! - `ROSTER_DATABASE_PATH`: SQLite database file (default: ~/.local/share/roster-server/roster.db)
//! - `ROSTER_ALLOWED_ORIGIN`: Browser origin allowed by CORS (default: http://localhost:5173)
//!
//! # Endpoints
//!
//! - `GET /health`: Health check endpoint
//! - `GET /api/employees`: List employees
//! - `POST /api/employees`: Create an employee
//! - `PUT /api/employees/{id}`: Update an employee
//! - `DELETE /api/employees/{id}`: Delete an employee

use axum::http::{header, HeaderValue, Method};
use roster::server::{init_db, router, AppState, EmployeeRepository};
use std::net::SocketAddr;
use std::path::PathBuf;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Server configuration
#[derive(Debug, Clone)]
struct Config {
    /// Port to listen on
    port: u16,
    /// SQLite database file
    database_path: PathBuf,
    /// Origin allowed to call the API from a browser
    allowed_origin: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Self {
        let port = std::env::var("ROSTER_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let database_path = std::env::var("ROSTER_DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::data_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("roster-server")
                    .join("roster.db")
            });

        let allowed_origin = std::env::var("ROSTER_ALLOWED_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:5173".to_string());

        Self {
            port,
            database_path,
            allowed_origin,
        }
    }

    fn cors(&self) -> CorsLayer {
        let layer = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::ACCEPT]);

        match HeaderValue::from_str(&self.allowed_origin) {
            Ok(origin) => layer.allow_origin(origin),
            Err(e) => {
                tracing::warn!(
                    "Ignoring invalid ROSTER_ALLOWED_ORIGIN '{}': {}",
                    self.allowed_origin,
                    e
                );
                layer
            }
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roster_server=info,roster=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();
    tracing::info!("Database: {}", config.database_path.display());

    let pool = init_db(&config.database_path).await?;
    let state = AppState::new(EmployeeRepository::new(pool));

    let app = router(state).layer(config.cors());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
