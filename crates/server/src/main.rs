// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod gemini;
mod live;
mod routes;
mod state;

#[cfg(test)]
mod tests;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use axum::Router;
use clap::Parser;
use epica_api::{DisabledNarrativeClient, NarrativeClient};
use epica_persistence::Persistence;
use tracing::{info, warn};

use crate::gemini::{DEFAULT_GEMINI_ENDPOINT, DEFAULT_GEMINI_MODEL, GeminiClient};
use crate::routes::build_router;
use crate::state::AppState;

/// Epica Server - HTTP server for the Epica event ledger
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "EPICA_DATABASE")]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(short, long, env = "EPICA_BIND", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    bind: IpAddr,

    /// Port to bind the server to
    #[arg(short, long, env = "EPICA_PORT", default_value_t = 3000)]
    port: u16,

    /// Person recorded on transactions that name nobody
    #[arg(long, env = "EPICA_STAFF_MEMBER", default_value = "Staff")]
    staff_member: String,

    /// Gemini API key. Analysis is disabled without one.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    gemini_api_key: Option<String>,

    /// Gemini model used for analysis
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    gemini_model: String,

    /// Gemini REST endpoint
    #[arg(long, env = "GEMINI_ENDPOINT", default_value = DEFAULT_GEMINI_ENDPOINT)]
    gemini_endpoint: String,
}

fn build_narrative_client(args: &Args) -> Result<Arc<dyn NarrativeClient>, reqwest::Error> {
    match args.gemini_api_key.as_deref().map(str::trim) {
        Some(key) if !key.is_empty() => {
            info!(model = %args.gemini_model, "Using Gemini for analysis");
            Ok(Arc::new(GeminiClient::new(
                &args.gemini_endpoint,
                &args.gemini_model,
                key,
            )?))
        }
        _ => {
            warn!("No Gemini API key configured, analysis is disabled");
            Ok(Arc::new(DisabledNarrativeClient))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Epica Server");

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let narrative: Arc<dyn NarrativeClient> = build_narrative_client(&args)?;
    let app_state: AppState = AppState::new(persistence, narrative, &args.staff_member);

    let app: Router = build_router(app_state);

    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
