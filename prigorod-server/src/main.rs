use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use prigorod_server::tutu::{TutuClient, TutuConfig};
use prigorod_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Create the upstream client
    let tutu = TutuClient::new(TutuConfig::new()).expect("Failed to create tutu.ru client");

    // Build app state and router
    let state = AppState::new(tutu);
    let app = create_router(state);

    // Bind and serve
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .expect("Invalid HOST/PORT");

    println!("Suburban schedule proxy listening on http://{addr}");
    println!();
    println!("API Endpoints:");
    println!("  GET /health    - Health check");
    println!("  GET /schedule  - Departures (st1/st2 or st1_num/st2_num, optional date)");
    println!("  GET /suggest   - Station name suggestions (name)");
    println!("  GET /train     - Train details (np)");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
