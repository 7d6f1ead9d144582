//! Coffey Admin - service entry point

use coffey_admin::admin::gate::LoginGate;
use coffey_admin::admin::models::AdminState;
use coffey_admin::admin::session::SessionManager;
use coffey_admin::admin::create_admin_router;
use coffey_admin::backend::rest::RestBackend;
use coffey_admin::config::EnvironmentLoader;
use coffey_admin::core::netgate::NetworkGate;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = EnvironmentLoader::new().load()?;

    // One HTTP client shared by the backend calls and the address lookup
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent(format!(
            "{}/{}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        ))
        .build()?;

    let backend = Arc::new(RestBackend::new(http.clone(), config.backend.clone()));
    let sessions = Arc::new(SessionManager::new(
        config.admin.jwt_secret.clone(),
        config.admin.jwt_expiration,
    ));
    let netgate = NetworkGate::new(http, config.gate.ip_echo_url.clone());
    let gate = LoginGate::new(config.gate.to_gate_config(), netgate, backend);

    let state = AdminState {
        sessions,
        gate: Arc::new(Mutex::new(gate)),
        login_path: config.admin.login_path.clone(),
    };

    let app = create_admin_router(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("admin gate listening on {addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
