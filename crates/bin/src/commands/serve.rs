//! Serve command - runs the Roster HTTP server.

use tokio::signal::unix::{SignalKind, signal};

use roster::api::{AppState, router};

use crate::backend::{create_store, persist_store};
use crate::cli::ServeArgs;

/// Run the Roster server
pub async fn run(args: &ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = create_store(&args.backend_config).await?;
    let backend = store.kind();

    let app = router(AppState::new(store.clone()));

    // Register signal handlers before binding so a failure surfaces as an error
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(%local_addr, backend, "Roster server started");
    println!("Roster server listening on http://{local_addr} ({backend} backend)");
    println!();
    println!("Available endpoints:");
    println!("  GET  /api/users       - List users");
    println!("  GET  /api/users/{{id}}  - Read one user with permissions");
    println!("  POST /api/users       - Insert a user document");
    println!("  POST /api/authenticate - Verify email and password");
    println!("  GET  /health          - Health check");
    println!();
    println!("Press Ctrl+C to shutdown");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::select! {
                _ = sigterm.recv() => tracing::info!("Received SIGTERM, initiating graceful shutdown..."),
                _ = sigint.recv() => tracing::info!("Received SIGINT, initiating graceful shutdown..."),
            }
        })
        .await?;

    match persist_store(&store, &args.backend_config).await {
        Ok(()) => tracing::debug!("Store state flushed"),
        Err(e) => {
            tracing::error!("Failed to save database: {e:?}");
            eprintln!("Failed to save database: {e}");
        }
    }

    println!("Server shut down");
    Ok(())
}
