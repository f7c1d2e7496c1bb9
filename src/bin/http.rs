#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::net::SocketAddr;

    use allocation_view::{SourceFormat, ViewConfig, http_api, load_allocations};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let addr: SocketAddr = std::env::var("ALLOCATION_VIEW_HTTP_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
        .parse()?;

    let config = ViewConfig::default().with_env_overrides()?;
    let allocations = match std::env::var("ALLOCATION_VIEW_DATA") {
        Ok(path) => load_allocations(&path, SourceFormat::from_path(&path)?)?,
        Err(_) => Vec::new(),
    };

    log::info!("allocation-view HTTP API listening on http://{addr}");
    http_api::serve(addr, http_api::AppState::new(allocations, config)).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
