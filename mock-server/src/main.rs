use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mock_server=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let brands_port = std::env::var("BRANDS_PORT").unwrap_or_else(|_| "3001".to_string());

    let cars_addr = format!("127.0.0.1:{port}");
    let brands_addr = format!("127.0.0.1:{brands_port}");
    let cars = TcpListener::bind(&cars_addr).await?;
    let brands = TcpListener::bind(&brands_addr).await?;
    tracing::info!(cars = %cars_addr, brands = %brands_addr, "listening");

    tokio::try_join!(mock_server::run_cars(cars), mock_server::run_brands(brands))?;
    Ok(())
}
