use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use storefront_backend_api::{build_router, AppState};
use storefront_backend_runtime::{telemetry, BackendServices};
use storefront_commerce::repositories::CartRepository;
use storefront_commerce::{CatalogService, Product};
use storefront_config::{load as load_config, AppConfig};
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser)]
#[command(name = "storefront-backend")]
#[command(about = "Storefront backend (serves HTTP by default)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Upsert products from a JSON array file into the catalog
    SeedCatalog {
        /// Path to a JSON file holding an array of products
        path: PathBuf,
    },
    /// Print the catalog and every cart line
    DumpData,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    telemetry::init_tracing().context("failed to initialise tracing")?;
    let config = load_config().context("failed to load configuration")?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server(&config).await,
        Commands::SeedCatalog { path } => seed_catalog(&config, &path).await,
        Commands::DumpData => dump_data(&config).await,
    }
}

async fn run_server(config: &AppConfig) -> anyhow::Result<()> {
    info!("starting storefront backend");

    let services = BackendServices::initialise(config)
        .await
        .context("failed to initialise backend services")?;

    let state = AppState::new(services.db_pool, services.authenticator, &config.cart);
    let app = build_router(state);

    let address = format!("{}:{}", config.http.address, config.http.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(storefront_backend_runtime::shutdown_signal())
        .await
        .context("http server error")?;

    info!("backend shut down");
    Ok(())
}

async fn seed_catalog(config: &AppConfig, path: &Path) -> anyhow::Result<()> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read catalog file {}", path.display()))?;
    let products = parse_catalog(&raw)
        .with_context(|| format!("invalid catalog file {}", path.display()))?;

    let services = BackendServices::initialise(config)
        .await
        .context("failed to initialise backend services")?;

    let written = CatalogService::new(services.db_pool)
        .import(&products)
        .await
        .context("failed to import catalog")?;

    info!(products = written, "catalog seeded");
    println!("Imported {written} products from {}", path.display());
    Ok(())
}

fn parse_catalog(raw: &str) -> anyhow::Result<Vec<Product>> {
    let products: Vec<Product> =
        serde_json::from_str(raw).context("catalog must be a JSON array of products")?;
    Ok(products)
}

async fn dump_data(config: &AppConfig) -> anyhow::Result<()> {
    info!("dumping catalog and carts from database");

    let services = BackendServices::initialise(config)
        .await
        .context("failed to initialise backend services")?;

    let products = CatalogService::new(services.db_pool.clone())
        .list_products()
        .await
        .context("failed to fetch products")?;

    println!("=== PRODUCTS ===");
    if products.is_empty() {
        println!("No products found in database");
    } else {
        println!("Found {} products:", products.len());
        println!(
            "{:<24} {:<30} {:<16} {:>10} {:<6}",
            "ID", "Name", "Category", "Cost", "Rating"
        );
        println!("{}", "-".repeat(90));

        for product in products {
            println!(
                "{:<24} {:<30} {:<16} {:>10} {:<6}",
                product.id,
                truncate(&product.name, 30),
                truncate(&product.category, 16),
                product.cost,
                product.rating
            );
        }
    }

    println!("\n=== CART LINES ===");
    let entries = CartRepository::new(services.db_pool)
        .list_all()
        .await
        .context("failed to fetch cart lines")?;

    if entries.is_empty() {
        println!("No cart lines found in database");
    } else {
        println!("Found {} cart lines:", entries.len());
        println!("{:<40} {:<24} {:>8}", "Owner", "Product ID", "Quantity");
        println!("{}", "-".repeat(74));

        for entry in entries {
            println!(
                "{:<40} {:<24} {:>8}",
                entry.owner_email, entry.product_id, entry.quantity
            );
        }
    }

    Ok(())
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() > width {
        let kept: String = value.chars().take(width.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        value.to_string()
    }
}
