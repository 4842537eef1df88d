// src/bin/data.rs

use products_api::infra::config;
use products_api::storage::PostgresProductStore;
use tracing::error;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin data -- [--clear | --seed]\n\
         \n\
         --clear  drop and recreate the products table\n\
         --seed   insert the sample product catalogue\n\
         \n\
         Requires env vars:\n\
           DATABASE_URL\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    config::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let clear = args.iter().any(|a| a == "--clear");
    let seed = args.iter().any(|a| a == "--seed");
    if args.iter().any(|a| a == "-h" || a == "--help") || !(clear || seed) {
        usage_and_exit();
    }

    if let Err(e) = run(clear, seed).await {
        error!(error = %e, "Data command failed");
        std::process::exit(1);
    }
    std::process::exit(0);
}

async fn run(clear: bool, seed: bool) -> anyhow::Result<()> {
    let database_url = config::database_url()?;
    let store = PostgresProductStore::connect_lazy(&database_url)?;

    if clear {
        products_api::clear_db(&store).await?;
    }
    if seed {
        products_api::seed_db(&store).await?;
    }
    Ok(())
}
