//! `catalog` binary: load configuration, install logging, seed the store,
//! serve until SIGTERM / Ctrl-C.
//!
//! ```text
//! PORT=8080 API_KEY=s3cret RUST_LOG=info cargo run
//!
//! curl localhost:8080/products?category=electronics&page=1&limit=5
//! curl localhost:8080/products/search?q=laptop
//! curl -X POST localhost:8080/products -H 'x-api-key: s3cret' \
//!      -H 'content-type: application/json' \
//!      -d '{"name":"Desk","description":"Oak","price":250,"category":"Furniture"}'
//! curl localhost:8080/stats
//! ```

use catalog::{Config, Error, Server, Store, app};
use tracing::info;
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::load()?;
    init_tracing(config.json_logs());

    let addr = config.socket_addr()?;
    let store = Store::seeded();
    info!(products = store.snapshot().len(), timeout = ?config.request_timeout(), "store seeded");

    let router = app(store, &config.api_key).timeout(config.request_timeout());
    Server::bind(addr).serve(router).await
}

/// `RUST_LOG` filter (default `info`) over a JSON or human-readable formatter.
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt = tracing_subscriber::fmt::layer().with_target(true);

    if json {
        Registry::default().with(filter).with(fmt.json()).init();
    } else {
        Registry::default().with(filter).with(fmt).init();
    }
}
