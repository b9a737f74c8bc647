//! Integration tests for SmartCart.
//!
//! The harness serves everything in-process: a fixture catalog endpoint
//! and the storefront itself each get an ephemeral port, so the tests need
//! no external services and can run in parallel.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p smartcart-integration-tests
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::{Router, response::IntoResponse, routing::get};
use tempfile::TempDir;

use smartcart_core::pricing::DEFAULT_SHIPPING_FEE;
use smartcart_storefront::config::StorefrontConfig;
use smartcart_storefront::state::AppState;

/// A fixture catalog covering several categories, one record without a
/// category to exercise the "Uncategorized" default.
pub const FIXTURE_CATALOG: &str = r#"[
    {"id": 1, "name": "Smart Watch", "price": 49.99, "image": "images/watch.webp", "category": "Electronics", "description": "A wrist-worn smartwatch.", "rating": 4.2},
    {"id": 2, "name": "Laptop", "price": 500, "image": "images/laptop.webp", "category": "Electronics", "description": "A portable computer.", "rating": 4.7},
    {"id": 3, "name": "Running Shoes", "price": 89.5, "image": "images/shoes.webp", "category": "Footwear", "description": "Lightweight running shoes.", "rating": 4.0},
    {"id": 4, "name": "Watch Strap", "price": 12.25, "image": "images/strap.webp", "category": "Accessories", "description": "Replacement strap for a watch.", "rating": 3.8},
    {"id": 5, "name": "Mystery Box", "price": 19.99, "image": "images/box.webp", "description": "Contents unknown.", "rating": 3.1}
]"#;

/// A running storefront with its fixture catalog server.
pub struct TestContext {
    pub client: reqwest::Client,
    pub base_url: String,
    pub catalog_url: String,
    storage_path: PathBuf,
    // Dropped with the context, deleting the storage file.
    _storage_dir: TempDir,
}

impl TestContext {
    /// Start a catalog server with [`FIXTURE_CATALOG`] and a storefront
    /// configured against it, both on ephemeral ports.
    pub async fn new() -> Self {
        Self::with_catalog_body(FIXTURE_CATALOG.to_owned()).await
    }

    /// Start a storefront whose catalog URL points at a closed port, so
    /// the fetch fails and the fallback catalog is used.
    pub async fn with_unreachable_catalog() -> Self {
        Self::build("http://127.0.0.1:1/products.json".to_owned()).await
    }

    /// Start a catalog server with the given body and a storefront
    /// configured against it.
    pub async fn with_catalog_body(body: String) -> Self {
        let catalog_url = spawn_catalog_server(body).await;
        Self::build(catalog_url).await
    }

    async fn build(catalog_url: String) -> Self {
        let storage_dir = TempDir::new().expect("create storage tempdir");
        let storage_path = storage_dir.path().join("storage.json");

        let base_url = spawn_storefront(&catalog_url, &storage_path).await;

        Self {
            client: reqwest::Client::new(),
            base_url,
            catalog_url,
            storage_path,
            _storage_dir: storage_dir,
        }
    }

    /// Start a fresh storefront process-equivalent on the same storage
    /// file, simulating a restart. Returns the new base URL.
    pub async fn restart(&self) -> String {
        spawn_storefront(&self.catalog_url, &self.storage_path).await
    }

    /// GET a path and parse the JSON body, asserting a 200 status.
    pub async fn get_json(&self, path: &str) -> serde_json::Value {
        let resp = self
            .client
            .get(format!("{}{path}", self.base_url))
            .send()
            .await
            .expect("request failed");
        assert!(resp.status().is_success(), "GET {path}: {}", resp.status());
        resp.json().await.expect("invalid JSON body")
    }

    /// POST a form to a path and parse the JSON body, asserting a 200
    /// status.
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> serde_json::Value {
        let resp = self
            .client
            .post(format!("{}{path}", self.base_url))
            .form(form)
            .send()
            .await
            .expect("request failed");
        assert!(resp.status().is_success(), "POST {path}: {}", resp.status());
        resp.json().await.expect("invalid JSON body")
    }
}

/// Serve `body` as `/products.json` on an ephemeral port; returns the URL.
async fn spawn_catalog_server(body: String) -> String {
    let app = Router::new().route(
        "/products.json",
        get(move || {
            let body = body.clone();
            async move { ([("content-type", "application/json")], body).into_response() }
        }),
    );

    let addr = serve(app).await;
    format!("http://{addr}/products.json")
}

/// Serve the storefront on an ephemeral port; returns its base URL.
async fn spawn_storefront(catalog_url: &str, storage_path: &std::path::Path) -> String {
    let config = StorefrontConfig {
        host: "127.0.0.1".parse().expect("loopback address"),
        port: 0,
        catalog_url: catalog_url.to_owned(),
        storage_path: storage_path.to_path_buf(),
        shipping_fee: DEFAULT_SHIPPING_FEE,
    };

    let state = AppState::new(config).expect("initialize application state");
    let addr = serve(smartcart_storefront::app(state)).await;
    format!("http://{addr}")
}

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server error");
    });

    addr
}
