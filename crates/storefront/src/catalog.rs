//! Catalog loading.
//!
//! The catalog is a static JSON document fetched once per process over
//! HTTP. Missing categories are normalized at parse time, and any failure
//! (network, status, parse) substitutes a fixed two-item fallback catalog -
//! after initialization the system is never left without products. There
//! are no retries and no cache invalidation; the first result, fallback or
//! not, is the catalog for the life of the process.

use rust_decimal::Decimal;
use tokio::sync::OnceCell;

use smartcart_core::{Product, ProductId};

/// Loads and caches the product catalog.
pub struct CatalogLoader {
    client: reqwest::Client,
    url: String,
    cache: OnceCell<Vec<Product>>,
}

impl CatalogLoader {
    /// Create a loader for the catalog document at `url`.
    #[must_use]
    pub fn new(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
            cache: OnceCell::new(),
        }
    }

    /// The loaded catalog.
    ///
    /// The first call fetches and parses the catalog document; subsequent
    /// calls return the cached result without re-fetching. Failures fall
    /// back to [`fallback_catalog`] and are logged, never propagated.
    pub async fn load(&self) -> &[Product] {
        self.cache
            .get_or_init(|| async {
                match self.fetch().await {
                    Ok(products) => {
                        tracing::info!(count = products.len(), url = %self.url, "Catalog loaded");
                        products
                    }
                    Err(e) => {
                        tracing::error!(url = %self.url, error = %e, "Catalog fetch failed, using fallback data");
                        fallback_catalog()
                    }
                }
            })
            .await
    }

    /// Look up a product by id in the loaded catalog.
    pub async fn find(&self, id: ProductId) -> Option<Product> {
        self.load().await.iter().find(|p| p.id == id).cloned()
    }

    async fn fetch(&self) -> Result<Vec<Product>, reqwest::Error> {
        self.client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Product>>()
            .await
    }
}

/// The fixed catalog substituted when the real one cannot be loaded.
#[must_use]
pub fn fallback_catalog() -> Vec<Product> {
    vec![
        Product {
            id: ProductId::new(1),
            name: "Fallback Laptop".to_owned(),
            price: Decimal::new(500, 0),
            image: "images/placeholder.webp".to_owned(),
            category: "Electronics".to_owned(),
            description: "A simple laptop.".to_owned(),
            rating: 3.5,
        },
        Product {
            id: ProductId::new(2),
            name: "Fallback Watch".to_owned(),
            price: Decimal::new(50, 0),
            image: "images/placeholder.webp".to_owned(),
            category: "Wearables".to_owned(),
            description: "A simple watch.".to_owned(),
            rating: 2.0,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_failure_substitutes_exact_fallback() {
        // Nothing listens on port 1; the fetch fails fast.
        let loader = CatalogLoader::new("http://127.0.0.1:1/products.json".to_owned());

        let products = loader.load().await;
        assert_eq!(products, fallback_catalog().as_slice());
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Fallback Laptop");
        assert_eq!(products[1].name, "Fallback Watch");
    }

    #[tokio::test]
    async fn test_load_is_idempotent() {
        let loader = CatalogLoader::new("http://127.0.0.1:1/products.json".to_owned());

        let first = loader.load().await.to_vec();
        let second = loader.load().await;
        assert_eq!(second, first.as_slice());
    }

    #[tokio::test]
    async fn test_find_unknown_id_is_none() {
        let loader = CatalogLoader::new("http://127.0.0.1:1/products.json".to_owned());
        assert!(loader.find(ProductId::new(999)).await.is_none());
        assert!(loader.find(ProductId::new(1)).await.is_some());
    }
}
