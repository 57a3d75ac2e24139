//! Catalog page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use retail_core::Product;
use tracing::instrument;

use crate::backend::CATALOG_PAGE_SIZE;
use crate::error::Result;
use crate::filters;
use crate::middleware::OptionalSession;
use crate::state::AppState;

/// Product card display data for templates.
#[derive(Debug, Clone)]
pub struct ProductCard {
    pub id: String,
    pub name: String,
    /// Formatted price, e.g. `$19.99`.
    pub price: String,
    /// Primary image URL; cards without one show a placeholder.
    pub image: Option<String>,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: product.price.to_string(),
            image: product.primary_image().map(str::to_owned),
        }
    }
}

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog.html")]
pub struct CatalogTemplate {
    pub products: Vec<ProductCard>,
    pub signed_in: bool,
}

/// Display the catalog: one page of products, fetched fresh on every request.
///
/// # Errors
///
/// Fails with a 502 if the catalog API cannot be reached or answers with a
/// non-success status.
#[instrument(skip_all)]
pub async fn catalog(
    State(state): State<AppState>,
    session: OptionalSession,
) -> Result<CatalogTemplate> {
    let page = state.backend().list_products(CATALOG_PAGE_SIZE).await?;

    Ok(CatalogTemplate {
        products: page.items.iter().map(ProductCard::from).collect(),
        signed_in: session.is_signed_in(),
    })
}
