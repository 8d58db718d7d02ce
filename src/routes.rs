//! Route table and handlers.
//!
//! | Method | Path | Stages | Handler |
//! |---|---|---|---|
//! | GET | `/` | | [`index`] |
//! | GET | `/products` | | [`list`] |
//! | GET | `/products/search` | | [`search`] |
//! | GET | `/products/{id}` | | [`get`] |
//! | POST | `/products` | api-key, validate | [`create`] |
//! | PUT | `/products/{id}` | api-key, validate | [`update`] |
//! | DELETE | `/products/{id}` | api-key | [`remove`] |
//! | GET | `/stats` | | [`stats`] |

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Value, json};
use tracing::info;

use crate::error::ApiError;
use crate::method::Method;
use crate::middleware::{API_KEY_HEADER, ApiKey, JsonBody, RequestLog, Stage, Validate};
use crate::product::{Product, ProductInput};
use crate::query::{self, Page, PageRequest, SearchResults};
use crate::request::Request;
use crate::response::{Json, Response};
use crate::router::Router;
use crate::stats::{Stats, compute_stats};
use crate::status::Status;
use crate::store::Store;

/// The catalogue application: every route, every stage, bound to `store`.
pub fn app(store: Store, api_key: &str) -> Router<Store> {
    let auth = ApiKey::new(api_key).boxed();
    Router::with_state(store)
        .layer(RequestLog)
        .layer(JsonBody)
        .on(Method::Get, "/", index)
        .on(Method::Get, "/products", list)
        .on(Method::Get, "/products/search", search)
        .on(Method::Get, "/products/{id}", get)
        .on_with(
            Method::Post,
            "/products",
            vec![Arc::clone(&auth), Validate::create().boxed()],
            create,
        )
        .on_with(
            Method::Put,
            "/products/{id}",
            vec![Arc::clone(&auth), Validate::replace().boxed()],
            update,
        )
        .on_with(Method::Delete, "/products/{id}", vec![auth], remove)
        .on(Method::Get, "/stats", stats)
}

/// Body of every successful write.
#[derive(Debug, Serialize)]
pub struct Saved {
    pub message: &'static str,
    pub product: Product,
}

// GET /
pub async fn index(_req: Request, _store: Store) -> Result<Json<Value>, ApiError> {
    Ok(Json(json!({
        "message": "Product Catalog API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "GET /products": "List products (query: category, inStock, page, limit)",
            "GET /products/search": "Search name and description (query: q)",
            "GET /products/{id}": "Fetch one product",
            "POST /products": "Create a product (authenticated)",
            "PUT /products/{id}": "Replace a product (authenticated)",
            "DELETE /products/{id}": "Delete a product (authenticated)",
            "GET /stats": "Catalogue statistics",
        },
        "authentication": format!("Send the API key in the {API_KEY_HEADER} header for POST, PUT and DELETE"),
    })))
}

// GET /products?category=&inStock=&page=&limit=
pub async fn list(req: Request, store: Store) -> Result<Json<Page>, ApiError> {
    let window = PageRequest::parse(req.query("page"), req.query("limit"))?;
    let items = query::filter_by_category(store.snapshot(), req.query("category"));
    let items = query::filter_by_stock(items, req.query("inStock"));
    Ok(Json(query::paginate(items, window)))
}

// GET /products/search?q=
pub async fn search(req: Request, store: Store) -> Result<Json<SearchResults>, ApiError> {
    query::search(store.snapshot(), req.query("q")).map(Json)
}

// GET /products/{id}
pub async fn get(req: Request, store: Store) -> Result<Json<Product>, ApiError> {
    let id = path_id(&req)?;
    store.get(&id).map(Json).ok_or_else(|| ApiError::not_found("Product", id))
}

// POST /products
pub async fn create(mut req: Request, store: Store) -> Result<Response, ApiError> {
    let input = validated(&mut req)?;
    let product = store.insert(input);
    info!(id = %product.id, category = %product.category, "product created");

    let location = format!("/products/{}", product.id);
    let body = Saved { message: "Product created successfully", product };
    let bytes = serde_json::to_vec(&body).map_err(|e| ApiError::internal(e.to_string()))?;
    Ok(Response::builder()
        .status(Status::Created)
        .header("location", &location)
        .json(bytes))
}

// PUT /products/{id}
pub async fn update(mut req: Request, store: Store) -> Result<Json<Saved>, ApiError> {
    let id = path_id(&req)?;
    let input = validated(&mut req)?;
    let product = store.replace(&id, input).ok_or_else(|| ApiError::not_found("Product", id))?;
    info!(id = %product.id, "product updated");
    Ok(Json(Saved { message: "Product updated successfully", product }))
}

// DELETE /products/{id}
pub async fn remove(req: Request, store: Store) -> Result<Json<Saved>, ApiError> {
    let id = path_id(&req)?;
    let product = store.remove(&id).ok_or_else(|| ApiError::not_found("Product", id))?;
    info!(id = %product.id, "product deleted");
    Ok(Json(Saved { message: "Product deleted successfully", product }))
}

// GET /stats
pub async fn stats(_req: Request, store: Store) -> Result<Json<Stats>, ApiError> {
    Ok(Json(compute_stats(&store.snapshot())))
}

fn path_id(req: &Request) -> Result<String, ApiError> {
    req.param("id")
        .map(str::to_owned)
        .ok_or_else(|| ApiError::internal(format!("route for {} has no id segment", req.path())))
}

fn validated(req: &mut Request) -> Result<ProductInput, ApiError> {
    req.take::<ProductInput>()
        .ok_or_else(|| ApiError::internal("write route is missing its validation stage"))
}
