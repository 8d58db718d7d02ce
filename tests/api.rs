use std::collections::HashSet;

use catalog::{Method, Request, Response, Router, Store, app};
use serde_json::{Value, json};

const KEY: &str = "test-key";

fn seeded_app() -> (Router<Store>, Store) {
    let store = Store::seeded();
    (app(store.clone(), KEY), store)
}

fn body(res: &Response) -> Value {
    serde_json::from_slice(res.body()).expect("json body")
}

fn authed(method: Method, target: &str) -> Request {
    Request::new(method, target).header("x-api-key", KEY)
}

fn with_json(req: Request, value: &Value) -> Request {
    req.header("content-type", "application/json").body(value.to_string())
}

#[tokio::test]
async fn index_lists_endpoints() {
    let (router, _) = seeded_app();
    let res = router.handle(Request::new(Method::Get, "/")).await;
    assert_eq!(res.status_code(), 200);
    let map = body(&res);
    assert!(map["endpoints"].get("GET /stats").is_some());
}

#[tokio::test]
async fn create_then_fetch_round_trips_with_lowercased_category() {
    let (router, _) = seeded_app();
    let payload = json!({ "name": "Test", "description": "d", "price": 10, "category": "Cat", "inStock": true });
    let res = router.handle(with_json(authed(Method::Post, "/products"), &payload)).await;
    assert_eq!(res.status_code(), 201);
    let created = body(&res);
    assert_eq!(created["message"], "Product created successfully");
    let id = created["product"]["id"].as_str().unwrap().to_owned();
    assert_eq!(res.header("location"), Some(format!("/products/{id}").as_str()));

    let fetched = router.handle(Request::new(Method::Get, &format!("/products/{id}"))).await;
    assert_eq!(fetched.status_code(), 200);
    assert_eq!(body(&fetched), json!({
        "id": id,
        "name": "Test",
        "description": "d",
        "price": 10.0,
        "category": "cat",
        "inStock": true,
    }));
}

#[tokio::test]
async fn created_ids_are_unique() {
    let (router, store) = seeded_app();
    let payload = json!({ "name": "n", "description": "d", "price": 1.5, "category": "c" });
    for _ in 0..20 {
        let res = router.handle(with_json(authed(Method::Post, "/products"), &payload)).await;
        assert_eq!(res.status_code(), 201);
        assert_eq!(body(&res)["product"]["inStock"], true);
    }
    let ids: HashSet<_> = store.snapshot().into_iter().map(|p| p.id).collect();
    assert_eq!(ids.len(), 23);
}

#[tokio::test]
async fn create_without_key_is_401_and_leaves_store_alone() {
    let (router, _) = seeded_app();
    let payload = json!({ "name": "n", "description": "d", "price": 1, "category": "c" });
    let res = router.handle(with_json(Request::new(Method::Post, "/products"), &payload)).await;
    assert_eq!(res.status_code(), 401);
    assert!(body(&res)["error"].as_str().unwrap().contains("x-api-key"));

    let listed = router.handle(Request::new(Method::Get, "/products")).await;
    assert_eq!(body(&listed)["pagination"]["totalProducts"], 3);
}

#[tokio::test]
async fn auth_runs_before_validation() {
    let (router, _) = seeded_app();
    let res = router.handle(with_json(Request::new(Method::Post, "/products"), &json!({}))).await;
    assert_eq!(res.status_code(), 401);
}

#[tokio::test]
async fn invalid_create_reports_every_violation() {
    let (router, store) = seeded_app();
    let payload = json!({ "name": " ", "price": 0, "inStock": "no" });
    let res = router.handle(with_json(authed(Method::Post, "/products"), &payload)).await;
    assert_eq!(res.status_code(), 400);
    let err = body(&res);
    assert_eq!(err["error"], "Validation failed");
    assert_eq!(err["details"].as_array().unwrap().len(), 5);
    assert_eq!(store.snapshot().len(), 3);
}

#[tokio::test]
async fn malformed_json_is_400() {
    let (router, _) = seeded_app();
    let req = authed(Method::Post, "/products")
        .header("content-type", "application/json")
        .body("{\"name\": \"x\",");
    let res = router.handle(req).await;
    assert_eq!(res.status_code(), 400);
    assert_eq!(body(&res), json!({ "error": "Invalid JSON payload" }));
}

#[tokio::test]
async fn non_json_body_on_a_read_route_is_ignored() {
    let (router, _) = seeded_app();
    let req = Request::new(Method::Get, "/").header("content-type", "text/plain").body("hello");
    assert_eq!(router.handle(req).await.status_code(), 200);

    let stats = Request::new(Method::Get, "/stats").header("content-type", "text/plain").body("{oops");
    assert_eq!(router.handle(stats).await.status_code(), 200);
}

#[tokio::test]
async fn non_json_body_on_a_write_fails_validation() {
    let (router, store) = seeded_app();
    let req = authed(Method::Post, "/products").header("content-type", "text/plain").body("hello");
    let res = router.handle(req).await;
    assert_eq!(res.status_code(), 400);
    assert_eq!(body(&res)["error"], "Validation failed");
    assert_eq!(store.snapshot().len(), 3);
}

#[tokio::test]
async fn update_rewrites_all_fields_and_keeps_id() {
    let (router, _) = seeded_app();
    let payload = json!({
        "name": "Ultrabook",
        "description": "Thin and light",
        "price": 999.99,
        "category": "Computers",
        "inStock": false,
    });
    let res = router.handle(with_json(authed(Method::Put, "/products/1"), &payload)).await;
    assert_eq!(res.status_code(), 200);
    let updated = body(&res);
    assert_eq!(updated["message"], "Product updated successfully");
    assert_eq!(updated["product"]["id"], "1");
    assert_eq!(updated["product"]["category"], "computers");
    assert_eq!(updated["product"]["inStock"], false);
}

#[tokio::test]
async fn update_requires_in_stock() {
    let (router, _) = seeded_app();
    let payload = json!({ "name": "n", "description": "d", "price": 5, "category": "c" });
    let res = router.handle(with_json(authed(Method::Put, "/products/1"), &payload)).await;
    assert_eq!(res.status_code(), 400);
    assert_eq!(body(&res)["details"], json!(["inStock is required and must be a boolean"]));
}

#[tokio::test]
async fn update_unknown_id_is_404() {
    let (router, _) = seeded_app();
    let payload = json!({ "name": "n", "description": "d", "price": 5, "category": "c", "inStock": true });
    let res = router.handle(with_json(authed(Method::Put, "/products/999"), &payload)).await;
    assert_eq!(res.status_code(), 404);
    assert_eq!(body(&res), json!({ "error": "Product not found" }));
}

#[tokio::test]
async fn delete_then_fetch_is_404() {
    let (router, _) = seeded_app();
    let res = router.handle(authed(Method::Delete, "/products/1")).await;
    assert_eq!(res.status_code(), 200);
    let deleted = body(&res);
    assert_eq!(deleted["message"], "Product deleted successfully");
    assert_eq!(deleted["product"]["name"], "Laptop");

    let fetched = router.handle(Request::new(Method::Get, "/products/1")).await;
    assert_eq!(fetched.status_code(), 404);
    assert_eq!(body(&fetched)["error"], "Product not found");

    let again = router.handle(authed(Method::Delete, "/products/1")).await;
    assert_eq!(again.status_code(), 404);
}

#[tokio::test]
async fn delete_without_key_is_401() {
    let (router, store) = seeded_app();
    let res = router.handle(Request::new(Method::Delete, "/products/2")).await;
    assert_eq!(res.status_code(), 401);
    assert!(store.get("2").is_some());
}

#[tokio::test]
async fn list_filters_then_paginates() {
    let (router, _) = seeded_app();
    let res = router
        .handle(Request::new(Method::Get, "/products?category=ELECTRONICS&inStock=true&page=2&limit=1"))
        .await;
    assert_eq!(res.status_code(), 200);
    let page = body(&res);
    assert_eq!(page["products"][0]["id"], "2");
    assert_eq!(page["pagination"], json!({
        "currentPage": 2,
        "totalPages": 2,
        "totalProducts": 2,
        "productsPerPage": 1,
        "hasNextPage": false,
        "hasPrevPage": true,
    }));
}

#[tokio::test]
async fn non_true_stock_flag_means_out_of_stock() {
    let (router, _) = seeded_app();
    let res = router.handle(Request::new(Method::Get, "/products?inStock=yes")).await;
    let page = body(&res);
    assert_eq!(page["pagination"]["totalProducts"], 1);
    assert_eq!(page["products"][0]["name"], "Coffee Maker");
}

#[tokio::test]
async fn non_numeric_pagination_falls_back_to_defaults() {
    let (router, _) = seeded_app();
    let res = router.handle(Request::new(Method::Get, "/products?page=abc&limit=")).await;
    assert_eq!(res.status_code(), 200);
    let page = body(&res);
    assert_eq!(page["pagination"]["currentPage"], 1);
    assert_eq!(page["pagination"]["productsPerPage"], 10);
    assert_eq!(page["products"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn non_positive_pagination_is_400() {
    let (router, _) = seeded_app();
    for target in ["/products?page=0", "/products?limit=-1"] {
        let res = router.handle(Request::new(Method::Get, target)).await;
        assert_eq!(res.status_code(), 400, "{target}");
        assert_eq!(body(&res)["error"], "Page and limit must be positive integers");
    }
}

#[tokio::test]
async fn oversized_limit_saturates_instead_of_defaulting() {
    let (router, _) = seeded_app();
    let res = router.handle(Request::new(Method::Get, "/products?limit=99999999999999999999")).await;
    assert_eq!(res.status_code(), 200);
    let page = body(&res);
    assert_eq!(page["pagination"]["productsPerPage"].as_u64(), Some(usize::MAX as u64));
    assert_eq!(page["pagination"]["totalPages"], 1);
    assert_eq!(page["products"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn decimal_page_is_truncated() {
    let (router, _) = seeded_app();
    let res = router.handle(Request::new(Method::Get, "/products?page=2.5&limit=1")).await;
    assert_eq!(res.status_code(), 200);
    let page = body(&res);
    assert_eq!(page["pagination"]["currentPage"], 2);
    assert_eq!(page["products"][0]["id"], "2");

    let below_one = router.handle(Request::new(Method::Get, "/products?limit=0.5")).await;
    assert_eq!(below_one.status_code(), 400);
}

#[tokio::test]
async fn search_is_not_captured_as_an_id() {
    let (router, _) = seeded_app();
    let res = router.handle(Request::new(Method::Get, "/products/search?q=laptop")).await;
    assert_eq!(res.status_code(), 200);
    let found = body(&res);
    assert_eq!(found["searchTerm"], "laptop");
    assert_eq!(found["count"], 1);
    assert_eq!(found["results"][0]["name"], "Laptop");
}

#[tokio::test]
async fn search_without_term_is_400() {
    let (router, _) = seeded_app();
    let res = router.handle(Request::new(Method::Get, "/products/search")).await;
    assert_eq!(res.status_code(), 400);
    assert_eq!(body(&res)["error"], "Search query parameter \"q\" is required");
}

#[tokio::test]
async fn whitespace_search_term_is_matched_literally() {
    let (router, _) = seeded_app();
    let res = router.handle(Request::new(Method::Get, "/products/search?q=%20")).await;
    assert_eq!(res.status_code(), 200);
    let found = body(&res);
    assert_eq!(found["searchTerm"], " ");
    assert_eq!(found["count"], 3);

    let empty = router.handle(Request::new(Method::Get, "/products/search?q=")).await;
    assert_eq!(empty.status_code(), 400);
}

#[tokio::test]
async fn stats_reflect_the_store() {
    let (router, _) = seeded_app();
    let res = router.handle(Request::new(Method::Get, "/stats")).await;
    assert_eq!(res.status_code(), 200);
    let stats = body(&res);
    assert_eq!(stats["totalProducts"], 3);
    assert_eq!(stats["categories"], json!({ "electronics": 2, "appliances": 1 }));
    assert_eq!(stats["inStock"], 2);
    assert_eq!(stats["outOfStock"], 1);
    assert_eq!(stats["totalValue"], 2050.0);
    assert_eq!(stats["priceRange"], json!({ "min": 50.0, "max": 1200.0 }));
}

#[tokio::test]
async fn stats_on_an_empty_store() {
    let router = app(Store::new(), KEY);
    let stats = body(&router.handle(Request::new(Method::Get, "/stats")).await);
    assert_eq!(stats["totalProducts"], 0);
    assert_eq!(stats["averagePrice"], 0.0);
    assert_eq!(stats["priceRange"], json!({ "min": null, "max": null }));
}

#[tokio::test]
async fn unknown_route_is_404_with_message() {
    let (router, _) = seeded_app();
    let res = router.handle(Request::new(Method::Patch, "/products/1")).await;
    assert_eq!(res.status_code(), 404);
    assert_eq!(body(&res), json!({ "error": "Route not found", "message": "Cannot PATCH /products/1" }));
}

#[tokio::test]
async fn trailing_slash_does_not_match_a_route() {
    let (router, _) = seeded_app();
    let res = router.handle(Request::new(Method::Get, "/products/")).await;
    assert_eq!(res.status_code(), 404);
    assert_eq!(body(&res)["message"], "Cannot GET /products/");
}
