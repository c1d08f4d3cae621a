//! End-to-end tests simulating a dashboard client
//!
//! These tests drive the REST exposure over the built-in collections,
//! covering list queries, mutations and refetching after a mutation.

use axum::http::StatusCode;
use axum_test::TestServer;
use deskview::prelude::*;
use serde_json::{Value, json};

// =============================================================================
// Test Server
// =============================================================================

fn create_test_server() -> TestServer {
    let app = ServerBuilder::new()
        .with_config(DashboardConfig::default_config())
        .with_seed(contacts::NAME, contacts::seed())
        .with_seed(products::NAME, products::seed())
        .with_seed(groups::NAME, groups::seed())
        .build()
        .expect("Failed to build app");

    TestServer::try_new(app).expect("Failed to create test server")
}

fn names(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item["name"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

// =============================================================================
// Health & Introspection
// =============================================================================

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_endpoint() {
        let server = create_test_server();

        let response = server.get("/health").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "deskview");
    }

    #[tokio::test]
    async fn test_healthz_endpoint() {
        let server = create_test_server();

        let response = server.get("/healthz").await;
        response.assert_status_ok();
    }

    #[tokio::test]
    async fn test_collections_endpoint() {
        let server = create_test_server();

        let response = server.get("/collections").await;
        response.assert_status_ok();

        let body: Value = response.json();
        let collections = body["collections"].as_array().unwrap();
        assert_eq!(collections.len(), 3);
        assert_eq!(collections[0]["name"], "contacts");
        assert_eq!(collections[1]["name"], "products");
        assert_eq!(collections[2]["name"], "groups");
        assert_eq!(collections[1]["category_field"], "category");
    }
}

// =============================================================================
// List Queries
// =============================================================================

mod list_tests {
    use super::*;

    #[tokio::test]
    async fn test_default_listing() {
        let server = create_test_server();

        let response = server.get("/products").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(
            names(&body),
            vec![
                "Desk Lamp",
                "Laptop Stand",
                "Leather Phone Case",
                "USB-C Charger",
                "Wireless Headphones",
            ]
        );
        assert_eq!(body["pagination"]["page"], 1);
        assert_eq!(body["pagination"]["limit"], 10);
        assert_eq!(body["pagination"]["total"], 5);
        assert_eq!(body["pagination"]["total_pages"], 1);
        assert_eq!(body["pagination"]["has_next"], false);
    }

    #[tokio::test]
    async fn test_sorted_second_page() {
        let server = create_test_server();

        let response = server.get("/products?sort=price&limit=2&page=2").await;
        response.assert_status_ok();

        let body: Value = response.json();
        // USB-C Charger and Laptop Stand tie on price and keep input order
        assert_eq!(names(&body), vec!["Laptop Stand", "Wireless Headphones"]);
        assert_eq!(body["pagination"]["total_pages"], 3);
        assert_eq!(body["pagination"]["has_prev"], true);
        assert_eq!(body["pagination"]["has_next"], true);
    }

    #[tokio::test]
    async fn test_descending_order_parameter() {
        let server = create_test_server();

        let response = server.get("/products?sort=price&order=desc&limit=1").await;
        let body: Value = response.json();
        assert_eq!(names(&body), vec!["Leather Phone Case"]);
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_clamped() {
        let server = create_test_server();

        let response = server.get("/products?sort=price&limit=2&page=99").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["pagination"]["page"], 3);
        assert_eq!(names(&body), vec!["Leather Phone Case"]);
    }

    #[tokio::test]
    async fn test_search_and_range() {
        let server = create_test_server();

        let response = server.get("/products?q=phone&min_price=100").await;
        let body: Value = response.json();
        assert_eq!(names(&body), vec!["Leather Phone Case"]);
        assert_eq!(body["pagination"]["total"], 1);
    }

    #[tokio::test]
    async fn test_category_filters() {
        let server = create_test_server();

        let bare: Value = server.get("/products?category=Accessories").await.json();
        assert_eq!(names(&bare), vec!["Laptop Stand", "Leather Phone Case"]);

        let qualified: Value = server.get("/products?category.is_featured=true").await.json();
        assert_eq!(names(&qualified), vec!["Desk Lamp", "Wireless Headphones"]);
    }

    #[tokio::test]
    async fn test_no_match_is_an_empty_page() {
        let server = create_test_server();

        let response = server.get("/products?min_price=1000").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert!(names(&body).is_empty());
        assert_eq!(body["pagination"]["total"], 0);
        assert_eq!(body["pagination"]["total_pages"], 0);
        assert_eq!(body["pagination"]["page"], 1);
    }

    #[tokio::test]
    async fn test_garbage_parameters_are_ignored() {
        let server = create_test_server();

        let response = server
            .get("/products?sort=colour&min_price=cheap&page=abc&limit=-5")
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["pagination"]["total"], 5);
        assert_eq!(body["pagination"]["limit"], 10);
    }

    #[tokio::test]
    async fn test_unknown_collection() {
        let server = create_test_server();

        let response = server.get("/orders").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

        let body: Value = response.json();
        assert_eq!(body["code"], "UNKNOWN_COLLECTION");
    }
}

// =============================================================================
// Mutations
// =============================================================================

mod mutation_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_then_refetch() {
        let server = create_test_server();

        let response = server
            .post("/products")
            .json(&json!({
                "name": "Monitor Arm",
                "price": 59.0,
                "category": "Accessories"
            }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);

        let created: Value = response.json();
        assert!(created["id"].as_str().is_some());
        assert!(created["created_at"].as_str().is_some());

        let body: Value = server.get("/products?category=Accessories").await.json();
        assert_eq!(
            names(&body),
            vec!["Laptop Stand", "Leather Phone Case", "Monitor Arm"]
        );
    }

    #[tokio::test]
    async fn test_create_invalid_record() {
        let server = create_test_server();

        let response = server
            .post("/contacts")
            .json(&json!({ "name": "No Phone", "website_url": "not a url" }))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body["code"], "VALIDATION_ERROR");
        let fields: Vec<&str> = body["details"]["fields"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|f| f["field"].as_str())
            .collect();
        assert!(fields.contains(&"phone_number"));
        assert!(fields.contains(&"website_url"));
    }

    #[tokio::test]
    async fn test_create_malformed_body() {
        let server = create_test_server();

        let response = server.post("/products").text("not json").await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_create_duplicate_id() {
        let server = create_test_server();

        let response = server
            .post("/products")
            .json(&json!({ "id": "1", "name": "Copy", "price": 1.0 }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CONFLICT);

        let body: Value = response.json();
        assert_eq!(body["code"], "RECORD_ALREADY_EXISTS");
    }

    #[tokio::test]
    async fn test_get_record() {
        let server = create_test_server();

        let response = server.get("/contacts/2").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["name"], "Jane Smith");

        let response = server.get("/contacts/42").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

        let body: Value = response.json();
        assert_eq!(body["code"], "RECORD_NOT_FOUND");
        assert_eq!(body["details"]["id"], "42");
    }

    #[tokio::test]
    async fn test_update_then_refetch() {
        let server = create_test_server();

        let response = server
            .put("/products/4")
            .json(&json!({ "price": 200.0 }))
            .await;
        response.assert_status_ok();

        let updated: Value = response.json();
        assert_eq!(updated["name"], "Desk Lamp");
        assert_eq!(updated["price"], 200.0);

        let body: Value = server.get("/products?sort=price:desc&limit=1").await.json();
        assert_eq!(names(&body), vec!["Desk Lamp"]);
    }

    #[tokio::test]
    async fn test_update_cannot_change_id() {
        let server = create_test_server();

        let response = server
            .put("/products/4")
            .json(&json!({ "id": "9" }))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body["code"], "RECORD_ID_CHANGED");
    }

    #[tokio::test]
    async fn test_delete_then_refetch() {
        let server = create_test_server();

        let response = server.delete("/contacts/1").await;
        assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

        let response = server.get("/contacts/1").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

        let body: Value = server.get("/contacts").await.json();
        assert_eq!(body["pagination"]["total"], 3);

        let response = server.delete("/contacts/1").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_toggle_then_refetch() {
        let server = create_test_server();

        let response = server.put("/contacts/2/toggle/is_favorite").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["is_favorite"], true);

        let favorites: Value = server.get("/contacts?category.is_favorite=true").await.json();
        assert_eq!(
            names(&favorites),
            vec!["Jane Smith", "John Doe", "Maria Garcia"]
        );
    }

    #[tokio::test]
    async fn test_toggle_unknown_field() {
        let server = create_test_server();

        let response = server.put("/contacts/2/toggle/is_vip").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

        let body: Value = response.json();
        assert_eq!(body["code"], "UNKNOWN_FIELD");
    }
}

// =============================================================================
// Facets
// =============================================================================

mod facet_tests {
    use super::*;

    #[tokio::test]
    async fn test_category_facets() {
        let server = create_test_server();

        let response = server.get("/products/facets/category").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["field"], "category");
        assert_eq!(
            body["facets"],
            json!([
                { "value": "Electronics", "count": 2 },
                { "value": "Accessories", "count": 2 },
                { "value": "Home", "count": 1 }
            ])
        );
    }

    #[tokio::test]
    async fn test_facets_follow_range_filters() {
        let server = create_test_server();

        let body: Value = server
            .get("/products/facets/category?max_price=50&category=Home")
            .await
            .json();
        assert_eq!(
            body["facets"],
            json!([
                { "value": "Electronics", "count": 1 },
                { "value": "Home", "count": 1 },
                { "value": "Accessories", "count": 1 }
            ])
        );
    }

    #[tokio::test]
    async fn test_facets_reflect_mutations() {
        let server = create_test_server();

        server.delete("/products/4").await;

        let body: Value = server.get("/products/facets/category").await.json();
        let values: Vec<&str> = body["facets"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|f| f["value"].as_str())
            .collect();
        assert_eq!(values, vec!["Electronics", "Accessories"]);
    }

    #[tokio::test]
    async fn test_facets_need_a_categorical_field() {
        let server = create_test_server();

        let response = server.get("/products/facets/price").await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

        let response = server.get("/products/facets/colour").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }
}

// =============================================================================
// Groups
// =============================================================================

mod group_tests {
    use super::*;

    #[tokio::test]
    async fn test_group_members_listing() {
        let server = create_test_server();

        let body: Value = server.get("/contacts?category.group_id=1").await.json();
        assert_eq!(names(&body), vec!["John Doe", "Maria Garcia"]);

        let body: Value = server.get("/groups?search=key").await.json();
        assert_eq!(names(&body), vec!["Key Accounts"]);
    }

    #[tokio::test]
    async fn test_create_group_assign_then_refetch() {
        let server = create_test_server();

        let response = server
            .post("/groups")
            .json(&json!({ "name": "Event Leads" }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
        let group: Value = response.json();
        let group_id = group["id"].as_str().unwrap().to_string();

        for contact in ["2", "3"] {
            let response = server
                .put(&format!("/contacts/{}", contact))
                .json(&json!({ "group_id": group_id }))
                .await;
            response.assert_status_ok();
        }

        let body: Value = server
            .get(&format!("/contacts?category.group_id={}", group_id))
            .await
            .json();
        assert_eq!(names(&body), vec!["Arun Mehta", "Jane Smith"]);

        let body: Value = server.get("/contacts/facets/group_id").await.json();
        assert_eq!(
            body["facets"],
            json!([
                { "value": "1", "count": 2 },
                { "value": group_id, "count": 2 }
            ])
        );

        let body: Value = server.get("/groups?sort=name").await.json();
        assert_eq!(
            names(&body),
            vec!["Event Leads", "Key Accounts", "Paid Search Leads"]
        );
    }

    #[tokio::test]
    async fn test_group_name_is_required() {
        let server = create_test_server();

        let response = server.post("/groups").json(&json!({ "name": "  " })).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

        let body: Value = server.get("/groups").await.json();
        assert_eq!(body["pagination"]["total"], 2);
    }
}
