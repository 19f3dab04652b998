use std::sync::Arc;

use axum::{
    routing::{delete, get},
    Router,
};

use crate::features::vehicles::handlers;
use crate::features::vehicles::services::VehicleService;

/// Create routes for the vehicles feature
///
/// The `/api/veiculos` path namespace is kept for compatibility with
/// existing clients.
pub fn routes(service: Arc<VehicleService>) -> Router {
    Router::new()
        .route(
            "/api/veiculos",
            get(handlers::list_vehicles).post(handlers::register_vehicle),
        )
        .route("/api/veiculos/{plate}", delete(handlers::remove_vehicle))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use sqlx::sqlite::SqlitePool;

    use crate::features::pricing::PricingService;
    use crate::shared::test_helpers::{insert_vehicle, seed_price_rule, test_pool};

    fn server(pool: SqlitePool) -> TestServer {
        let pricing = Arc::new(PricingService::new(pool.clone()));
        let service = Arc::new(VehicleService::new(pool, pricing));
        TestServer::new(routes(service)).expect("failed to start test server")
    }

    async fn server_with_default_pricing() -> (TestServer, SqlitePool) {
        let pool = test_pool().await;
        seed_price_rule(
            &pool,
            "2020-01-01 00:00:00",
            "2030-12-31 00:00:00",
            "2.00",
            "1.00",
        )
        .await;
        (server(pool.clone()), pool)
    }

    #[tokio::test]
    async fn test_register_normalizes_plate() {
        let (server, _pool) = server_with_default_pricing().await;

        let response = server
            .post("/api/veiculos")
            .json(&json!({ "plate": "  abc-1234  " }))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["plate"], "ABC-1234");

        let list: Value = server.get("/api/veiculos").await.json();
        assert_eq!(list["meta"]["total"], 1);
        assert_eq!(list["data"][0]["plate"], "ABC-1234");
    }

    #[tokio::test]
    async fn test_register_blank_plate_is_rejected() {
        let (server, _pool) = server_with_default_pricing().await;

        let response = server.post("/api/veiculos").json(&json!({ "plate": "   " })).await;
        response.assert_status_bad_request();

        let body: Value = response.json();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_register_duplicate_plate_conflicts() {
        let (server, _pool) = server_with_default_pricing().await;

        server
            .post("/api/veiculos")
            .json(&json!({ "plate": "ABC-1234" }))
            .await
            .assert_status_ok();

        // Same plate modulo normalization
        let response = server
            .post("/api/veiculos")
            .json(&json!({ "plate": " abc-1234 " }))
            .await;
        response.assert_status(axum::http::StatusCode::CONFLICT);

        let list: Value = server.get("/api/veiculos").await.json();
        assert_eq!(list["meta"]["total"], 1);
    }

    #[tokio::test]
    async fn test_remove_unknown_plate_is_not_found() {
        let (server, pool) = server_with_default_pricing().await;
        insert_vehicle(&pool, "AAA-0001", "2025-06-10 08:00:00").await;

        server.delete("/api/veiculos/ZZZ-9999").await.assert_status_not_found();

        // Nothing was deleted
        let list: Value = server.get("/api/veiculos").await.json();
        assert_eq!(list["meta"]["total"], 1);
    }

    #[tokio::test]
    async fn test_remove_duration_mode_receipt() {
        let (server, pool) = server_with_default_pricing().await;
        insert_vehicle(&pool, "AAA-0001", "2025-06-10 08:00:00").await;

        let response = server
            .delete("/api/veiculos/aaa-0001")
            .add_query_param("hours", 1)
            .add_query_param("minutes", 15)
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        let data = &body["data"];
        assert_eq!(data["plate"], "AAA-0001");
        assert_eq!(data["entryTimestamp"], "2025-06-10T08:00:00");
        assert_eq!(data["exitTimestamp"], "2025-06-10T09:15:00");
        assert_eq!(data["elapsedMinutes"], 75);
        assert_eq!(data["amount"], "3.00");

        let list: Value = server.get("/api/veiculos").await.json();
        assert_eq!(list["meta"]["total"], 0);
    }

    #[tokio::test]
    async fn test_remove_zero_duration_charges_half_initial_rate() {
        let (server, pool) = server_with_default_pricing().await;
        insert_vehicle(&pool, "AAA-0001", "2025-06-10 08:00:00").await;

        let response = server.delete("/api/veiculos/AAA-0001").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["data"]["elapsedMinutes"], 0);
        assert_eq!(body["data"]["amount"], "1.00");
    }

    #[tokio::test]
    async fn test_remove_grace_period_boundary() {
        let (server, pool) = server_with_default_pricing().await;
        insert_vehicle(&pool, "AAA-0001", "2025-06-10 08:00:00").await;

        let response = server
            .delete("/api/veiculos/AAA-0001")
            .add_query_param("hours", 1)
            .add_query_param("minutes", 10)
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["data"]["elapsedMinutes"], 70);
        assert_eq!(body["data"]["amount"], "2.00");
    }

    #[tokio::test]
    async fn test_remove_absolute_mode_rolls_to_next_day() {
        let (server, pool) = server_with_default_pricing().await;
        insert_vehicle(&pool, "AAA-0001", "2025-06-10 22:00:00").await;

        let response = server
            .delete("/api/veiculos/AAA-0001")
            .add_query_param("hours", 1)
            .add_query_param("minutes", 30)
            .add_query_param("mode", "absolute")
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        let data = &body["data"];
        assert_eq!(data["exitTimestamp"], "2025-06-11T01:30:00");
        assert_eq!(data["elapsedMinutes"], 210);
        // 2.00 + ceil((150 - 10) / 60) * 1.00
        assert_eq!(data["amount"], "5.00");
    }

    #[tokio::test]
    async fn test_remove_absolute_mode_invalid_time_of_day() {
        let (server, pool) = server_with_default_pricing().await;
        insert_vehicle(&pool, "AAA-0001", "2025-06-10 08:00:00").await;

        let response = server
            .delete("/api/veiculos/AAA-0001")
            .add_query_param("hours", 24)
            .add_query_param("minutes", 0)
            .add_query_param("mode", "absolute")
            .await;
        response.assert_status_bad_request();

        // The session survives a failed checkout
        let list: Value = server.get("/api/veiculos").await.json();
        assert_eq!(list["meta"]["total"], 1);
    }

    #[tokio::test]
    async fn test_remove_uses_pricing_fallback_past_range_end() {
        let pool = test_pool().await;
        // Rule already expired at the entry date; fallback still applies it
        seed_price_rule(
            &pool,
            "2024-01-01 00:00:00",
            "2024-06-30 00:00:00",
            "4.00",
            "2.00",
        )
        .await;
        let server = server(pool.clone());
        insert_vehicle(&pool, "AAA-0001", "2025-06-10 08:00:00").await;

        let response = server
            .delete("/api/veiculos/AAA-0001")
            .add_query_param("minutes", 45)
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["data"]["amount"], "4.00");
    }

    #[tokio::test]
    async fn test_remove_without_any_price_rule_is_server_error() {
        let pool = test_pool().await;
        let server = server(pool.clone());
        insert_vehicle(&pool, "AAA-0001", "2025-06-10 08:00:00").await;

        let response = server.delete("/api/veiculos/AAA-0001").await;
        response.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = response.json();
        assert_eq!(body["success"], false);
    }
}
