//! tests/api_tests.rs - Full request/response cycle against a live server

#[cfg(test)]
mod tests {
    use crate::{
        api::create_router,
        cache::CacheStore,
        config::Config,
        limiter::LookupLimiter,
        service::LookupService,
        state::AppState,
        upstream::UpstreamClient,
    };
    use serde_json::Value;
    use sqlx::sqlite::SqlitePoolOptions;
    use std::net::SocketAddr;
    use std::sync::Arc;

    fn app_config(endpoint: &str, address_limit: u32, transaction_limit: u32) -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            server_host: "127.0.0.1".to_string(),
            server_port: 0,
            upstream_endpoint: endpoint.to_string(),
            upstream_timeout_secs: 5,
            address_rate_limit: address_limit,
            transaction_rate_limit: transaction_limit,
            rate_limit_window_secs: 60,
            debug: false,
        }
    }

    /// Boot the whole service on an ephemeral port and return its base URL.
    async fn spawn_app(config: Config) -> String {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");
        crate::db::connection::init(&pool).await.expect("Failed to initialize schema");

        let store = CacheStore::new(pool);
        let limiter = Arc::new(LookupLimiter::new(&config));
        let upstream = Arc::new(UpstreamClient::new(&config).expect("Failed to build upstream client"));

        let state = Arc::new(AppState {
            address_service: LookupService::new(store.clone(), limiter.clone(), upstream.clone()),
            transaction_service: LookupService::new(store, limiter, upstream),
            config,
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(
                listener,
                create_router(state).into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .unwrap();
        });

        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_address_endpoint_returns_summary() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/rawaddr/1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa")
            .with_header("content-type", "application/json")
            .with_body(r#"{"final_balance": 100000, "n_tx": 5}"#)
            .create_async()
            .await;

        let base = spawn_app(app_config(&server.url(), 10, 5)).await;

        let response = reqwest::get(format!("{base}/address/1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa"))
            .await
            .unwrap();
        assert_eq!(response.status(), 200);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["address"], "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa");
        assert_eq!(body["balance"], 100_000);
        assert_eq!(body["transaction_count"], 5);
    }

    #[tokio::test]
    async fn test_transaction_endpoint_returns_detail() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/rawtx/abc123")
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "hash": "abc123",
                    "fee": 100,
                    "tx_index": 1,
                    "time": 1630000000,
                    "inputs": [{"prev_out": {"addr": "1First", "value": 50000}}],
                    "out": [{"addr": "1Third", "value": 49900}]
                }"#,
            )
            .create_async()
            .await;

        let base = spawn_app(app_config(&server.url(), 10, 5)).await;

        let response = reqwest::get(format!("{base}/transaction/abc123")).await.unwrap();
        assert_eq!(response.status(), 200);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["hash"], "abc123");
        assert_eq!(body["fee"], 100);
        assert_eq!(body["transaction_index"], 1);
        assert_eq!(body["block_time"], 1_630_000_000);
        assert_eq!(body["inputs"][0]["address"], "1First");
        assert_eq!(body["outputs"][0]["value"], 49_900);
    }

    #[tokio::test]
    async fn test_not_found_error_body_carries_request_metadata() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/rawtx/deadbeef")
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create_async()
            .await;

        let base = spawn_app(app_config(&server.url(), 10, 5)).await;

        let response = reqwest::get(format!("{base}/transaction/deadbeef")).await.unwrap();
        assert_eq!(response.status(), 404);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "NotFound");
        assert_eq!(body["status_code"], 404);
        assert_eq!(body["method"], "GET");
        assert_eq!(body["path"], "/transaction/deadbeef");
        assert_eq!(body["remote_addr"], "127.0.0.1");
        assert!(body["message"].as_str().unwrap().contains("deadbeef"));
        // Debug detail must be absent unless the operator opted in
        assert!(body.get("detail").is_none());
    }

    #[tokio::test]
    async fn test_exhausted_quota_maps_to_429() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/rawaddr/1First")
            .with_header("content-type", "application/json")
            .with_body(r#"{"final_balance": 1, "n_tx": 1}"#)
            .create_async()
            .await;

        let base = spawn_app(app_config(&server.url(), 1, 5)).await;

        let first = reqwest::get(format!("{base}/address/1First")).await.unwrap();
        assert_eq!(first.status(), 200);

        let second = reqwest::get(format!("{base}/address/1Second")).await.unwrap();
        assert_eq!(second.status(), 429);

        let body: Value = second.json().await.unwrap();
        assert_eq!(body["error"], "TooManyRequests");
        assert_eq!(body["status_code"], 429);
    }

    #[tokio::test]
    async fn test_upstream_error_is_a_structured_500() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server.mock("GET", "/rawaddr/1Broken").with_status(502).create_async().await;

        let base = spawn_app(app_config(&server.url(), 10, 5)).await;

        let response = reqwest::get(format!("{base}/address/1Broken")).await.unwrap();
        assert_eq!(response.status(), 500);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "InternalServerError");
        assert_eq!(body["message"], "Internal server error");
        assert_eq!(body["status_code"], 500);
    }
}
