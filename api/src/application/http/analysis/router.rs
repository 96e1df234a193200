use super::handlers::{
    analyze::{__path_analyze, analyze},
    method_not_allowed::method_not_allowed,
};
use crate::application::http::server::app_state::AppState;
use axum::{Router, routing::post};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(analyze))]
pub struct AnalysisApiDoc;

pub fn analysis_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/api/analyze", state.args.server.root_path),
        post(analyze).fallback(method_not_allowed),
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::{
        HeaderValue, Method, StatusCode,
        header::{ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_REQUEST_METHOD, ORIGIN},
    };
    use axum_test::TestServer;
    use lactose_core::domain::common::{DEFAULT_GEMINI_MODEL, LactoseConfig};
    use mockito::{Matcher, Mock, ServerGuard};
    use serde_json::{Value, json};
    use test_context::{AsyncTestContext, test_context};

    use crate::application::http::server::http_server::{router, state};
    use crate::args::{Args, GeminiArgs, LogArgs, ServerArgs};

    const GENERATE_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

    fn test_args(upstream_url: String, api_key: Option<&str>) -> Args {
        Args {
            server: ServerArgs {
                host: "127.0.0.1".to_string(),
                port: 0,
                root_path: String::new(),
                allowed_origins: vec!["http://localhost:5173".to_string()],
            },
            gemini: GeminiArgs {
                api_key: api_key.map(str::to_string),
                model: DEFAULT_GEMINI_MODEL.to_string(),
                base_url: upstream_url,
            },
            log: LogArgs {
                filter: "info".to_string(),
                json: false,
            },
        }
    }

    fn test_server(upstream_url: String, api_key: Option<&str>) -> TestServer {
        let args = Arc::new(test_args(upstream_url, api_key));
        let app = router(state(args)).expect("router builds");
        TestServer::new(app).expect("test server starts")
    }

    async fn forbid_upstream_calls(upstream: &mut ServerGuard) -> Mock {
        upstream
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await
    }

    /// Gateway with an API key, talking to a local mock of Gemini.
    struct GatewayContext {
        upstream: ServerGuard,
        server: TestServer,
    }

    impl AsyncTestContext for GatewayContext {
        async fn setup() -> Self {
            let upstream = mockito::Server::new_async().await;
            let server = test_server(upstream.url(), Some("test-key"));

            GatewayContext { upstream, server }
        }
    }

    impl GatewayContext {
        async fn reply_with_text(&mut self, text: &str) -> Mock {
            self.upstream
                .mock("POST", GENERATE_PATH)
                .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(
                    json!({
                        "candidates": [{ "content": { "parts": [{ "text": text }] } }]
                    })
                    .to_string(),
                )
                .expect(1)
                .create_async()
                .await
        }
    }

    /// Gateway started without `GEMINI_API_KEY`.
    struct UnconfiguredGatewayContext {
        upstream: ServerGuard,
        server: TestServer,
    }

    impl AsyncTestContext for UnconfiguredGatewayContext {
        async fn setup() -> Self {
            let upstream = mockito::Server::new_async().await;
            let server = test_server(upstream.url(), None);

            UnconfiguredGatewayContext { upstream, server }
        }
    }

    #[test_context(GatewayContext)]
    #[tokio::test]
    async fn test_other_methods_are_rejected(ctx: &mut GatewayContext) {
        let upstream = forbid_upstream_calls(&mut ctx.upstream).await;

        let response = ctx.server.get("/api/analyze").await;
        assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            response.json::<Value>(),
            json!({ "message": "Only POST requests allowed" })
        );

        let response = ctx.server.put("/api/analyze").await;
        assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);

        let response = ctx.server.delete("/api/analyze").await;
        assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);

        upstream.assert_async().await;
    }

    #[test_context(GatewayContext)]
    #[tokio::test]
    async fn test_plain_options_is_rejected(ctx: &mut GatewayContext) {
        let upstream = forbid_upstream_calls(&mut ctx.upstream).await;

        let response = ctx.server.method(Method::OPTIONS, "/api/analyze").await;

        assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            response.json::<Value>(),
            json!({ "message": "Only POST requests allowed" })
        );
        upstream.assert_async().await;
    }

    #[test_context(GatewayContext)]
    #[tokio::test]
    async fn test_cors_preflight_is_answered(ctx: &mut GatewayContext) {
        let upstream = forbid_upstream_calls(&mut ctx.upstream).await;

        let response = ctx
            .server
            .method(Method::OPTIONS, "/api/analyze")
            .add_header(ORIGIN, HeaderValue::from_static("http://localhost:5173"))
            .add_header(
                ACCESS_CONTROL_REQUEST_METHOD,
                HeaderValue::from_static("POST"),
            )
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(
            response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("http://localhost:5173"))
        );
        upstream.assert_async().await;
    }

    #[test_context(UnconfiguredGatewayContext)]
    #[tokio::test]
    async fn test_missing_api_key_fails_before_upstream(ctx: &mut UnconfiguredGatewayContext) {
        let upstream = forbid_upstream_calls(&mut ctx.upstream).await;

        let response = ctx
            .server
            .post("/api/analyze")
            .json(&json!({ "type": "getBaseDishWeight", "data": { "dishName": "Pizza" } }))
            .await;
        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.json::<Value>(),
            json!({ "message": "API key not configured" })
        );

        upstream.assert_async().await;
    }

    #[test_context(UnconfiguredGatewayContext)]
    #[tokio::test]
    async fn test_missing_api_key_wins_over_bad_body(ctx: &mut UnconfiguredGatewayContext) {
        let upstream = forbid_upstream_calls(&mut ctx.upstream).await;

        let response = ctx
            .server
            .post("/api/analyze")
            .json(&json!({ "type": "bogus" }))
            .await;
        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = ctx.server.post("/api/analyze").text("not json").await;
        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.json::<Value>(),
            json!({ "message": "API key not configured" })
        );

        upstream.assert_async().await;
    }

    #[test_context(UnconfiguredGatewayContext)]
    #[tokio::test]
    async fn test_health_needs_no_key(ctx: &mut UnconfiguredGatewayContext) {
        let response = ctx.server.get("/health").await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<Value>(), json!({ "status": "ok" }));
    }

    #[test_context(GatewayContext)]
    #[tokio::test]
    async fn test_unknown_type_is_bad_request(ctx: &mut GatewayContext) {
        let upstream = forbid_upstream_calls(&mut ctx.upstream).await;

        for body in [
            json!({ "type": "bogus", "data": {} }),
            json!({ "type": null, "data": {} }),
            json!({ "type": 5, "data": {} }),
            json!({ "data": {} }),
        ] {
            let response = ctx.server.post("/api/analyze").json(&body).await;

            assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
            assert_eq!(
                response.json::<Value>(),
                json!({ "message": "Invalid analysis type" })
            );
        }

        upstream.assert_async().await;
    }

    #[test_context(GatewayContext)]
    #[tokio::test]
    async fn test_known_type_with_missing_fields_is_bad_request(ctx: &mut GatewayContext) {
        let upstream = forbid_upstream_calls(&mut ctx.upstream).await;

        let response = ctx
            .server
            .post("/api/analyze")
            .json(&json!({ "type": "getIngredientQuantity", "data": { "baseDish": "Lasagna" } }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>(),
            json!({ "message": "Invalid analysis data" })
        );
        upstream.assert_async().await;
    }

    #[test_context(GatewayContext)]
    #[tokio::test]
    async fn test_food_item_lactose_amount(ctx: &mut GatewayContext) {
        let upstream = ctx.reply_with_text("4,5").await;

        let response = ctx
            .server
            .post("/api/analyze")
            .json(&json!({ "type": "analyzeFoodItem", "data": { "name": "Ricotta", "weight": 100 } }))
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<Value>(), json!({ "lactoseAmount": 4.5 }));
        upstream.assert_async().await;
    }

    #[test_context(GatewayContext)]
    #[tokio::test]
    async fn test_food_item_unreadable_reply_is_zero(ctx: &mut GatewayContext) {
        let _upstream = ctx.reply_with_text("abc").await;

        let response = ctx
            .server
            .post("/api/analyze")
            .json(&json!({ "type": "analyzeFoodItem", "data": { "name": "Mela", "weight": "150" } }))
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<Value>(), json!({ "lactoseAmount": 0.0 }));
    }

    #[test_context(GatewayContext)]
    #[tokio::test]
    async fn test_base_dish_fenced_reply(ctx: &mut GatewayContext) {
        let _upstream = ctx
            .reply_with_text("```json\n{\"estimatedLactose\":2,\"hiddenIngredients\":[]}\n```")
            .await;

        let response = ctx
            .server
            .post("/api/analyze")
            .json(&json!({ "type": "analyzeBaseDish", "data": { "name": "Lasagna", "weight": 300 } }))
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(
            response.json::<Value>(),
            json!({ "estimatedLactose": 2.0, "hiddenIngredients": [] })
        );
    }

    #[test_context(GatewayContext)]
    #[tokio::test]
    async fn test_base_dish_partial_reply_is_returned(ctx: &mut GatewayContext) {
        let _upstream = ctx
            .reply_with_text("{\"hiddenIngredients\":[{\"name\":\"Burro\"}]}")
            .await;

        let response = ctx
            .server
            .post("/api/analyze")
            .json(&json!({ "type": "analyzeBaseDish", "data": { "name": "Risotto", "weight": 350 } }))
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(
            response.json::<Value>(),
            json!({ "hiddenIngredients": [{ "name": "Burro" }] })
        );
    }

    #[test_context(GatewayContext)]
    #[tokio::test]
    async fn test_base_dish_unparseable_reply_is_internal_error(ctx: &mut GatewayContext) {
        let _upstream = ctx.reply_with_text("Non lo so").await;

        let response = ctx
            .server
            .post("/api/analyze")
            .json(&json!({ "type": "analyzeBaseDish", "data": { "name": "Lasagna", "weight": 300 } }))
            .await;

        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.json::<Value>(),
            json!({ "message": "Internal server error" })
        );
    }

    #[test_context(GatewayContext)]
    #[tokio::test]
    async fn test_ingredient_quantity(ctx: &mut GatewayContext) {
        let _upstream = ctx.reply_with_text("80").await;

        let response = ctx
            .server
            .post("/api/analyze")
            .json(&json!({
                "type": "getIngredientQuantity",
                "data": { "baseDish": "Carbonara", "ingredientName": "Pecorino" }
            }))
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<Value>(), json!({ "quantity": 80.0 }));
    }

    #[test_context(GatewayContext)]
    #[tokio::test]
    async fn test_base_dish_weight(ctx: &mut GatewayContext) {
        let _upstream = ctx.reply_with_text("325").await;

        let response = ctx
            .server
            .post("/api/analyze")
            .json(&json!({ "type": "getBaseDishWeight", "data": { "dishName": "Pizza" } }))
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<Value>(), json!({ "weight": 325.0 }));
    }

    #[test_context(GatewayContext)]
    #[tokio::test]
    async fn test_base_dish_weight_empty_reply_is_null(ctx: &mut GatewayContext) {
        let _upstream = ctx.reply_with_text("").await;

        let response = ctx
            .server
            .post("/api/analyze")
            .json(&json!({ "type": "getBaseDishWeight", "data": { "dishName": "Pizza" } }))
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<Value>(), json!({ "weight": null }));
    }

    #[test_context(GatewayContext)]
    #[tokio::test]
    async fn test_upstream_failure_status_is_mirrored(ctx: &mut GatewayContext) {
        let upstream = ctx
            .upstream
            .mock("POST", GENERATE_PATH)
            .match_query(Matcher::Any)
            .with_status(429)
            .with_body(r#"{"error":{"code":429,"message":"Resource exhausted"}}"#)
            .expect(1)
            .create_async()
            .await;

        let response = ctx
            .server
            .post("/api/analyze")
            .json(&json!({ "type": "getBaseDishWeight", "data": { "dishName": "Pizza" } }))
            .await;

        assert_eq!(response.status_code(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            response.json::<Value>(),
            json!({ "message": "Error from Gemini API" })
        );
        upstream.assert_async().await;
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_internal_error() {
        let server = test_server("http://127.0.0.1:1".to_string(), Some("SUPERSECRET"));

        let response = server
            .post("/api/analyze")
            .json(&json!({ "type": "getBaseDishWeight", "data": { "dishName": "Pizza" } }))
            .await;

        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.json::<Value>(),
            json!({ "message": "Internal server error" })
        );
    }

    #[test]
    fn test_args_feed_service_config() {
        let config = LactoseConfig::from(test_args("http://upstream".to_string(), Some("k")));

        assert_eq!(config.llm.gemini_api_key.as_deref(), Some("k"));
        assert_eq!(config.llm.gemini_base_url, "http://upstream");
    }
}
