use axum::{
    extract::{Request, State},
    http::{
        Method,
        header::{ACCESS_CONTROL_REQUEST_METHOD, ORIGIN},
    },
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::application::http::server::{api_entities::api_error::ApiError, app_state::AppState};

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Rejects a plain `OPTIONS` on the analysis route before the CORS layer can
/// answer it as a preflight. Real preflights carry both `Origin` and
/// `Access-Control-Request-Method` and pass through.
pub async fn reject_plain_options(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let is_preflight = req.headers().contains_key(ORIGIN)
        && req.headers().contains_key(ACCESS_CONTROL_REQUEST_METHOD);
    let analyze_path = format!("{}/api/analyze", state.args.server.root_path);

    if req.method() == Method::OPTIONS && !is_preflight && req.uri().path() == analyze_path {
        return ApiError::MethodNotAllowed.into_response();
    }

    next.run(req).await
}
