use super::*;

/// Accept the key from `apikey` or `Authorization: Bearer`.
pub(super) async fn require_api_key(
    State(state): State<Arc<AppState>>,
    req: axum::extract::Request,
    next: Next,
) -> Response {
    let headers = req.headers();
    let from_apikey = headers.get("apikey").and_then(|v| v.to_str().ok());
    let from_bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    let ok = from_apikey
        .or(from_bearer)
        .is_some_and(|k| k == state.api_key);
    if !ok {
        return unauthorized();
    }
    next.run(req).await
}
