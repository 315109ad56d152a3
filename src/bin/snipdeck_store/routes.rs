//! Table routes, all behind the api key check.

use axum::middleware;
use axum::routing::get;

use super::*;

pub(super) fn rest_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/rest/v1/:table",
            get(select_rows)
                .post(insert_rows)
                .patch(update_rows)
                .delete(delete_rows),
        )
        .layer(middleware::from_fn_with_state(state, require_api_key))
}
