//! Error responses in the shape PostgREST clients expect.

use super::*;

fn api_error(status: StatusCode, body: ApiErrorBody) -> Response {
    (status, Json(body)).into_response()
}

pub(super) fn unauthorized() -> Response {
    api_error(
        StatusCode::UNAUTHORIZED,
        ApiErrorBody::new("PGRST301", "Invalid API key"),
    )
}

pub(super) fn unknown_table(table: &str) -> Response {
    api_error(
        StatusCode::NOT_FOUND,
        ApiErrorBody::new(
            "PGRST205",
            format!("Could not find the table 'public.{}' in the schema cache", table),
        ),
    )
}

pub(super) fn unknown_column(table: &str, col: &str) -> Response {
    api_error(
        StatusCode::BAD_REQUEST,
        ApiErrorBody::new("42703", format!("column {}.{} does not exist", table, col)),
    )
}

pub(super) fn bad_filter(msg: impl Into<String>) -> Response {
    api_error(
        StatusCode::BAD_REQUEST,
        ApiErrorBody::new("PGRST100", msg),
    )
}

pub(super) fn bad_body(msg: impl Into<String>) -> Response {
    api_error(
        StatusCode::BAD_REQUEST,
        ApiErrorBody::new("PGRST102", msg),
    )
}

pub(super) fn not_null(table: &str, col: &str) -> Response {
    api_error(
        StatusCode::BAD_REQUEST,
        ApiErrorBody::new(
            "23502",
            format!(
                "null value in column \"{}\" of relation \"{}\" violates not-null constraint",
                col, table
            ),
        ),
    )
}

pub(super) fn invalid_value(col: &str) -> Response {
    api_error(
        StatusCode::BAD_REQUEST,
        ApiErrorBody::new("22P02", format!("column \"{}\" expects text", col)),
    )
}

pub(super) fn read_only_column(col: &str) -> Response {
    api_error(
        StatusCode::BAD_REQUEST,
        ApiErrorBody::new("428C9", format!("column \"{}\" can only be set by the store", col)),
    )
}

pub(super) fn immutable_column(col: &str) -> Response {
    api_error(
        StatusCode::BAD_REQUEST,
        ApiErrorBody::new("428C9", format!("column \"{}\" cannot be updated", col)),
    )
}

pub(super) fn missing_filter(action: &str) -> Response {
    api_error(
        StatusCode::BAD_REQUEST,
        ApiErrorBody::new("21000", format!("{} requires a WHERE clause", action)),
    )
}

pub(super) fn fk_violation(table: &str, fk: &ForeignKey, value: &str) -> Response {
    api_error(
        StatusCode::CONFLICT,
        ApiErrorBody::new(
            "23503",
            format!(
                "insert or update on table \"{}\" violates foreign key constraint \"{}_{}_fkey\"",
                table, table, fk.column
            ),
        )
        .with_details(format!(
            "Key ({})=({}) is not present in table \"{}\".",
            fk.column, value, fk.references
        )),
    )
}

pub(super) fn internal_error(err: anyhow::Error) -> Response {
    tracing::error!(error = %format!("{:#}", err), "store failure");
    api_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        ApiErrorBody::new("XX000", err.to_string()),
    )
}
