//! Development row store speaking the subset of the PostgREST dialect the
//! snipdeck client uses.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use snipdeck::remote::ApiErrorBody;

#[path = "snipdeck_store/types.rs"]
mod types;
use self::types::*;
#[path = "snipdeck_store/schema.rs"]
mod schema;
use self::schema::*;
#[path = "snipdeck_store/clock.rs"]
mod clock;
use self::clock::*;
#[path = "snipdeck_store/http_error.rs"]
mod http_error;
use self::http_error::*;
#[path = "snipdeck_store/query.rs"]
mod query;
use self::query::*;
#[path = "snipdeck_store/persistence.rs"]
mod persistence;
use self::persistence::*;
#[path = "snipdeck_store/access.rs"]
mod access;
use self::access::*;
#[path = "snipdeck_store/handlers.rs"]
mod handlers;
use self::handlers::*;
#[path = "snipdeck_store/routes.rs"]
mod routes;
use self::routes::*;
#[path = "snipdeck_store/runtime.rs"]
mod runtime;

#[tokio::main]
async fn main() {
    if let Err(err) = runtime::run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
