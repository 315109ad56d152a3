use super::*;

pub(super) async fn healthz() -> Json<Value> {
    Json(serde_json::json!({"ok": true}))
}

fn table_schema(table: &str) -> Result<&'static TableSchema, Response> {
    lookup_table(table).ok_or_else(|| unknown_table(table))
}

fn wants_rows(headers: &HeaderMap) -> bool {
    headers
        .get_all("prefer")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .any(|p| p.trim() == "return=representation")
}

/// Rows back when asked for, otherwise an empty body with `empty`.
fn respond(headers: &HeaderMap, with_rows: StatusCode, empty: StatusCode, rows: Vec<Row>) -> Response {
    if wants_rows(headers) {
        (with_rows, Json(rows)).into_response()
    } else {
        empty.into_response()
    }
}

fn check_text(col: &str, v: &Value) -> Result<(), Response> {
    match v {
        Value::String(_) | Value::Null => Ok(()),
        _ => Err(invalid_value(col)),
    }
}

pub(super) async fn select_rows(
    State(state): State<Arc<AppState>>,
    Path(table): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Row>>, Response> {
    let schema = table_schema(&table)?;
    let q = parse_query(schema, &params)?;

    let db = state.db.read().await;
    let mut rows: Vec<Row> = db
        .rows(schema.name)
        .iter()
        .filter(|r| q.matches(r))
        .cloned()
        .collect();
    drop(db);

    q.sort(&mut rows);
    tracing::debug!(table = schema.name, count = rows.len(), "select");
    Ok(Json(q.project(rows)))
}

fn validate_insert(schema: &TableSchema, db: &Database, item: &Row) -> Result<(), Response> {
    for (col, v) in item {
        if !schema.has_column(col) {
            return Err(unknown_column(schema.name, col));
        }
        if MANAGED.contains(&col.as_str()) {
            return Err(read_only_column(col));
        }
        check_text(col, v)?;
    }
    for col in schema.required {
        if !item.get(*col).is_some_and(Value::is_string) {
            return Err(not_null(schema.name, col));
        }
    }
    if let Some(fk) = &schema.foreign_key {
        let value = item.get(fk.column).and_then(Value::as_str).unwrap_or_default();
        let exists = db
            .rows(fk.references)
            .iter()
            .any(|r| r.get("id").and_then(Value::as_str) == Some(value));
        if !exists {
            return Err(fk_violation(schema.name, fk, value));
        }
    }
    Ok(())
}

pub(super) async fn insert_rows(
    State(state): State<Arc<AppState>>,
    Path(table): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Response, Response> {
    let schema = table_schema(&table)?;
    let items: Vec<Row> = match body {
        Value::Object(m) => vec![m],
        Value::Array(items) => items
            .into_iter()
            .map(|v| match v {
                Value::Object(m) => Ok(m),
                _ => Err(bad_body("expected a JSON object per row")),
            })
            .collect::<Result<_, _>>()?,
        _ => return Err(bad_body("expected a JSON object or array of objects")),
    };

    let mut db = state.db.write().await;
    for item in &items {
        validate_insert(schema, &db, item)?;
    }

    let mut inserted = Vec::with_capacity(items.len());
    for item in items {
        let id = new_row_id().map_err(internal_error)?;
        let ts = db.clock.tick();
        let mut row = Row::new();
        for col in schema.columns {
            let v = match *col {
                "id" => Value::String(id.clone()),
                "created_at" | "updated_at" => Value::String(ts.clone()),
                c => item.get(c).cloned().unwrap_or(Value::Null),
            };
            row.insert(col.to_string(), v);
        }
        inserted.push(row);
    }
    let mut staged = db.stage();
    rows_mut(&mut staged, schema.name).extend(inserted.iter().cloned());
    commit_tables(&state, &mut db, staged).map_err(internal_error)?;
    drop(db);

    tracing::info!(table = schema.name, count = inserted.len(), "inserted rows");
    Ok(respond(&headers, StatusCode::CREATED, StatusCode::CREATED, inserted))
}

fn validate_patch(schema: &TableSchema, patch: &Row) -> Result<(), Response> {
    for (col, v) in patch {
        if !schema.has_column(col) {
            return Err(unknown_column(schema.name, col));
        }
        if MANAGED.contains(&col.as_str()) {
            return Err(read_only_column(col));
        }
        if schema.immutable.contains(&col.as_str()) {
            return Err(immutable_column(col));
        }
        check_text(col, v)?;
        if v.is_null() && schema.required.contains(&col.as_str()) {
            return Err(not_null(schema.name, col));
        }
    }
    Ok(())
}

pub(super) async fn update_rows(
    State(state): State<Arc<AppState>>,
    Path(table): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Response, Response> {
    let schema = table_schema(&table)?;
    let q = parse_query(schema, &params)?;
    if q.filters.is_empty() {
        return Err(missing_filter("UPDATE"));
    }
    let Value::Object(patch) = body else {
        return Err(bad_body("expected a JSON object"));
    };
    validate_patch(schema, &patch)?;

    let mut db = state.db.write().await;
    let ts = db.clock.tick();
    let mut staged = db.stage();
    let mut updated = Vec::new();
    for row in rows_mut(&mut staged, schema.name).iter_mut().filter(|r| q.matches(r)) {
        for (col, v) in &patch {
            row.insert(col.clone(), v.clone());
        }
        row.insert("updated_at".to_string(), Value::String(ts.clone()));
        updated.push(row.clone());
    }
    if !updated.is_empty() {
        commit_tables(&state, &mut db, staged).map_err(internal_error)?;
    }
    drop(db);

    tracing::info!(table = schema.name, count = updated.len(), "updated rows");
    Ok(respond(&headers, StatusCode::OK, StatusCode::NO_CONTENT, q.project(updated)))
}

pub(super) async fn delete_rows(
    State(state): State<Arc<AppState>>,
    Path(table): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
    headers: HeaderMap,
) -> Result<Response, Response> {
    let schema = table_schema(&table)?;
    let q = parse_query(schema, &params)?;
    if q.filters.is_empty() {
        return Err(missing_filter("DELETE"));
    }

    let mut db = state.db.write().await;
    let mut staged = db.stage();
    let rows = rows_mut(&mut staged, schema.name);
    let (deleted, kept): (Vec<Row>, Vec<Row>) = rows.drain(..).partition(|r| q.matches(r));
    *rows = kept;

    let ids: Vec<String> = deleted
        .iter()
        .filter_map(|r| r.get("id").and_then(Value::as_str).map(str::to_string))
        .collect();
    let mut cascaded = 0;
    for dep in schema.dependents() {
        let Some(fk) = &dep.foreign_key else {
            continue;
        };
        let rows = rows_mut(&mut staged, dep.name);
        let before = rows.len();
        rows.retain(|r| {
            r.get(fk.column)
                .and_then(Value::as_str)
                .is_none_or(|v| !ids.iter().any(|id| id == v))
        });
        cascaded += before - rows.len();
    }

    if !deleted.is_empty() {
        commit_tables(&state, &mut db, staged).map_err(internal_error)?;
    }
    drop(db);

    tracing::info!(
        table = schema.name,
        count = deleted.len(),
        cascaded,
        "deleted rows"
    );
    Ok(respond(&headers, StatusCode::OK, StatusCode::NO_CONTENT, q.project(deleted)))
}
