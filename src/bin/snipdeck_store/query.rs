//! `select=`, `order=` and `col=eq.value` handling.

use std::cmp::Ordering;

use super::*;

#[derive(Debug, Default)]
pub(super) struct RowQuery {
    pub(super) columns: Option<Vec<String>>,
    pub(super) filters: Vec<(String, String)>,
    pub(super) order: Option<(String, bool)>,
}

pub(super) fn parse_query(
    schema: &TableSchema,
    params: &[(String, String)],
) -> Result<RowQuery, Response> {
    let mut q = RowQuery::default();
    for (key, value) in params {
        match key.as_str() {
            "select" => {
                if value.trim() != "*" {
                    let cols: Vec<String> = value
                        .split(',')
                        .map(|c| c.trim().to_string())
                        .filter(|c| !c.is_empty())
                        .collect();
                    for c in &cols {
                        if !schema.has_column(c) {
                            return Err(unknown_column(schema.name, c));
                        }
                    }
                    q.columns = Some(cols);
                }
            }
            "order" => {
                let mut parts = value.split('.');
                let col = parts.next().unwrap_or_default();
                if !schema.has_column(col) {
                    return Err(unknown_column(schema.name, col));
                }
                let desc = match parts.next() {
                    None | Some("asc") => false,
                    Some("desc") => true,
                    Some(other) => {
                        return Err(bad_filter(format!("unsupported order direction '{}'", other)));
                    }
                };
                q.order = Some((col.to_string(), desc));
            }
            col => {
                if !schema.has_column(col) {
                    return Err(unknown_column(schema.name, col));
                }
                let Some(v) = value.strip_prefix("eq.") else {
                    return Err(bad_filter(format!(
                        "unsupported filter '{}={}' (only eq. is supported)",
                        col, value
                    )));
                };
                q.filters.push((col.to_string(), v.to_string()));
            }
        }
    }
    Ok(q)
}

fn text<'a>(row: &'a Row, col: &str) -> Option<&'a str> {
    row.get(col).and_then(Value::as_str)
}

impl RowQuery {
    pub(super) fn matches(&self, row: &Row) -> bool {
        self.filters
            .iter()
            .all(|(col, v)| text(row, col) == Some(v.as_str()))
    }

    pub(super) fn sort(&self, rows: &mut [Row]) {
        let Some((col, desc)) = &self.order else {
            return;
        };
        rows.sort_by(|a, b| {
            // Nulls last in either direction.
            let ord = match (text(a, col), text(b, col)) {
                (Some(x), Some(y)) => x.cmp(y),
                (Some(_), None) => return Ordering::Less,
                (None, Some(_)) => return Ordering::Greater,
                (None, None) => Ordering::Equal,
            };
            if *desc { ord.reverse() } else { ord }
        });
    }

    pub(super) fn project(&self, rows: Vec<Row>) -> Vec<Row> {
        let Some(cols) = &self.columns else {
            return rows;
        };
        rows.into_iter()
            .map(|r| {
                r.into_iter()
                    .filter(|(k, _)| cols.iter().any(|c| c == k))
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/bin/snipdeck_store/query_tests.rs"]
mod tests;
