//! Query-string encoding for row selects.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub direction: Direction,
}

/// `select=*` with at most one equality filter and one ordering.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Select {
    pub filter: Option<(String, String)>,
    pub order: Option<Order>,
}

impl Select {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.filter = Some((column.to_string(), value.to_string()));
        self
    }

    pub fn order(mut self, column: &str, direction: Direction) -> Self {
        self.order = Some(Order {
            column: column.to_string(),
            direction,
        });
        self
    }

    /// Newest rows first, the order every list in the app uses.
    pub fn newest_first(self) -> Self {
        self.order("created_at", Direction::Desc)
    }

    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut out = vec![("select".to_string(), "*".to_string())];
        if let Some((col, val)) = &self.filter {
            out.push((col.clone(), format!("eq.{}", val)));
        }
        if let Some(o) = &self.order {
            out.push((
                "order".to_string(),
                format!("{}.{}", o.column, o.direction.as_str()),
            ));
        }
        out
    }
}

/// Query params matching one row by id.
pub(super) fn id_params(id: &str) -> [(String, String); 1] {
    [("id".to_string(), format!("eq.{}", id))]
}

#[cfg(test)]
#[path = "../tests/remote/query_tests.rs"]
mod tests;
