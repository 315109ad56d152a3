use super::*;

pub(super) type Row = Map<String, Value>;

/// Rows in insertion order, keyed by table name.
pub(super) type Tables = BTreeMap<String, Vec<Row>>;

#[derive(Clone)]
pub(super) struct AppState {
    pub(super) api_key: String,
    pub(super) data_dir: PathBuf,
    pub(super) db: Arc<RwLock<Database>>,
}

#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
pub(super) struct Database {
    pub(super) version: u32,

    pub(super) tables: Tables,

    #[serde(skip)]
    pub(super) clock: Clock,
}

impl Database {
    pub(super) fn empty() -> Self {
        let mut tables = BTreeMap::new();
        for t in SCHEMAS {
            tables.insert(t.name.to_string(), Vec::new());
        }
        Self {
            version: 1,
            tables,
            clock: Clock::default(),
        }
    }

    pub(super) fn rows(&self, table: &str) -> &[Row] {
        self.tables.get(table).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Copy of the tables for a mutation; see [`commit_tables`].
    pub(super) fn stage(&self) -> Tables {
        self.tables.clone()
    }
}

pub(super) fn rows_mut<'a>(tables: &'a mut Tables, table: &str) -> &'a mut Vec<Row> {
    tables.entry(table.to_string()).or_default()
}
