use std::path::Path as FsPath;

use super::*;

const DB_FILE: &str = "tables.json";

pub(super) fn db_path(data_dir: &FsPath) -> PathBuf {
    data_dir.join(DB_FILE)
}

pub(super) fn load_db(data_dir: &FsPath) -> Result<Database> {
    let path = db_path(data_dir);
    if !path.exists() {
        return Ok(Database::empty());
    }
    let bytes = std::fs::read(&path).with_context(|| format!("read {}", path.display()))?;
    let mut db: Database =
        serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))?;

    for t in SCHEMAS {
        db.tables.entry(t.name.to_string()).or_default();
    }
    let mut clock = Clock::default();
    for rows in db.tables.values() {
        for row in rows {
            for col in ["created_at", "updated_at"] {
                if let Some(ts) = row.get(col).and_then(Value::as_str) {
                    clock.observe(ts);
                }
            }
        }
    }
    db.clock = clock;
    Ok(db)
}

#[derive(serde::Serialize)]
struct Snapshot<'a> {
    version: u32,
    tables: &'a Tables,
}

/// Write `staged` to disk, then make it the live tables. On error the live
/// tables are left as they were.
pub(super) fn commit_tables(state: &AppState, db: &mut Database, staged: Tables) -> Result<()> {
    let snapshot = Snapshot {
        version: db.version,
        tables: &staged,
    };
    let bytes = serde_json::to_vec_pretty(&snapshot).context("serialize tables")?;
    write_atomic_overwrite(&db_path(&state.data_dir), &bytes).context("write tables.json")?;
    db.tables = staged;
    Ok(())
}

fn write_atomic_overwrite(path: &FsPath, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create dir {}", parent.display()))?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    std::fs::write(&tmp, bytes).with_context(|| format!("write {}", tmp.display()))?;
    std::fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/bin/snipdeck_store/persistence_tests.rs"]
mod tests;
