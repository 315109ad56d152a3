    use super::*;

    fn state_in(data_dir: PathBuf) -> AppState {
        AppState {
            api_key: "dev".to_string(),
            data_dir,
            db: Arc::new(RwLock::new(Database::empty())),
        }
    }

    fn project(name: &str) -> Row {
        let mut r = Row::new();
        r.insert("id".to_string(), Value::String(format!("id-{}", name)));
        r.insert("name".to_string(), Value::String(name.to_string()));
        r.insert(
            "created_at".to_string(),
            Value::String("2030-01-01T00:00:00.000000Z".to_string()),
        );
        r
    }

    #[test]
    fn committed_tables_reload_with_clock_past_them() {
        let dir = tempfile::tempdir().expect("tempdir");
        let state = state_in(dir.path().to_path_buf());
        let mut db = Database::empty();

        let mut staged = db.stage();
        rows_mut(&mut staged, "projects").push(project("alpha"));
        commit_tables(&state, &mut db, staged).expect("commit");
        assert_eq!(db.rows("projects").len(), 1);

        let mut reloaded = load_db(dir.path()).expect("reload");
        assert_eq!(reloaded.rows("projects"), db.rows("projects"));
        assert!(reloaded.rows("code_snippets").is_empty());
        assert!(reloaded.clock.tick().as_str() > "2030-01-01T00:00:00.000000Z");
    }

    #[test]
    fn failed_write_leaves_live_tables_untouched() {
        let dir = tempfile::tempdir().expect("tempdir");
        // A regular file where the data directory should be.
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"x").expect("write blocker");
        let state = state_in(blocker.join("data"));
        let mut db = Database::empty();

        let mut staged = db.stage();
        rows_mut(&mut staged, "projects").push(project("alpha"));
        assert!(commit_tables(&state, &mut db, staged).is_err());

        assert!(db.rows("projects").is_empty());
    }
