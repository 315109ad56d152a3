    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn row(title: &str, created_at: Option<&str>) -> Row {
        let mut r = Row::new();
        r.insert("title".to_string(), Value::String(title.to_string()));
        r.insert(
            "created_at".to_string(),
            created_at.map_or(Value::Null, |c| Value::String(c.to_string())),
        );
        r
    }

    fn snippets() -> &'static TableSchema {
        lookup_table("code_snippets").expect("schema")
    }

    #[test]
    fn parses_select_filter_and_order() {
        let q = parse_query(
            snippets(),
            &params(&[
                ("select", "*"),
                ("project_id", "eq.p1"),
                ("order", "created_at.desc"),
            ]),
        )
        .expect("parse");
        assert!(q.columns.is_none());
        assert_eq!(q.filters, vec![("project_id".to_string(), "p1".to_string())]);
        assert_eq!(q.order, Some(("created_at".to_string(), true)));
    }

    #[test]
    fn rejects_unknown_columns_and_operators() {
        let err = parse_query(snippets(), &params(&[("owner", "eq.x")])).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = parse_query(snippets(), &params(&[("title", "like.x%")])).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = parse_query(snippets(), &params(&[("order", "title.sideways")])).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn sorts_descending_with_nulls_last() {
        let q = parse_query(snippets(), &params(&[("order", "created_at.desc")])).expect("parse");
        let mut rows = vec![
            row("old", Some("2024-01-01T00:00:00.000001Z")),
            row("none", None),
            row("new", Some("2024-01-01T00:00:00.000002Z")),
        ];
        q.sort(&mut rows);
        let titles: Vec<_> = rows.iter().map(|r| r["title"].as_str().unwrap_or("")).collect();
        assert_eq!(titles, vec!["new", "old", "none"]);
    }

    #[test]
    fn projects_selected_columns() {
        let q = parse_query(snippets(), &params(&[("select", "title")])).expect("parse");
        let out = q.project(vec![row("a", Some("t"))]);
        assert_eq!(out[0].len(), 1);
        assert!(out[0].contains_key("title"));
    }
