    use super::*;

    fn param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn select_all_requests_every_column() {
        let params = Select::all().to_params();
        assert_eq!(params.len(), 1);
        assert_eq!(param(&params, "select"), Some("*"));
    }

    #[test]
    fn filtered_newest_first_encodes_eq_and_order() {
        let params = Select::all()
            .eq("project_id", "p-1")
            .newest_first()
            .to_params();
        assert_eq!(param(&params, "project_id"), Some("eq.p-1"));
        assert_eq!(param(&params, "order"), Some("created_at.desc"));
    }

    #[test]
    fn ascending_order_is_spelled_out() {
        let params = Select::all().order("title", Direction::Asc).to_params();
        assert_eq!(param(&params, "order"), Some("title.asc"));
    }

    #[test]
    fn id_params_match_by_equality() {
        let p = id_params("abc");
        assert_eq!(p[0].0, "id");
        assert_eq!(p[0].1, "eq.abc");
    }
