    use super::*;
    use crate::model::{NewProject, NewSnippet};
    use crate::repo::MemoryStore;
    use crate::repo::memory::{Call, Op};

    fn seed_project(store: &MemoryStore, name: &str) -> Project {
        store
            .insert_project(&NewProject {
                name: name.to_string(),
                description: format!("{} description", name),
            })
            .expect("seed project")
    }

    fn seed_snippet(store: &MemoryStore, project: &Project, title: &str) -> CodeSnippet {
        store
            .insert_snippet(&NewSnippet {
                project_id: project.id.clone(),
                title: title.to_string(),
                code: format!("// {}", title),
                language: "rust".to_string(),
            })
            .expect("seed snippet")
    }

    fn snippet_loads(store: &MemoryStore) -> Vec<ProjectId> {
        store
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::ListSnippets(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn load_projects_selects_most_recent_and_loads_its_snippets() {
        let store = MemoryStore::new();
        let alpha = seed_project(&store, "alpha");
        let beta = seed_project(&store, "beta");
        seed_snippet(&store, &alpha, "a1");
        let b1 = seed_snippet(&store, &beta, "b1");

        let mut c = Controller::new(store.clone());
        assert!(c.is_loading());
        c.load_projects().expect("load");

        assert!(!c.is_loading());
        assert_eq!(c.projects().len(), 2);
        assert_eq!(c.projects()[0].id, beta.id);
        assert_eq!(c.selected().map(|p| &p.id), Some(&beta.id));
        assert_eq!(c.snippets(), &[b1]);
        assert_eq!(snippet_loads(&store), vec![beta.id]);
    }

    #[test]
    fn load_projects_failure_keeps_state_and_clears_loading() {
        let store = MemoryStore::new();
        seed_project(&store, "alpha");
        store.fail(Op::ListProjects);

        let mut c = Controller::new(store.clone());
        let err = c.load_projects().unwrap_err();
        assert!(matches!(err, ControllerError::Store(_)));
        assert!(!c.is_loading());
        assert!(c.projects().is_empty());
        assert!(c.selected().is_none());
        assert_eq!(c.notices().errors(), 1);
        assert!(snippet_loads(&store).is_empty());
    }

    #[test]
    fn load_projects_keeps_existing_selection() {
        let store = MemoryStore::new();
        let alpha = seed_project(&store, "alpha");
        seed_project(&store, "beta");

        let mut c = Controller::new(store.clone());
        c.load_projects().expect("load");
        assert!(c.select_project(&alpha.id));
        c.load_projects().expect("reload");

        assert_eq!(c.selected().map(|p| &p.id), Some(&alpha.id));
    }

    #[test]
    fn load_projects_reselects_when_selection_vanished() {
        let store = MemoryStore::new();
        let alpha = seed_project(&store, "alpha");
        let beta = seed_project(&store, "beta");

        let mut c = Controller::new(store.clone());
        c.load_projects().expect("load");
        assert_eq!(c.selected().map(|p| &p.id), Some(&beta.id));

        // Another client removes the selected project.
        store.delete_project(&beta.id).expect("external delete");
        c.load_projects().expect("reload");

        assert_eq!(c.selected().map(|p| &p.id), Some(&alpha.id));
    }

    #[test]
    fn add_project_prepends_and_selects_each_new_row() {
        let store = MemoryStore::new();
        let mut c = Controller::new(store.clone());
        c.load_projects().expect("load");

        for name in ["one", "two", "three"] {
            c.add_project(name, "").expect("add");
        }

        assert_eq!(c.projects().len(), 3);
        let mut ids: Vec<_> = c.projects().iter().map(|p| p.id.clone()).collect();
        ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        ids.dedup();
        assert_eq!(ids.len(), 3);

        assert_eq!(c.projects()[0].name, "three");
        assert_eq!(c.selected().map(|p| p.name.as_str()), Some("three"));
        assert_eq!(snippet_loads(&store).len(), 3);
    }

    #[test]
    fn add_project_trims_and_rejects_blank_names() {
        let store = MemoryStore::new();
        let mut c = Controller::new(store.clone());

        let err = c.add_project("   ", "desc").unwrap_err();
        assert!(matches!(err, ControllerError::Invalid("name")));
        assert!(store.calls().is_empty());

        c.add_project("  web  ", "  frontend bits ").expect("add");
        let p = &c.projects()[0];
        assert_eq!(p.name, "web");
        assert_eq!(p.description(), Some("frontend bits"));
    }

    #[test]
    fn add_project_failure_leaves_list_untouched() {
        let store = MemoryStore::new();
        store.fail(Op::InsertProject);
        let mut c = Controller::new(store.clone());

        assert!(c.add_project("web", "").is_err());
        assert!(c.projects().is_empty());
        assert!(c.selected().is_none());
        assert_eq!(
            c.notices().latest().map(|n| n.level),
            Some(NoticeLevel::Error)
        );
    }

    #[test]
    fn selecting_a_project_fetches_its_snippets_once() {
        let store = MemoryStore::new();
        let alpha = seed_project(&store, "alpha");
        seed_project(&store, "beta");
        let a1 = seed_snippet(&store, &alpha, "a1");

        let mut c = Controller::new(store.clone());
        c.load_projects().expect("load");
        store.clear_calls();

        assert!(c.select_project(&alpha.id));
        assert_eq!(snippet_loads(&store), vec![alpha.id.clone()]);
        assert_eq!(c.snippets(), &[a1]);
        assert!(c.snippets().iter().all(|s| s.project_id == alpha.id));
    }

    #[test]
    fn selecting_unknown_project_is_ignored() {
        let store = MemoryStore::new();
        let alpha = seed_project(&store, "alpha");
        let mut c = Controller::new(store.clone());
        c.load_projects().expect("load");
        store.clear_calls();

        assert!(!c.select_project(&ProjectId::from("missing")));
        assert_eq!(c.selected().map(|p| &p.id), Some(&alpha.id));
        assert!(store.calls().is_empty());
    }

    #[test]
    fn add_snippet_without_selection_is_a_no_op() {
        let store = MemoryStore::new();
        let mut c = Controller::new(store.clone());
        c.load_projects().expect("load");
        store.clear_calls();

        c.add_snippet("title", "code", "rust").expect("no-op");
        assert!(store.calls().is_empty());
        assert!(c.snippets().is_empty());
    }

    #[test]
    fn add_snippet_validates_title_and_code() {
        let store = MemoryStore::new();
        seed_project(&store, "alpha");
        let mut c = Controller::new(store.clone());
        c.load_projects().expect("load");
        store.clear_calls();

        assert!(matches!(
            c.add_snippet(" ", "x", "go"),
            Err(ControllerError::Invalid("title"))
        ));
        assert!(matches!(
            c.add_snippet("t", "\n\t", "go"),
            Err(ControllerError::Invalid("code"))
        ));
        assert!(store.calls().is_empty());
    }

    #[test]
    fn add_snippet_prepends_to_selected_project() {
        let store = MemoryStore::new();
        let alpha = seed_project(&store, "alpha");
        seed_snippet(&store, &alpha, "older");
        let mut c = Controller::new(store.clone());
        c.load_projects().expect("load");

        c.add_snippet("  newer ", "  fn main() {}  ", "rust")
            .expect("add snippet");

        assert_eq!(c.snippets().len(), 2);
        let s = &c.snippets()[0];
        assert_eq!(s.title, "newer");
        assert_eq!(s.code, "fn main() {}");
        assert_eq!(s.language, "rust");
        assert_eq!(s.project_id, alpha.id);
    }

    #[test]
    fn add_snippet_blank_language_falls_back_to_default() {
        let store = MemoryStore::new();
        seed_project(&store, "alpha");
        let mut c = Controller::new(store.clone());
        c.load_projects().expect("load");

        c.add_snippet("t", "x", "").expect("add");
        assert_eq!(c.snippets()[0].language, DEFAULT_LANGUAGE);
    }

    #[test]
    fn delete_snippet_removes_exactly_one() {
        let store = MemoryStore::new();
        let alpha = seed_project(&store, "alpha");
        let s1 = seed_snippet(&store, &alpha, "s1");
        let s2 = seed_snippet(&store, &alpha, "s2");
        let s3 = seed_snippet(&store, &alpha, "s3");
        let mut c = Controller::new(store.clone());
        c.load_projects().expect("load");
        assert_eq!(c.snippets().len(), 3);

        c.delete_snippet(&s2.id).expect("delete");

        let left: Vec<_> = c.snippets().iter().map(|s| s.id.clone()).collect();
        assert_eq!(left, vec![s3.id, s1.id]);
    }

    #[test]
    fn delete_snippet_failure_keeps_local_list() {
        let store = MemoryStore::new();
        let alpha = seed_project(&store, "alpha");
        let s1 = seed_snippet(&store, &alpha, "s1");
        let mut c = Controller::new(store.clone());
        c.load_projects().expect("load");
        store.fail(Op::DeleteSnippet);

        assert!(c.delete_snippet(&s1.id).is_err());
        assert_eq!(c.snippets().len(), 1);
    }

    #[test]
    fn edit_project_updates_selection_and_list_in_place() {
        let store = MemoryStore::new();
        let alpha = seed_project(&store, "alpha");
        seed_project(&store, "beta");
        let mut c = Controller::new(store.clone());
        c.load_projects().expect("load");
        c.select_project(&alpha.id);

        c.edit_project(" renamed ", " new words ").expect("edit");

        let sel = c.selected().expect("selected");
        assert_eq!(sel.id, alpha.id);
        assert_eq!(sel.name, "renamed");
        assert_eq!(sel.description(), Some("new words"));
        assert_eq!(c.projects()[1].name, "renamed");
        assert_eq!(c.projects()[0].name, "beta");

        c.load_projects().expect("reload");
        let fresh = c
            .projects()
            .iter()
            .find(|p| p.id == alpha.id)
            .expect("still there");
        assert_eq!(fresh.name, "renamed");
        assert_eq!(fresh.description(), Some("new words"));
    }

    #[test]
    fn edit_project_without_selection_does_nothing() {
        let store = MemoryStore::new();
        let mut c = Controller::new(store.clone());
        c.edit_project("x", "y").expect("no-op");
        assert!(store.calls().is_empty());
    }

    #[test]
    fn edit_project_failure_keeps_old_values() {
        let store = MemoryStore::new();
        seed_project(&store, "alpha");
        let mut c = Controller::new(store.clone());
        c.load_projects().expect("load");
        store.fail(Op::UpdateProject);

        assert!(c.edit_project("renamed", "").is_err());
        assert_eq!(c.selected().map(|p| p.name.as_str()), Some("alpha"));
        assert_eq!(c.projects()[0].name, "alpha");
    }

    #[test]
    fn deleting_last_project_clears_everything() {
        let store = MemoryStore::new();
        let alpha = seed_project(&store, "alpha");
        seed_snippet(&store, &alpha, "a1");
        let mut c = Controller::new(store.clone());
        c.load_projects().expect("load");
        assert_eq!(c.snippets().len(), 1);
        c.open_modal(ModalKind::DeleteProject);

        c.delete_project().expect("delete");

        assert!(c.projects().is_empty());
        assert!(c.selected().is_none());
        assert!(c.snippets().is_empty());
        assert!(!c.state().modals.any_open());
        assert!(store.snippets().is_empty());
    }

    #[test]
    fn deleting_project_reselects_first_remaining() {
        let store = MemoryStore::new();
        let alpha = seed_project(&store, "alpha");
        let a1 = seed_snippet(&store, &alpha, "a1");
        let beta = seed_project(&store, "beta");
        seed_snippet(&store, &beta, "b1");
        let mut c = Controller::new(store.clone());
        c.load_projects().expect("load");
        assert_eq!(c.selected().map(|p| &p.id), Some(&beta.id));

        c.delete_project().expect("delete");

        assert_eq!(c.projects().len(), 1);
        assert_eq!(c.selected().map(|p| &p.id), Some(&alpha.id));
        assert_eq!(c.snippets(), &[a1]);
    }

    #[test]
    fn delete_project_failure_keeps_selection() {
        let store = MemoryStore::new();
        let alpha = seed_project(&store, "alpha");
        let mut c = Controller::new(store.clone());
        c.load_projects().expect("load");
        store.fail(Op::DeleteProject);

        assert!(c.delete_project().is_err());
        assert_eq!(c.selected().map(|p| &p.id), Some(&alpha.id));
        assert_eq!(c.projects().len(), 1);
    }

    #[test]
    fn stale_snippet_response_is_discarded() {
        let store = MemoryStore::new();
        let alpha = seed_project(&store, "alpha");
        seed_snippet(&store, &alpha, "a1");
        let beta = seed_project(&store, "beta");
        let b1 = seed_snippet(&store, &beta, "b1");

        let mut c = Controller::new(store.clone()).with_fetch_mode(FetchMode::Deferred);
        c.load_projects().expect("load");
        let first = c.take_fetch().expect("fetch for beta");
        assert_eq!(first.project_id, beta.id);

        c.select_project(&alpha.id);
        let second = c.take_fetch().expect("fetch for alpha");
        assert!(c.is_fetching_snippets());

        // Beta's response lands after the user moved to alpha.
        let late = first.run(&store);
        assert!(!c.apply_snippets(late));
        assert!(c.snippets().is_empty());

        let fresh = second.run(&store);
        assert!(c.apply_snippets(fresh));
        assert!(!c.is_fetching_snippets());
        assert_eq!(c.snippets().len(), 1);
        assert_eq!(c.snippets()[0].project_id, alpha.id);
        assert_ne!(c.snippets()[0].id, b1.id);
    }

    #[test]
    fn response_after_selection_cleared_is_discarded() {
        let store = MemoryStore::new();
        let alpha = seed_project(&store, "alpha");
        seed_snippet(&store, &alpha, "a1");

        let mut c = Controller::new(store.clone()).with_fetch_mode(FetchMode::Deferred);
        c.load_projects().expect("load");
        let pending = c.take_fetch().expect("fetch");

        c.delete_project().expect("delete");
        assert!(c.take_fetch().is_none());

        assert!(!c.apply_snippets(pending.run(&store)));
        assert!(c.snippets().is_empty());
    }

    #[test]
    fn failed_snippet_load_reports_and_keeps_list() {
        let store = MemoryStore::new();
        seed_project(&store, "alpha");
        store.fail(Op::ListSnippets);

        let mut c = Controller::new(store.clone());
        c.load_projects().expect("load");

        assert!(c.snippets().is_empty());
        assert!(!c.is_fetching_snippets());
        assert_eq!(c.notices().errors(), 1);
    }

    #[test]
    fn reload_refetches_snippets_once() {
        let store = MemoryStore::new();
        let alpha = seed_project(&store, "alpha");
        let mut c = Controller::new(store.clone());
        c.load_projects().expect("load");
        seed_snippet(&store, &alpha, "late");
        store.clear_calls();

        c.reload().expect("reload");

        assert_eq!(snippet_loads(&store), vec![alpha.id]);
        assert_eq!(c.snippets().len(), 1);
    }

    #[test]
    fn load_snippets_refreshes_only_the_selected_project() {
        let store = MemoryStore::new();
        let alpha = seed_project(&store, "alpha");
        let beta = seed_project(&store, "beta");
        let mut c = Controller::new(store.clone());
        c.load_projects().expect("load");
        seed_snippet(&store, &beta, "b1");
        seed_snippet(&store, &alpha, "a1");
        store.clear_calls();

        c.load_snippets(&alpha.id);
        assert!(snippet_loads(&store).is_empty());
        assert!(c.snippets().is_empty());

        c.load_snippets(&beta.id);
        assert_eq!(snippet_loads(&store), vec![beta.id.clone()]);
        assert_eq!(c.snippets().len(), 1);
        assert_eq!(c.snippets()[0].project_id, beta.id);
    }

    #[test]
    fn fetch_issued_before_snippet_delete_cannot_restore_it() {
        let store = MemoryStore::new();
        let alpha = seed_project(&store, "alpha");
        let a1 = seed_snippet(&store, &alpha, "a1");

        let mut c = Controller::new(store.clone()).with_fetch_mode(FetchMode::Deferred);
        c.load_projects().expect("load");
        let initial = c.take_fetch().expect("initial fetch");
        assert!(c.apply_snippets(initial.run(&store)));

        c.reload().expect("reload");
        let before = c.take_fetch().expect("reload fetch").run(&store);
        c.delete_snippet(&a1.id).expect("delete");

        assert!(!c.apply_snippets(before));
        assert!(c.snippets().is_empty());

        let after = c.take_fetch().expect("refetch after delete");
        assert!(c.apply_snippets(after.run(&store)));
        assert!(c.snippets().is_empty());
        assert!(store.snippets().is_empty());
    }

    #[test]
    fn fetch_issued_before_snippet_add_cannot_drop_it() {
        let store = MemoryStore::new();
        seed_project(&store, "alpha");

        let mut c = Controller::new(store.clone()).with_fetch_mode(FetchMode::Deferred);
        c.load_projects().expect("load");
        let before = c.take_fetch().expect("fetch").run(&store);
        c.add_snippet("fresh", "let x = 1;", "rust").expect("add");

        assert!(!c.apply_snippets(before));
        assert_eq!(c.snippets().len(), 1);

        let after = c.take_fetch().expect("refetch after add");
        assert!(c.apply_snippets(after.run(&store)));
        assert_eq!(c.snippets().len(), 1);
        assert_eq!(c.snippets()[0].title, "fresh");
    }

    #[test]
    fn snippet_mutation_without_pending_load_does_not_refetch() {
        let store = MemoryStore::new();
        let alpha = seed_project(&store, "alpha");
        let a1 = seed_snippet(&store, &alpha, "a1");
        let mut c = Controller::new(store.clone());
        c.load_projects().expect("load");
        store.clear_calls();

        c.delete_snippet(&a1.id).expect("delete");
        c.add_snippet("b", "code", "rust").expect("add");

        assert!(snippet_loads(&store).is_empty());
    }

    #[test]
    fn ensure_selected_keeps_current_selection_without_fetching() {
        let store = MemoryStore::new();
        let alpha = seed_project(&store, "alpha");
        let beta = seed_project(&store, "beta");
        let mut c = Controller::new(store.clone());
        c.load_projects().expect("load");
        store.clear_calls();

        assert!(c.ensure_selected(&beta.id));
        assert!(snippet_loads(&store).is_empty());

        assert!(c.ensure_selected(&alpha.id));
        assert_eq!(snippet_loads(&store), vec![alpha.id.clone()]);

        assert!(!c.ensure_selected(&ProjectId::from("missing")));
        assert_eq!(c.selected().map(|p| &p.id), Some(&alpha.id));
    }

    #[test]
    fn selection_bound_modals_need_a_selection() {
        let store = MemoryStore::new();
        let mut c = Controller::new(store.clone());
        c.load_projects().expect("load");

        assert!(!c.open_modal(ModalKind::EditProject));
        assert!(!c.open_modal(ModalKind::DeleteProject));
        assert!(!c.open_modal(ModalKind::AddSnippet));
        assert!(c.open_modal(ModalKind::AddProject));
        assert!(c.state().modals.add_project);

        c.close_modal(ModalKind::AddProject);
        assert!(!c.state().modals.any_open());
    }
