    use super::*;
    use crate::model::{NewProject, NewSnippet, Project};
    use crate::repo::MemoryStore;
    use crate::repo::memory::Op;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(app: &mut App<MemoryStore>, code: KeyCode) {
        event_loop::handle_key(app, key(code));
    }

    fn type_text(app: &mut App<MemoryStore>, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn seed(store: &MemoryStore, name: &str, snippets: &[&str]) -> Project {
        let project = store
            .insert_project(&NewProject {
                name: name.to_string(),
                description: String::new(),
            })
            .expect("seed project");
        for title in snippets {
            store
                .insert_snippet(&NewSnippet {
                    project_id: project.id.clone(),
                    title: title.to_string(),
                    code: "print(1)".to_string(),
                    language: "python".to_string(),
                })
                .expect("seed snippet");
        }
        project
    }

    fn started(store: &MemoryStore) -> App<MemoryStore> {
        let mut app = App::new(store.clone());
        app.start();
        app.settle();
        app
    }

    #[test]
    fn start_selects_newest_project_and_loads_snippets_off_thread() {
        let store = MemoryStore::new();
        seed(&store, "old", &["o1"]);
        let newest = seed(&store, "new", &["n1", "n2"]);

        let mut app = App::new(store.clone());
        assert!(app.controller.is_loading());
        app.start();
        assert!(!app.controller.is_loading());
        assert_eq!(app.controller.selected().map(|p| &p.id), Some(&newest.id));

        app.settle();
        let titles: Vec<_> = app.controller.snippets().iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["n2", "n1"]);
    }

    #[test]
    fn moving_down_selects_next_project() {
        let store = MemoryStore::new();
        let first = seed(&store, "first", &["f1"]);
        seed(&store, "second", &[]);
        let mut app = started(&store);

        press(&mut app, KeyCode::Char('j'));
        app.settle();
        assert_eq!(app.controller.selected().map(|p| &p.id), Some(&first.id));
        assert_eq!(app.controller.snippets().len(), 1);

        // Already at the bottom.
        press(&mut app, KeyCode::Down);
        assert_eq!(app.controller.selected().map(|p| &p.id), Some(&first.id));
    }

    #[test]
    fn snippet_cursor_moves_within_list_when_focused() {
        let store = MemoryStore::new();
        seed(&store, "p", &["a", "b", "c"]);
        let mut app = started(&store);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Snippets);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.snippet_cursor, 2);
        assert_eq!(app.highlighted_snippet().map(|s| s.title.as_str()), Some("a"));

        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.snippet_cursor, 1);
    }

    #[test]
    fn new_project_form_creates_and_selects() {
        let store = MemoryStore::new();
        let mut app = started(&store);
        assert!(app.controller.projects().is_empty());

        press(&mut app, KeyCode::Char('n'));
        assert!(matches!(app.modal, Some(Modal::AddProject(_))));
        assert!(app.controller.state().modals.add_project);

        type_text(&mut app, "Scripts");
        press(&mut app, KeyCode::Enter);
        app.settle();

        assert!(app.modal.is_none());
        assert!(!app.controller.state().modals.add_project);
        assert_eq!(app.controller.projects().len(), 1);
        assert_eq!(
            app.controller.selected().map(|p| p.name.as_str()),
            Some("Scripts")
        );
    }

    #[test]
    fn empty_name_keeps_the_form_open() {
        let store = MemoryStore::new();
        let mut app = started(&store);

        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Enter);

        match &app.modal {
            Some(Modal::AddProject(form)) => assert_eq!(form.error, Some("Name is required")),
            other => panic!("expected add project form, got {:?}", other),
        }
        assert!(store.projects().is_empty());
    }

    #[test]
    fn selection_bound_dialogs_need_a_project() {
        let store = MemoryStore::new();
        let mut app = started(&store);

        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Char('D'));
        assert!(app.modal.is_none());
        assert_eq!(
            app.controller.notices().latest().map(|n| n.message.as_str()),
            Some("Select a project first")
        );
    }

    #[test]
    fn add_snippet_form_submits_with_ctrl_s() {
        let store = MemoryStore::new();
        seed(&store, "p", &[]);
        let mut app = started(&store);

        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "hello");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "console.log(1)");
        event_loop::handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL),
        );

        assert!(app.modal.is_none());
        let snippets = app.controller.snippets();
        assert_eq!(snippets.len(), 1);
        assert_eq!(snippets[0].title, "hello");
        assert_eq!(snippets[0].language, "javascript");
    }

    #[test]
    fn delete_gate_rejects_wrong_word_then_deletes() {
        let store = MemoryStore::new();
        seed(&store, "keep", &[]);
        let doomed = seed(&store, "doomed", &["d1"]);
        let mut app = started(&store);
        assert_eq!(app.controller.selected().map(|p| &p.id), Some(&doomed.id));

        press(&mut app, KeyCode::Char('D'));
        type_text(&mut app, "Delete");
        press(&mut app, KeyCode::Enter);
        match &app.modal {
            Some(Modal::DeleteProject(gate)) => {
                assert_eq!(gate.error(), Some("Incorrect password"));
                assert_eq!(gate.input(), "");
            }
            other => panic!("expected delete gate, got {:?}", other),
        }
        assert_eq!(app.controller.projects().len(), 2);

        type_text(&mut app, "delete");
        press(&mut app, KeyCode::Enter);
        app.settle();

        assert!(app.modal.is_none());
        assert_eq!(app.controller.projects().len(), 1);
        assert_eq!(
            app.controller.selected().map(|p| p.name.as_str()),
            Some("keep")
        );
        assert!(store.snippets().is_empty());
    }

    #[test]
    fn deleting_highlighted_snippet_removes_only_that_one() {
        let store = MemoryStore::new();
        seed(&store, "p", &["a", "b"]);
        let mut app = started(&store);

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('x'));

        let titles: Vec<_> = app.controller.snippets().iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["b"]);
        assert_eq!(app.snippet_cursor, 0);
    }

    #[test]
    fn failed_submit_closes_form_and_shows_error_notice() {
        let store = MemoryStore::new();
        let mut app = started(&store);
        store.fail(Op::InsertProject);

        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "nope");
        press(&mut app, KeyCode::Enter);

        assert!(app.modal.is_none());
        assert!(app.controller.projects().is_empty());
        let latest = app.controller.notices().latest().expect("notice");
        assert_eq!(latest.level, NoticeLevel::Error);
    }

    #[test]
    fn quit_keys() {
        let store = MemoryStore::new();
        let mut app = started(&store);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.quit);

        let mut app = started(&store);
        event_loop::handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.quit);
    }
