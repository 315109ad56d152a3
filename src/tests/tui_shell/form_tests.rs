    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(form: &mut impl FnMut(KeyEvent) -> FormEvent, s: &str) {
        for c in s.chars() {
            form(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn project_form_requires_a_name() {
        let mut form = ProjectForm::new();
        type_text(&mut |k| form.handle_key(k), "   ");
        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormEvent::Submit);
        assert_eq!(form.validate(), None);
        assert_eq!(form.error, Some("Name is required"));

        // Typing clears the error.
        form.handle_key(key(KeyCode::Char('x')));
        assert_eq!(form.error, None);
    }

    #[test]
    fn project_form_trims_both_fields() {
        let mut form = ProjectForm::new();
        type_text(&mut |k| form.handle_key(k), "  Tools ");
        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.field, ProjectField::Description);
        type_text(&mut |k| form.handle_key(k), " shell bits ");

        assert_eq!(
            form.validate(),
            Some(("Tools".to_string(), "shell bits".to_string()))
        );
    }

    #[test]
    fn editing_form_starts_from_project_values() {
        let project = Project {
            id: "p1".into(),
            name: "Web".to_string(),
            description: Some(String::new()),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
        };
        let mut form = ProjectForm::editing(&project);
        assert_eq!(form.name.buf, "Web");
        assert_eq!(form.description.buf, "");
        assert_eq!(form.handle_key(key(KeyCode::Esc)), FormEvent::Cancel);
    }

    #[test]
    fn snippet_form_defaults_to_javascript_and_cycles_languages() {
        let mut form = SnippetForm::new();
        assert_eq!(form.language(), DEFAULT_LANGUAGE);

        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.field, SnippetField::Language);
        form.handle_key(key(KeyCode::Right));
        assert_ne!(form.language(), DEFAULT_LANGUAGE);
        form.handle_key(key(KeyCode::Left));
        assert_eq!(form.language(), DEFAULT_LANGUAGE);

        // Wraps around at the start of the list.
        form.language = 0;
        form.handle_key(key(KeyCode::Left));
        assert_eq!(form.language(), LANGUAGES[LANGUAGES.len() - 1]);
    }

    #[test]
    fn snippet_code_takes_newlines_and_ctrl_s_submits() {
        let mut form = SnippetForm::new();
        type_text(&mut |k| form.handle_key(k), "hello");
        form.handle_key(key(KeyCode::Enter));
        assert_eq!(form.field, SnippetField::Language);
        form.handle_key(key(KeyCode::Enter));
        assert_eq!(form.field, SnippetField::Code);

        type_text(&mut |k| form.handle_key(k), "a");
        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormEvent::None);
        type_text(&mut |k| form.handle_key(k), "b");
        assert_eq!(form.code.buf, "a\nb");

        let save = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(form.handle_key(save), FormEvent::Submit);
        assert_eq!(
            form.validate(),
            Some((
                "hello".to_string(),
                "a\nb".to_string(),
                DEFAULT_LANGUAGE.to_string()
            ))
        );
    }

    #[test]
    fn snippet_form_rejects_blank_code() {
        let mut form = SnippetForm::new();
        type_text(&mut |k| form.handle_key(k), "title");
        assert_eq!(form.validate(), None);
        assert_eq!(form.error, Some("Title and code are required"));
        assert_eq!(form.field, SnippetField::Code);
    }
