use super::*;

pub(super) fn run_loop<S: TuiStore>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<S>,
) -> Result<()> {
    // Paint the loading screen before the first round trip.
    terminal
        .draw(|f| super::render::draw(f, app))
        .context("draw")?;
    app.start();

    loop {
        app.drain_fetches();

        terminal
            .draw(|f| super::render::draw(f, app))
            .context("draw")?;
        if app.quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(50)).context("poll")? {
            match event::read().context("read event")? {
                Event::Key(k) if k.kind == KeyEventKind::Press => handle_key(app, k),
                _ => {}
            }
        }
    }
}

pub(in crate::tui_shell) fn handle_key<S: TuiStore>(app: &mut App<S>, key: KeyEvent) {
    if app.modal.is_some() {
        modal::handle_modal_key(app, key);
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit = true;
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Tab | KeyCode::BackTab => app.toggle_focus(),
        KeyCode::Up | KeyCode::Char('k') => app.move_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor(1),
        KeyCode::Char('n') => app.open(ModalKind::AddProject),
        KeyCode::Char('e') => app.open(ModalKind::EditProject),
        KeyCode::Char('D') => app.open(ModalKind::DeleteProject),
        KeyCode::Char('a') => app.open(ModalKind::AddSnippet),
        KeyCode::Char('x') | KeyCode::Delete => app.delete_highlighted_snippet(),
        KeyCode::Char('r') => app.reload(),
        _ => {}
    }
}
