//! Keyboard input dispatch: overlays first, then global keys.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::app::{AppState, Overlay};

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    if app.overlay == Overlay::Help {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Enter
        ) {
            app.overlay = Overlay::None;
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.running = false,
        KeyCode::Char('?') => app.overlay = Overlay::Help,
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Char('+') => app.increase_samples(),
        KeyCode::Char('h') | KeyCode::Left | KeyCode::Char('-') => app.decrease_samples(),
        KeyCode::Char('p') | KeyCode::Char(' ') => app.toggle_points(),
        KeyCode::Char('j') | KeyCode::Down => app.scroll_down(),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_up(),
        KeyCode::Char('t') | KeyCode::Tab => app.toggle_view(),
        KeyCode::Char('x') => app.export(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{View, MAX_SAMPLES};
    use crossterm::event::{KeyEventState, KeyModifiers};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_adjust_sample_count() {
        let mut app = AppState::default();
        handle_key(&mut app, press(KeyCode::Right));
        assert_eq!(app.sample_count, 12);
        handle_key(&mut app, press(KeyCode::Char('h')));
        handle_key(&mut app, press(KeyCode::Left));
        assert_eq!(app.sample_count, 10);
        for _ in 0..100 {
            handle_key(&mut app, press(KeyCode::Char('l')));
        }
        assert_eq!(app.sample_count, MAX_SAMPLES);
    }

    #[test]
    fn release_events_are_ignored() {
        let mut app = AppState::default();
        let release = KeyEvent {
            code: KeyCode::Char('l'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        handle_key(&mut app, release);
        assert_eq!(app.sample_count, 11);
    }

    #[test]
    fn help_overlay_swallows_keys() {
        let mut app = AppState::default();
        handle_key(&mut app, press(KeyCode::Char('?')));
        assert_eq!(app.overlay, Overlay::Help);
        handle_key(&mut app, press(KeyCode::Char('l')));
        assert_eq!(app.sample_count, 11);
        handle_key(&mut app, press(KeyCode::Esc));
        assert_eq!(app.overlay, Overlay::None);
        assert!(app.running);
    }

    #[test]
    fn view_points_and_quit() {
        let mut app = AppState::default();
        handle_key(&mut app, press(KeyCode::Char('t')));
        assert_eq!(app.view, View::Table);
        handle_key(&mut app, press(KeyCode::Char('p')));
        assert!(!app.show_points);
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(!app.running);
    }
}
