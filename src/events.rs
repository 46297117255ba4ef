use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Route};

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Ctrl-C quits from anywhere
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // The logout confirmation captures all keys while open
    if app.show_logout_confirm {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_logout(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_logout(),
            _ => {}
        }
        return;
    }

    match app.route {
        Route::Login => handle_login_input(app, key),
        Route::Dashboard => handle_dashboard_input(app, key),
    }
}

/// Handle key input on the login screen (form text entry)
fn handle_login_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.quit(),

        // Field focus
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.login.focus = app.login.focus.next();
        }

        // Submit
        KeyCode::Enter => app.submit_login(),

        // Edit the focused field
        KeyCode::Backspace => {
            app.login.focused_value_mut().pop();
        }
        KeyCode::Char(c) => {
            app.login.focused_value_mut().push(c);
        }

        _ => {}
    }
}

/// Handle key input on the dashboard
fn handle_dashboard_input(app: &mut App, key: KeyEvent) {
    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),

        // Logout (opens the confirmation modal)
        KeyCode::Char('l') | KeyCode::Esc => app.request_logout(),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::ConfigAuth;
    use crate::data::MemoryStore;
    use crate::feed::ChannelSource;
    use crossterm::event::KeyModifiers;

    fn test_app() -> App {
        let (_tx, source) = ChannelSource::create("test");
        let auth = ConfigAuth::with_accounts([("user@example.com", "hunter2")]);
        App::new(Box::new(source), Box::new(MemoryStore::new()), Box::new(auth))
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_login_form_typing_and_submit() {
        let mut app = test_app();

        type_text(&mut app, "user@example.com");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "hunter2");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.route, Route::Dashboard);
    }

    #[test]
    fn test_login_backspace_edits_focused_field() {
        let mut app = test_app();
        type_text(&mut app, "usr");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.login.email, "us");
    }

    #[test]
    fn test_failed_submit_keeps_form_retryable() {
        let mut app = test_app();
        type_text(&mut app, "user@example.com");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "wrong");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.route, Route::Login);
        assert!(app.login.error.is_some());

        // Retry with the right password
        for _ in 0.."wrong".len() {
            press(&mut app, KeyCode::Backspace);
        }
        type_text(&mut app, "hunter2");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.route, Route::Dashboard);
    }

    #[test]
    fn test_dashboard_logout_keys() {
        let mut app = test_app();
        type_text(&mut app, "user@example.com");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "hunter2");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Char('l'));
        assert!(app.show_logout_confirm);

        press(&mut app, KeyCode::Char('n'));
        assert!(!app.show_logout_confirm);
        assert_eq!(app.route, Route::Dashboard);

        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.route, Route::Login);
    }

    #[test]
    fn test_help_overlay_closes_on_any_key() {
        let mut app = test_app();
        type_text(&mut app, "user@example.com");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "hunter2");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('x'));
        assert!(!app.show_help);
    }
}
