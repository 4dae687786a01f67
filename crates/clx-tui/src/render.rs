//! Pure view/render functions.
//!
//! Functions here take `&AppState` by immutable reference, draw to a
//! ratatui frame, and never mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;

use crate::features::{auth, dashboard};
use crate::guard::{Guard, Route};
use crate::state::AppState;

/// Renders the entire UI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    // The neutral frame while hydration or a redirect is pending. Protected
    // content must never flash here.
    if app.guard != Guard::Ready {
        render_loading(frame);
        return;
    }

    match app.route {
        Route::Login => auth::render_login(frame, &app.auth),
        Route::Register => auth::render_register(frame, &app.auth),
        Route::Dashboard => {
            let user = app.session.user();
            dashboard::render_dashboard(
                frame,
                &app.dashboard,
                user.as_ref().map(|profile| profile.name.as_str()),
            );
        }
    }
}

fn render_loading(frame: &mut Frame) {
    let area = frame.area();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Length(1),
            Constraint::Percentage(50),
        ])
        .split(area);
    frame.render_widget(
        Paragraph::new("Loading...")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        rows[1],
    );
}
