//! Renderers for the login and register views.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::state::{AuthState, LoginField, RegisterField};
use crate::common::TextField;

/// Width of the centered auth card.
const CARD_WIDTH: u16 = 48;

pub fn render_login(frame: &mut Frame, auth: &AuthState) {
    let area = centered_card(frame.area(), CARD_WIDTH, 12);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" ClarityExpense — Sign in ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // notice
            Constraint::Length(1), // email
            Constraint::Length(1), // password
            Constraint::Length(1), // error / status
            Constraint::Length(1), // hints
        ])
        .split(inner);

    if let Some(notice) = &auth.notice {
        frame.render_widget(
            Paragraph::new(notice.as_str()).style(Style::default().fg(Color::Green)),
            rows[0],
        );
    }

    let form = &auth.login;
    render_field(
        frame,
        rows[1],
        "Email",
        &form.email,
        form.focus == Some(LoginField::Email),
    );
    render_field(
        frame,
        rows[2],
        "Password",
        &form.password,
        form.focus == Some(LoginField::Password),
    );

    if form.submitting {
        frame.render_widget(
            Paragraph::new("Signing in...").style(Style::default().fg(Color::Yellow)),
            rows[3],
        );
    } else if let Some(error) = &form.error {
        frame.render_widget(
            Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red)),
            rows[3],
        );
    }

    frame.render_widget(hint_line("Enter sign in · Tab next · Ctrl+R register"), rows[4]);
}

pub fn render_register(frame: &mut Frame, auth: &AuthState) {
    let area = centered_card(frame.area(), CARD_WIDTH, 13);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" ClarityExpense — Create account ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // name
            Constraint::Length(1), // email
            Constraint::Length(1), // password
            Constraint::Length(1), // error / status
            Constraint::Length(1), // hints
        ])
        .split(inner);

    let form = &auth.register;
    render_field(
        frame,
        rows[0],
        "Name",
        &form.name,
        form.focus == Some(RegisterField::Name),
    );
    render_field(
        frame,
        rows[1],
        "Email",
        &form.email,
        form.focus == Some(RegisterField::Email),
    );
    render_field(
        frame,
        rows[2],
        "Password",
        &form.password,
        form.focus == Some(RegisterField::Password),
    );

    if form.submitting {
        frame.render_widget(
            Paragraph::new("Creating account...").style(Style::default().fg(Color::Yellow)),
            rows[3],
        );
    } else if let Some(error) = &form.error {
        frame.render_widget(
            Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red)),
            rows[3],
        );
    }

    frame.render_widget(hint_line("Enter create · Tab next · Ctrl+R sign in"), rows[4]);
}

fn render_field(frame: &mut Frame, area: Rect, label: &str, field: &TextField, focused: bool) {
    let label_style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let cursor = if focused { "▏" } else { "" };
    let line = Line::from(vec![
        Span::styled(format!("{label:>9}: "), label_style),
        Span::raw(field.display()),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn hint_line(text: &str) -> Paragraph<'_> {
    Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
}

/// Centers a fixed-size card in the available area, clamped to fit.
fn centered_card(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
