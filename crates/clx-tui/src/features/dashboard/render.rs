//! Dashboard renderer.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};
use unicode_width::UnicodeWidthStr;

use super::state::{DashboardState, FormFocus, Remote};
use crate::common::TextField;

/// Widest category label shown in the expense breakdown.
const CATEGORY_LABEL_WIDTH: usize = 14;

pub fn render_dashboard(frame: &mut Frame, state: &DashboardState, user_name: Option<&str>) {
    let area = frame.area();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // balance summary
            Constraint::Min(8),    // expenses + transactions
            Constraint::Length(9), // entry form
            Constraint::Length(1), // hints
        ])
        .split(area);

    render_balance(frame, rows[0], state, user_name);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);
    render_expenses(frame, columns[0], state);
    render_transactions(frame, columns[1], state);

    render_form(frame, rows[2], state);

    frame.render_widget(
        Paragraph::new("Tab field · Enter add · Ctrl+G category · PgUp/PgDn page · Ctrl+L logout")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        rows[3],
    );

    if let Some(modal) = &state.category_modal {
        render_category_modal(frame, modal);
    }
}

fn render_balance(frame: &mut Frame, area: Rect, state: &DashboardState, user_name: Option<&str>) {
    let title = match user_name {
        Some(name) => format!(" ClarityExpense — {name} "),
        None => " ClarityExpense ".to_string(),
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = match &state.balance.value {
        Remote::Ready(balance) => Line::from(vec![
            Span::styled("Income ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{:.2}", balance.total_income),
                Style::default().fg(Color::Green),
            ),
            Span::raw("   "),
            Span::styled("Expenses ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{:.2}", balance.total_expense),
                Style::default().fg(Color::Red),
            ),
            Span::raw("   "),
            Span::styled("Balance ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{:.2}", balance.current_balance),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Remote::Failed(message) => {
            Line::styled(message.clone(), Style::default().fg(Color::Red))
        }
        _ => Line::styled("Loading...", Style::default().fg(Color::DarkGray)),
    };
    frame.render_widget(Paragraph::new(line), inner);
}

fn render_expenses(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Expenses by category ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = match &state.expenses.value {
        Remote::Ready(expenses) if expenses.is_empty() => {
            vec![Line::styled(
                "No expenses yet.",
                Style::default().fg(Color::DarkGray),
            )]
        }
        Remote::Ready(expenses) => {
            let max = expenses
                .iter()
                .map(|e| e.total_amount)
                .fold(0.0_f64, f64::max)
                .max(1.0);
            let bar_width = usize::from(inner.width.saturating_sub(28)).max(4);
            expenses
                .iter()
                .map(|expense| {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    let filled = ((expense.total_amount / max) * bar_width as f64).round() as usize;
                    let bar = "█".repeat(filled.min(bar_width));
                    Line::from(vec![
                        Span::raw(pad_label(&expense.category_name, CATEGORY_LABEL_WIDTH)),
                        Span::styled(bar, Style::default().fg(Color::Red)),
                        Span::raw(format!(" {:.2}", expense.total_amount)),
                    ])
                })
                .collect()
        }
        Remote::Failed(message) => {
            vec![Line::styled(message.clone(), Style::default().fg(Color::Red))]
        }
        _ => vec![Line::styled(
            "Loading...",
            Style::default().fg(Color::DarkGray),
        )],
    };
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_transactions(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let title = match state.transactions.value.get() {
        Some(page) if page.total_pages > 1 => {
            format!(" Transactions ({}/{}) ", page.number + 1, page.total_pages)
        }
        _ => " Transactions ".to_string(),
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    match &state.transactions.value {
        Remote::Ready(page) => {
            let rows: Vec<Row> = page
                .content
                .iter()
                .map(|tx| {
                    let amount_style = match tx.kind {
                        clx_core::api::types::TransactionType::Income => {
                            Style::default().fg(Color::Green)
                        }
                        clx_core::api::types::TransactionType::Expense => {
                            Style::default().fg(Color::Red)
                        }
                    };
                    Row::new(vec![
                        Cell::from(tx.date.format("%Y-%m-%d").to_string()),
                        Cell::from(tx.description.clone().unwrap_or_default()),
                        Cell::from(tx.category_name.clone().unwrap_or_default()),
                        Cell::from(tx.kind.label()),
                        Cell::from(format!("{:.2}", tx.amount)).style(amount_style),
                    ])
                })
                .collect();

            let table = Table::new(
                rows,
                [
                    Constraint::Length(10),
                    Constraint::Min(12),
                    Constraint::Length(12),
                    Constraint::Length(7),
                    Constraint::Length(10),
                ],
            )
            .header(
                Row::new(vec!["Date", "Description", "Category", "Type", "Amount"])
                    .style(Style::default().add_modifier(Modifier::BOLD)),
            )
            .block(block);
            frame.render_widget(table, area);
        }
        Remote::Failed(message) => {
            frame.render_widget(
                Paragraph::new(message.clone())
                    .style(Style::default().fg(Color::Red))
                    .block(block),
                area,
            );
        }
        _ => {
            frame.render_widget(
                Paragraph::new("Loading...")
                    .style(Style::default().fg(Color::DarkGray))
                    .block(block),
                area,
            );
        }
    }
}

fn render_form(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" New transaction ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // amount
            Constraint::Length(1), // description
            Constraint::Length(1), // date
            Constraint::Length(1), // type
            Constraint::Length(1), // category
            Constraint::Length(1), // error / status
        ])
        .split(inner);

    let form = &state.form;
    render_field(frame, rows[0], "Amount", &form.amount, form.focus == FormFocus::Amount);
    render_field(
        frame,
        rows[1],
        "Description",
        &form.description,
        form.focus == FormFocus::Description,
    );
    render_field(frame, rows[2], "Date", &form.date, form.focus == FormFocus::Date);

    let kind_line = Line::from(vec![
        label_span("Type", form.focus == FormFocus::Kind),
        Span::raw(form.kind.label()),
        Span::styled(" (←/→)", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(kind_line), rows[3]);

    let category_name = state
        .categories
        .value
        .get()
        .and_then(|list| list.get(form.category_index))
        .map_or("(none)", |category| category.name.as_str());
    let category_line = Line::from(vec![
        label_span("Category", form.focus == FormFocus::Category),
        Span::raw(category_name),
        Span::styled(" (↑/↓)", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(category_line), rows[4]);

    if form.submitting {
        frame.render_widget(
            Paragraph::new("Saving...").style(Style::default().fg(Color::Yellow)),
            rows[5],
        );
    } else if let Some(error) = &form.error {
        frame.render_widget(
            Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red)),
            rows[5],
        );
    }
}

fn render_category_modal(frame: &mut Frame, modal: &super::state::CategoryForm) {
    let area = frame.area();
    let width = 40.min(area.width);
    let height = 5.min(area.height);
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" New category ");
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    render_field(frame, rows[0], "Name", &modal.name, true);
    if modal.submitting {
        frame.render_widget(
            Paragraph::new("Saving...").style(Style::default().fg(Color::Yellow)),
            rows[1],
        );
    } else if let Some(error) = &modal.error {
        frame.render_widget(
            Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red)),
            rows[1],
        );
    }
    frame.render_widget(
        Paragraph::new("Enter save · Esc cancel").style(Style::default().fg(Color::DarkGray)),
        rows[2],
    );
}

fn render_field(frame: &mut Frame, area: Rect, label: &str, field: &TextField, focused: bool) {
    let cursor = if focused { "▏" } else { "" };
    let line = Line::from(vec![
        label_span(label, focused),
        Span::raw(field.display()),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn label_span(label: &str, focused: bool) -> Span<'static> {
    let style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Span::styled(format!("{label:>12}: "), style)
}

/// Pads or truncates a label to a fixed display width.
fn pad_label(label: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in label.chars() {
        let w = ch.to_string().width();
        if used + w > width.saturating_sub(1) {
            out.push('…');
            used += 1;
            break;
        }
        out.push(ch);
        used += w;
    }
    while used < width {
        out.push(' ');
        used += 1;
    }
    out
}
