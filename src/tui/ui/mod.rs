//! UI module: View components for the TUI.

pub mod form;
pub mod result;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::CardioTheme;

/// Reachability of the prediction service, as last probed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ServiceStatus {
    #[default]
    Checking,
    Online,
    Offline(String),
}

pub fn render_header(f: &mut Frame, area: Rect, service_url: &str, status: &ServiceStatus) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(40)])
        .split(area);

    let title = Paragraph::new(Line::from(vec![
        Span::styled(" CardioPredict", CardioTheme::title()),
        Span::styled(" │ Heart Disease Risk Assessment", CardioTheme::dim()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(CardioTheme::border()),
    );
    f.render_widget(title, chunks[0]);

    let (label, style, detail) = match status {
        ServiceStatus::Checking => ("checking", CardioTheme::caution(), service_url),
        ServiceStatus::Online => ("online", CardioTheme::healthy(), service_url),
        ServiceStatus::Offline(reason) => ("offline", CardioTheme::alert(), reason.as_str()),
    };
    let service = Paragraph::new(Line::from(vec![
        Span::styled("service ", CardioTheme::faint()),
        Span::styled(label, style),
        Span::styled(format!(" {detail} "), CardioTheme::faint()),
    ]))
    .alignment(Alignment::Right)
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(CardioTheme::border()),
    );
    f.render_widget(service, chunks[1]);
}

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![Line::from(Span::styled(
        "DISCLAIMER: This tool provides indicative estimates and does not replace professional medical evaluation.",
        CardioTheme::faint(),
    ))];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(CardioTheme::border());

    f.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
        area,
    );
}
