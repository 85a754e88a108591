//! Assessment result panel.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::domain::{format_percent, AssessmentError, AssessmentState, PredictionResponse};
use crate::tui::styles::CardioTheme;

/// Render the panel for the current state.
///
/// `progress` drives the loading gauge and is ignored in other states.
pub fn render_result_panel(f: &mut Frame, area: Rect, state: &AssessmentState, progress: f64) {
    match state {
        AssessmentState::Idle => render_idle(f, area),
        AssessmentState::Loading => render_loading(f, area, progress),
        AssessmentState::Result(response) => render_prediction(f, area, response),
        AssessmentState::Failed(err) => render_error(f, area, err),
    }
}

fn render_idle(f: &mut Frame, area: Rect) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("Ready for assessment", CardioTheme::dim())),
        Line::from(""),
        Line::from(Span::styled(
            "Fill in all eleven fields and press Enter",
            CardioTheme::faint(),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(Span::styled(" Assessment ", CardioTheme::heading()))
            .borders(Borders::ALL)
            .border_style(CardioTheme::border()),
    );
    f.render_widget(content, area);
}

fn render_loading(f: &mut Frame, area: Rect, progress: f64) {
    let block = Block::default()
        .title(Span::styled(" Assessment ", CardioTheme::heading()))
        .borders(Borders::ALL)
        .border_style(CardioTheme::border_focused());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .margin(1)
        .split(inner);

    f.render_widget(
        Paragraph::new(Span::styled("Analyzing...", CardioTheme::focused()))
            .alignment(Alignment::Center),
        chunks[0],
    );

    let ratio = progress.clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).border_style(CardioTheme::border()))
        .gauge_style(CardioTheme::progress())
        .ratio(ratio)
        .label("waiting for the prediction service");
    f.render_widget(gauge, chunks[1]);
}

fn probability_gauge<'a>(title: &'a str, fraction: f64, style: ratatui::style::Style) -> Gauge<'a> {
    Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(format!(" {title} "), CardioTheme::dim()))
                .borders(Borders::ALL)
                .border_style(CardioTheme::border()),
        )
        .gauge_style(style)
        .ratio(fraction.clamp(0.0, 1.0))
        .label(format_percent(fraction))
}

fn render_prediction(f: &mut Frame, area: Rect, response: &PredictionResponse) {
    let classification = response.classification();
    let style = CardioTheme::classification(classification);

    let block = Block::default()
        .title(Span::styled(" Assessment Result ", CardioTheme::heading()))
        .borders(Borders::ALL)
        .border_style(style);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Classification
            Constraint::Length(3), // No disease bar
            Constraint::Length(3), // Heart disease bar
            Constraint::Min(0),
        ])
        .margin(1)
        .split(inner);

    let headline = Paragraph::new(vec![
        Line::from(Span::styled(
            response.prediction_text.clone(),
            style.add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("Model Confidence: ", CardioTheme::dim()),
            Span::styled(format_percent(response.confidence), CardioTheme::text()),
        ]),
    ])
    .alignment(Alignment::Center);
    f.render_widget(headline, chunks[0]);

    f.render_widget(
        probability_gauge("No Disease", response.probability.no_disease, CardioTheme::healthy()),
        chunks[1],
    );
    f.render_widget(
        probability_gauge(
            "Heart Disease",
            response.probability.heart_disease,
            CardioTheme::alert(),
        ),
        chunks[2],
    );
}

fn render_error(f: &mut Frame, area: Rect, err: &AssessmentError) {
    let heading = match err {
        AssessmentError::Validation { .. } => "! Incomplete form",
        AssessmentError::Service(_) => "! Service error",
        AssessmentError::Transport(_) | AssessmentError::UnknownField(_) => "! Request failed",
    };

    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(heading, CardioTheme::alert())),
        Line::from(""),
        Line::from(Span::styled(err.to_string(), CardioTheme::text())),
        Line::from(""),
        Line::from(Span::styled("Press Enter to try again", CardioTheme::faint())),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(Span::styled(" Assessment ", CardioTheme::heading()))
            .borders(Borders::ALL)
            .border_style(CardioTheme::alert()),
    );
    f.render_widget(content, area);
}
