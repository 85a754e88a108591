//! Assessment form view and its key-driven editing helpers.
//!
//! Edits go through `AssessmentController::update_field`; this view only
//! tracks which field has focus.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::application::AssessmentController;
use crate::domain::{FieldKind, FormField, FormInput};
use crate::tui::styles::CardioTheme;

/// Focus state of the form.
#[derive(Debug, Default)]
pub struct FormView {
    pub selected: usize,
}

impl FormView {
    #[must_use]
    pub fn selected_field(&self) -> FormField {
        FormField::ALL[self.selected]
    }

    pub fn next_field(&mut self) {
        self.selected = (self.selected + 1) % FormField::COUNT;
    }

    pub fn prev_field(&mut self) {
        self.selected = self
            .selected
            .checked_sub(1)
            .unwrap_or(FormField::COUNT - 1);
    }

    /// Append a character to a numeric field. Other fields ignore typing.
    pub fn input_char(&self, controller: &mut AssessmentController, c: char) {
        let field = self.selected_field();
        if !field.kind().is_numeric() || !(c.is_ascii_digit() || c == '.' || c == '-') {
            return;
        }
        let mut value = controller.form().get(field).to_string();
        value.push(c);
        controller.update_field(field, value);
    }

    pub fn delete_char(&self, controller: &mut AssessmentController) {
        let field = self.selected_field();
        if field.kind().is_numeric() {
            let mut value = controller.form().get(field).to_string();
            value.pop();
            controller.update_field(field, value);
        } else {
            controller.update_field(field, "");
        }
    }

    pub fn clear_field(&self, controller: &mut AssessmentController) {
        controller.update_field(self.selected_field(), "");
    }

    /// Step a categorical field to its next (or previous) option.
    pub fn cycle_option(&self, controller: &mut AssessmentController, forward: bool) {
        let field = self.selected_field();
        let FieldKind::Choice(options) = field.kind() else {
            return;
        };
        let current = options
            .iter()
            .position(|o| o.value == controller.form().get(field));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => options.len() - 1,
            (Some(i), true) => (i + 1) % options.len(),
            (Some(i), false) => i.checked_sub(1).unwrap_or(options.len() - 1),
        };
        controller.update_field(field, options[next].value);
    }
}

/// Text shown inside a field box.
fn display_value(field: FormField, raw: &str) -> String {
    match field.option_label(raw) {
        Some(label) => format!("{raw} · {label}"),
        None => raw.to_string(),
    }
}

pub fn render_form(f: &mut Frame, area: Rect, view: &FormView, form: &FormInput, locked: bool) {
    let block = Block::default()
        .title(Span::styled(" Patient Information ", CardioTheme::heading()))
        .borders(Borders::ALL)
        .border_style(CardioTheme::border());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(inner);

    let mid = FormField::COUNT.div_ceil(2);
    let selected = (!locked).then_some(view.selected);
    render_column(f, columns[0], &FormField::ALL[..mid], form, selected);
    render_column(
        f,
        columns[1],
        &FormField::ALL[mid..],
        form,
        selected,
    );
}

fn render_column(
    f: &mut Frame,
    area: Rect,
    fields: &[FormField],
    form: &FormInput,
    selected: Option<usize>,
) {
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(3))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (row, field) in rows.iter().zip(fields) {
        let focused = selected == Some(field.index());
        let (border_style, title_style) = if focused {
            (CardioTheme::border_focused(), CardioTheme::focused())
        } else {
            (CardioTheme::border(), CardioTheme::dim())
        };

        let raw = form.get(*field);
        let value = if raw.is_empty() {
            Span::styled(field.hint(), CardioTheme::faint())
        } else {
            Span::styled(display_value(*field, raw), CardioTheme::text())
        };

        let content = Paragraph::new(Line::from(vec![
            Span::raw(" "),
            value,
            if focused {
                Span::styled("▌", CardioTheme::cursor())
            } else {
                Span::raw("")
            },
        ]))
        .block(
            Block::default()
                .title(Span::styled(format!(" {} ", field.label()), title_style))
                .borders(Borders::ALL)
                .border_style(border_style),
        );
        f.render_widget(content, *row);
    }
}

pub fn render_form_footer(f: &mut Frame, area: Rect, form: &FormInput, loading: bool) {
    let advisories = form.advisory_warnings();
    let content = if loading {
        Line::from(Span::styled("Analyzing... input is locked", CardioTheme::faint()))
    } else if let Some(first) = advisories.first() {
        Line::from(vec![
            Span::styled("! ", CardioTheme::caution()),
            Span::styled(first.to_string(), CardioTheme::caution()),
            Span::styled(
                format!(" ({} advisory, still submitted)", advisories.len()),
                CardioTheme::faint(),
            ),
        ])
    } else {
        let hint = |key: &'static str, desc: &'static str| {
            [
                Span::styled(key, CardioTheme::key_hint()),
                Span::styled(desc, CardioTheme::dim()),
            ]
        };
        Line::from(
            [
                hint("[↑↓] ", "Navigate "),
                hint("[←→] ", "Select "),
                hint("[Enter] ", "Assess "),
                hint("[R] ", "Reset "),
                hint("[S] ", "Sample "),
                hint("[Q] ", "Quit"),
            ]
            .concat(),
        )
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(CardioTheme::border()),
    );
    f.render_widget(footer, area);
}
