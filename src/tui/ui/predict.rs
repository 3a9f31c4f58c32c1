//! Risk prediction form and result view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::domain::{PredictionInput, RiskAssessment};
use crate::tui::styles::MaternalTheme;

/// Form field definition
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub hint: &'static str,
    pub value: String,
}

/// Prediction form state
pub struct PredictFormState {
    pub fields: Vec<FormField>,
    pub selected_field: usize,
    pub error_message: Option<String>,
    /// Set after a successful prediction; the view shows the result panel
    /// until dismissed.
    pub result: Option<RiskAssessment>,
}

impl Default for PredictFormState {
    fn default() -> Self {
        Self {
            fields: vec![
                FormField {
                    label: "Age",
                    hint: "years (10-100)",
                    value: String::new(),
                },
                FormField {
                    label: "Systolic BP",
                    hint: "mmHg (50-250)",
                    value: String::new(),
                },
                FormField {
                    label: "Diastolic BP",
                    hint: "mmHg (30-200)",
                    value: String::new(),
                },
                FormField {
                    label: "Blood Sugar",
                    hint: "mmol/L (0-30)",
                    value: String::new(),
                },
                FormField {
                    label: "Heart Rate",
                    hint: "bpm (30-200)",
                    value: String::new(),
                },
                FormField {
                    label: "Body Temp",
                    hint: "°C (30-45)",
                    value: String::new(),
                },
            ],
            selected_field: 0,
            error_message: None,
            result: None,
        }
    }
}

impl PredictFormState {
    /// Move to the next field
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.fields.len();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Add a character to the current field
    pub fn input_char(&mut self, c: char) {
        if c.is_ascii_digit() || c == '.' {
            self.fields[self.selected_field].value.push(c);
            self.error_message = None;
        }
    }

    /// Delete the last character
    pub fn delete_char(&mut self) {
        self.fields[self.selected_field].value.pop();
    }

    /// Clear the current field
    pub fn clear_field(&mut self) {
        self.fields[self.selected_field].value.clear();
    }

    /// Parse the field buffers into a prediction input.
    ///
    /// Range validation happens in the prediction service; this only
    /// rejects unparseable numbers.
    pub fn to_input(&self) -> Result<PredictionInput, String> {
        let parse = |i: usize| -> Result<f64, String> {
            self.fields[i]
                .value
                .parse()
                .map_err(|_| format!("{}: Invalid number", self.fields[i].label))
        };

        Ok(PredictionInput {
            age: parse(0)?,
            systolic_bp: parse(1)?,
            diastolic_bp: parse(2)?,
            bs: parse(3)?,
            heart_rate: parse(4)?,
            body_temp_c: parse(5)?,
        })
    }

    /// Load sample data (typical low-risk measurements)
    pub fn load_sample_data(&mut self) {
        let sample = ["25", "120", "80", "7.0", "75", "36.8"];
        for (i, val) in sample.iter().enumerate() {
            self.fields[i].value = (*val).to_string();
        }
    }
}

/// Render the prediction screen: the form, or the result once available.
pub fn render_predict(f: &mut Frame, area: Rect, state: &PredictFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form or result
            Constraint::Length(3), // Footer/error
        ])
        .split(area);

    render_predict_header(f, chunks[0]);

    match &state.result {
        Some(assessment) => render_result(f, chunks[1], assessment),
        None => render_form_fields(f, chunks[1], state),
    }

    render_predict_footer(f, chunks[2], state);
}

fn render_predict_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MaternalTheme::text()),
        Span::styled("Predict Pregnancy Risk", MaternalTheme::title()),
        Span::styled(" │ Decision Tree Model", MaternalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MaternalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &PredictFormState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let mid = (state.fields.len() + 1) / 2;

    render_field_column(f, columns[0], &state.fields[..mid], 0, state.selected_field);
    render_field_column(
        f,
        columns[1],
        &state.fields[mid..],
        mid,
        state.selected_field,
    );
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    fields: &[FormField],
    offset: usize,
    selected: usize,
) {
    let field_height = 3;
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(field_height))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let is_selected = offset + i == selected;
        let border_style = if is_selected {
            MaternalTheme::border_focused()
        } else {
            MaternalTheme::border()
        };

        let title_style = if is_selected {
            MaternalTheme::focused()
        } else {
            MaternalTheme::text_secondary()
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let value_display = if field.value.is_empty() {
            Span::styled(field.hint, MaternalTheme::text_muted())
        } else {
            Span::styled(&field.value, MaternalTheme::text())
        };

        let content = Paragraph::new(Line::from(vec![
            Span::raw(" "),
            value_display,
            if is_selected {
                Span::styled("▌", MaternalTheme::focused())
            } else {
                Span::raw("")
            },
        ]))
        .block(block);

        f.render_widget(content, chunks[i]);
    }
}

fn render_result(f: &mut Frame, area: Rect, assessment: &RiskAssessment) {
    let block = Block::default()
        .title(Span::styled(" Prediction Result ", MaternalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MaternalTheme::border_focused());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Risk label
            Constraint::Min(0),    // Advisory
        ])
        .margin(1)
        .split(inner);

    let risk_style = MaternalTheme::risk_level(assessment.level);
    let label = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Prediction Result: {}", assessment.level.display_label()),
            risk_style.add_modifier(ratatui::style::Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(label, chunks[0]);

    let advisory = Paragraph::new(Line::from(Span::styled(
        assessment.advisory,
        MaternalTheme::text_secondary(),
    )))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    f.render_widget(advisory, chunks[1]);
}

fn render_predict_footer(f: &mut Frame, area: Rect, state: &PredictFormState) {
    let content = if let Some(err) = &state.error_message {
        Line::from(vec![
            Span::styled("! ", MaternalTheme::danger()),
            Span::styled(err.clone(), MaternalTheme::danger()),
        ])
    } else if state.result.is_some() {
        Line::from(vec![
            Span::styled("[Enter] ", MaternalTheme::key_hint()),
            Span::styled("New Prediction ", MaternalTheme::key_desc()),
            Span::styled("[Esc] ", MaternalTheme::key_hint()),
            Span::styled("Back", MaternalTheme::key_desc()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[↑↓] ", MaternalTheme::key_hint()),
            Span::styled("Navigate ", MaternalTheme::key_desc()),
            Span::styled("[Enter] ", MaternalTheme::key_hint()),
            Span::styled("Submit ", MaternalTheme::key_desc()),
            Span::styled("[S] ", MaternalTheme::key_hint()),
            Span::styled("Sample Data ", MaternalTheme::key_desc()),
            Span::styled("[Esc] ", MaternalTheme::key_hint()),
            Span::styled("Back", MaternalTheme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MaternalTheme::border()),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_data_parses() {
        let mut state = PredictFormState::default();
        state.load_sample_data();

        let input = state.to_input().unwrap();
        assert_eq!(input.age, 25.0);
        assert_eq!(input.body_temp_c, 36.8);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_empty_field_is_invalid_number() {
        let state = PredictFormState::default();
        let err = state.to_input().unwrap_err();
        assert!(err.contains("Age"));
    }

    #[test]
    fn test_input_char_rejects_letters() {
        let mut state = PredictFormState::default();
        state.input_char('4');
        state.input_char('x');
        state.input_char('2');
        assert_eq!(state.fields[0].value, "42");
    }

    #[test]
    fn test_field_navigation_wraps() {
        let mut state = PredictFormState::default();
        state.prev_field();
        assert_eq!(state.selected_field, 5);
        state.next_field();
        assert_eq!(state.selected_field, 0);
    }
}
