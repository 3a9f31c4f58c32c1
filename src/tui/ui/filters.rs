//! Filter controls view: range sliders for the four filterable fields.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::application::{FieldRange, FilterCriteria};
use crate::tui::styles::MaternalTheme;

/// The four fields exposed as range controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Age,
    BS,
    SystolicBP,
    DiastolicBP,
}

impl FilterField {
    pub const ALL: [FilterField; 4] = [
        FilterField::Age,
        FilterField::BS,
        FilterField::SystolicBP,
        FilterField::DiastolicBP,
    ];

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::BS => "Blood Sugar",
            Self::SystolicBP => "Systolic BP",
            Self::DiastolicBP => "Diastolic BP",
        }
    }

    /// Increment applied per left/right key press.
    #[must_use]
    pub fn step(&self) -> f64 {
        match self {
            Self::BS => 0.1,
            _ => 1.0,
        }
    }
}

/// Filter screen state: the working criteria plus the dataset extremes the
/// endpoints are clamped to.
pub struct FiltersState {
    /// Selected row, 0..8: two endpoints (min, max) per field.
    pub selected: usize,
    pub criteria: FilterCriteria,
    bounds: FilterCriteria,
}

impl FiltersState {
    /// Start with every range wide open at the dataset extremes.
    #[must_use]
    pub fn new(bounds: FilterCriteria) -> Self {
        Self {
            selected: 0,
            criteria: bounds,
            bounds,
        }
    }

    pub fn next_row(&mut self) {
        self.selected = (self.selected + 1) % 8;
    }

    pub fn prev_row(&mut self) {
        self.selected = if self.selected == 0 { 7 } else { self.selected - 1 };
    }

    fn selected_field(&self) -> FilterField {
        FilterField::ALL[self.selected / 2]
    }

    fn is_max_endpoint(&self) -> bool {
        self.selected % 2 == 1
    }

    fn range_of(criteria: &FilterCriteria, field: FilterField) -> FieldRange {
        match field {
            FilterField::Age => criteria.age,
            FilterField::BS => criteria.bs,
            FilterField::SystolicBP => criteria.systolic_bp,
            FilterField::DiastolicBP => criteria.diastolic_bp,
        }
    }

    fn set_range(&mut self, field: FilterField, range: FieldRange) {
        match field {
            FilterField::Age => self.criteria.age = range,
            FilterField::BS => self.criteria.bs = range,
            FilterField::SystolicBP => self.criteria.systolic_bp = range,
            FilterField::DiastolicBP => self.criteria.diastolic_bp = range,
        }
    }

    /// Move the selected endpoint by `steps` field increments, clamped to
    /// the dataset extremes and to the opposite endpoint. Returns whether
    /// the criteria actually changed.
    pub fn adjust(&mut self, steps: f64) -> bool {
        let field = self.selected_field();
        let delta = steps * field.step();
        let current = Self::range_of(&self.criteria, field);
        let bound = Self::range_of(&self.bounds, field);

        let updated = if self.is_max_endpoint() {
            let max = (current.max + delta).clamp(current.min, bound.max);
            FieldRange::new(current.min, max)
        } else {
            let min = (current.min + delta).clamp(bound.min, current.max);
            FieldRange::new(min, current.max)
        };

        if updated == current {
            return false;
        }
        self.set_range(field, updated);
        true
    }

    /// Restore every range to the dataset extremes.
    pub fn reset(&mut self) {
        self.criteria = self.bounds;
    }
}

/// Render the filter controls.
pub fn render_filters(f: &mut Frame, area: Rect, state: &FiltersState, matching_rows: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Controls
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_filters_header(f, chunks[0], matching_rows);
    render_filter_rows(f, chunks[1], state);
    render_filters_footer(f, chunks[2]);
}

fn render_filters_header(f: &mut Frame, area: Rect, matching_rows: usize) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MaternalTheme::text()),
        Span::styled("Filters", MaternalTheme::title()),
        Span::styled(" │ ", MaternalTheme::text_muted()),
        Span::styled(
            format!("{matching_rows} rows match"),
            if matching_rows == 0 {
                MaternalTheme::warning()
            } else {
                MaternalTheme::text_secondary()
            },
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MaternalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_filter_rows(f: &mut Frame, area: Rect, state: &FiltersState) {
    let constraints: Vec<Constraint> = FilterField::ALL
        .iter()
        .map(|_| Constraint::Length(4))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(area);

    for (i, field) in FilterField::ALL.iter().enumerate() {
        let range = FiltersState::range_of(&state.criteria, *field);
        let min_selected = state.selected == i * 2;
        let max_selected = state.selected == i * 2 + 1;

        let endpoint = |label: &'static str, value: f64, selected: bool| {
            let style = if selected {
                MaternalTheme::selected()
            } else {
                MaternalTheme::text()
            };
            vec![
                Span::styled(format!("{label}: "), MaternalTheme::text_secondary()),
                Span::styled(format!(" {value:.1} "), style),
            ]
        };

        let mut spans = vec![Span::raw("  ")];
        spans.extend(endpoint("min", range.min, min_selected));
        spans.push(Span::styled("   ", MaternalTheme::text()));
        spans.extend(endpoint("max", range.max, max_selected));

        let border_style = if min_selected || max_selected {
            MaternalTheme::border_focused()
        } else {
            MaternalTheme::border()
        };

        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", field.name()),
                MaternalTheme::text_secondary(),
            ))
            .borders(Borders::ALL)
            .border_style(border_style);

        f.render_widget(Paragraph::new(Line::from(spans)).block(block), chunks[i]);
    }
}

fn render_filters_footer(f: &mut Frame, area: Rect) {
    let content = Line::from(vec![
        Span::styled("[↑↓] ", MaternalTheme::key_hint()),
        Span::styled("Select ", MaternalTheme::key_desc()),
        Span::styled("[←→] ", MaternalTheme::key_hint()),
        Span::styled("Adjust ", MaternalTheme::key_desc()),
        Span::styled("[R] ", MaternalTheme::key_hint()),
        Span::styled("Reset ", MaternalTheme::key_desc()),
        Span::styled("[Esc] ", MaternalTheme::key_hint()),
        Span::styled("Back", MaternalTheme::key_desc()),
    ]);

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MaternalTheme::border()),
    );

    f.render_widget(footer, area);
}
