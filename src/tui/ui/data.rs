//! Data view: the raw filtered rows behind the dashboard aggregates.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::application::DashboardReport;
use crate::domain::{NumericField, PatientRecord};
use crate::tui::styles::MaternalTheme;

/// Rows jumped per PageUp/PageDown press.
const PAGE: usize = 10;

/// Scroll state for the data table.
#[derive(Debug, Default)]
pub struct DataTableState {
    /// Highlighted row index into the filtered view.
    pub selected: usize,
}

impl DataTableState {
    pub fn next_row(&mut self, total: usize) {
        if self.selected + 1 < total {
            self.selected += 1;
        }
    }

    pub fn prev_row(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn page_down(&mut self, total: usize) {
        if total > 0 {
            self.selected = (self.selected + PAGE).min(total - 1);
        }
    }

    pub fn page_up(&mut self) {
        self.selected = self.selected.saturating_sub(PAGE);
    }

    /// Keep the highlight inside the view after the criteria change.
    pub fn clamp(&mut self, total: usize) {
        if total == 0 {
            self.selected = 0;
        } else if self.selected >= total {
            self.selected = total - 1;
        }
    }
}

/// Render the data view: one table row per filtered record.
pub fn render_data(f: &mut Frame, area: Rect, report: &DashboardReport, state: &DataTableState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Table
            Constraint::Length(3), // Footer
        ])
        .split(area);

    let rows: &[PatientRecord] = match report {
        DashboardReport::NoData => &[],
        DashboardReport::Ready(data) => data.view.rows(),
    };

    render_data_header(f, chunks[0], rows.len());

    if rows.is_empty() {
        render_no_data(f, chunks[1]);
    } else {
        render_table(f, chunks[1], rows, state);
    }

    render_data_footer(f, chunks[2]);
}

fn render_data_header(f: &mut Frame, area: Rect, total: usize) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MaternalTheme::text()),
        Span::styled("Filtered Data", MaternalTheme::title()),
        Span::styled(" │ ", MaternalTheme::text_muted()),
        Span::styled(format!("{total} rows"), MaternalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MaternalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_no_data(f: &mut Frame, area: Rect) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "No data matches selected filters",
            MaternalTheme::warning(),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(MaternalTheme::border()),
    );

    f.render_widget(content, area);
}

fn render_table(f: &mut Frame, area: Rect, rows: &[PatientRecord], state: &DataTableState) {
    let header = Row::new(
        NumericField::ALL
            .iter()
            .map(|field| Cell::from(Span::styled(field.name(), MaternalTheme::subtitle())))
            .chain(std::iter::once(Cell::from(Span::styled(
                "RiskLevel",
                MaternalTheme::subtitle(),
            )))),
    )
    .height(1);

    let body = rows.iter().map(|record| {
        Row::new(vec![
            Cell::from(record.age.to_string()),
            Cell::from(record.systolic_bp.to_string()),
            Cell::from(record.diastolic_bp.to_string()),
            Cell::from(format!("{:.1}", record.bs)),
            Cell::from(format!("{:.1}", record.body_temp)),
            Cell::from(record.heart_rate.to_string()),
            Cell::from(Span::styled(
                record.risk_level.label(),
                MaternalTheme::risk_level(record.risk_level),
            )),
        ])
    });

    let widths = [
        Constraint::Length(6),  // Age
        Constraint::Length(11), // SystolicBP
        Constraint::Length(12), // DiastolicBP
        Constraint::Length(7),  // BS
        Constraint::Length(9),  // BodyTemp
        Constraint::Length(10), // HeartRate
        Constraint::Min(10),    // RiskLevel
    ];

    let table = Table::new(body, widths)
        .header(header)
        .row_highlight_style(MaternalTheme::selected())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(MaternalTheme::border()),
        );

    let mut table_state = TableState::default().with_selected(Some(state.selected));
    f.render_stateful_widget(table, area, &mut table_state);
}

fn render_data_footer(f: &mut Frame, area: Rect) {
    let content = Line::from(vec![
        Span::styled("[↑↓] ", MaternalTheme::key_hint()),
        Span::styled("Scroll ", MaternalTheme::key_desc()),
        Span::styled("[PgUp/PgDn] ", MaternalTheme::key_hint()),
        Span::styled("Page ", MaternalTheme::key_desc()),
        Span::styled("[F] ", MaternalTheme::key_hint()),
        Span::styled("Filters ", MaternalTheme::key_desc()),
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
