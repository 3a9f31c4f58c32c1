//! Dashboard view: population overview of the filtered dataset.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::application::{DashboardReport, ReportData};
use crate::domain::{NumericField, RiskLevel};
use crate::tui::styles::MaternalTheme;

/// Render the main dashboard view.
pub fn render_dashboard(f: &mut Frame, area: Rect, report: &DashboardReport, dataset_total: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
        ])
        .split(area);

    render_header(f, chunks[0]);

    match report {
        DashboardReport::NoData => render_no_data(f, chunks[1]),
        DashboardReport::Ready(data) => render_main_content(f, chunks[1], data, dataset_total),
    }
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MaternalTheme::text()),
        Span::styled("Gravida", MaternalTheme::title()),
        Span::styled(" │ ", MaternalTheme::text_muted()),
        Span::styled(
            "Maternal Health Risk Dashboard",
            MaternalTheme::text_secondary(),
        ),
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
        Line::from(""),
        Line::from(Span::styled(
            "Press [F] to widen the filter ranges",
            MaternalTheme::text_secondary(),
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

fn render_main_content(f: &mut Frame, area: Rect, data: &ReportData, dataset_total: usize) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(55), // KPIs + alerts
            Constraint::Percentage(45), // Risk composition + notes
        ])
        .split(area);

    render_kpi_panels(f, chunks[0], data, dataset_total);
    render_risk_panels(f, chunks[1], data);
}

fn render_kpi_panels(f: &mut Frame, area: Rect, data: &ReportData, dataset_total: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(10), // Population averages
            Constraint::Min(6),     // Health interpretation
            Constraint::Length(7),  // Quick actions
        ])
        .margin(1)
        .split(area);

    let snapshot = &data.snapshot;
    let mut avg_lines = vec![Line::from(vec![
        Span::styled("  Rows in view: ", MaternalTheme::text_secondary()),
        Span::styled(
            format!("{} / {}", snapshot.total, dataset_total),
            MaternalTheme::text(),
        ),
    ])];
    for field in NumericField::ALL {
        avg_lines.push(Line::from(vec![
            Span::styled(format!("  Avg {}: ", field.name()), MaternalTheme::text_secondary()),
            Span::styled(
                format!("{:.1}", snapshot.mean_of(field)),
                MaternalTheme::text(),
            ),
        ]));
    }

    let avg_block = Block::default()
        .title(Span::styled(" Population Averages ", MaternalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MaternalTheme::border());
    f.render_widget(Paragraph::new(avg_lines).block(avg_block), chunks[0]);

    // Health interpretation: one warning per crossed threshold, or a single
    // all-clear line.
    let alert_lines: Vec<Line> = if data.alerts.is_empty() {
        vec![Line::from(vec![
            Span::styled("  OK ", MaternalTheme::success()),
            Span::styled(
                crate::application::narrative::ALL_INDICATORS_NORMAL,
                MaternalTheme::text(),
            ),
        ])]
    } else {
        data.alerts
            .iter()
            .map(|alert| {
                Line::from(vec![
                    Span::styled("  ! ", MaternalTheme::warning()),
                    Span::styled(alert.message(), MaternalTheme::text()),
                ])
            })
            .collect()
    };

    let alert_block = Block::default()
        .title(Span::styled(" Health Interpretation ", MaternalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MaternalTheme::border());
    f.render_widget(Paragraph::new(alert_lines).block(alert_block), chunks[1]);

    let actions = vec![
        Line::from(vec![
            Span::styled("[I] ", MaternalTheme::key_hint()),
            Span::styled("Insights", MaternalTheme::key_desc()),
        ]),
        Line::from(vec![
            Span::styled("[D] ", MaternalTheme::key_hint()),
            Span::styled("Filtered Data", MaternalTheme::key_desc()),
        ]),
        Line::from(vec![
            Span::styled("[F] ", MaternalTheme::key_hint()),
            Span::styled("Filters", MaternalTheme::key_desc()),
        ]),
        Line::from(vec![
            Span::styled("[P] ", MaternalTheme::key_hint()),
            Span::styled("Predict Risk", MaternalTheme::key_desc()),
        ]),
        Line::from(vec![
            Span::styled("[Q] ", MaternalTheme::key_hint()),
            Span::styled("Quit", MaternalTheme::key_desc()),
        ]),
    ];

    let actions_block = Block::default()
        .title(Span::styled(" Quick Actions ", MaternalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MaternalTheme::border());
    f.render_widget(Paragraph::new(actions).block(actions_block), chunks[2]);
}

fn render_risk_panels(f: &mut Frame, area: Rect, data: &ReportData) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(11), // Risk composition gauges
            Constraint::Min(7),     // Key findings
            Constraint::Length(5),  // Clinical note
        ])
        .margin(1)
        .split(area);

    render_risk_composition(f, chunks[0], data);
    render_key_findings(f, chunks[1], data);

    let note_block = Block::default()
        .title(Span::styled(" Clinical Note ", MaternalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MaternalTheme::border());
    let note = Paragraph::new(Span::styled(
        crate::application::narrative::CLINICAL_NOTE,
        MaternalTheme::text_muted(),
    ))
    .wrap(ratatui::widgets::Wrap { trim: true })
    .block(note_block);
    f.render_widget(note, chunks[2]);
}

fn render_risk_composition(f: &mut Frame, area: Rect, data: &ReportData) {
    let block = Block::default()
        .title(Span::styled(" Risk Composition ", MaternalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MaternalTheme::border());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(inner);

    // Fixed high -> mid -> low presentation order.
    for (i, level) in RiskLevel::ALL.iter().enumerate() {
        let pct = data.snapshot.risk_pct(*level);
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .title(Span::styled(
                        format!(" {} ", level.display_label()),
                        MaternalTheme::text_secondary(),
                    ))
                    .borders(Borders::ALL)
                    .border_style(MaternalTheme::border()),
            )
            .gauge_style(MaternalTheme::risk_level(*level))
            .percent(pct.clamp(0.0, 100.0) as u16)
            .label(format!("{pct:.1}%"));
        f.render_widget(gauge, chunks[i]);
    }
}

fn render_key_findings(f: &mut Frame, area: Rect, data: &ReportData) {
    let findings = &data.findings;

    let fmt_age = |age: Option<f64>| match age {
        Some(v) => format!("{v:.1} years"),
        None => "n/a".to_string(),
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("  Highest Systolic BP: ", MaternalTheme::text_secondary()),
            Span::styled(
                format!("{} mmHg", findings.highest_systolic),
                MaternalTheme::text(),
            ),
        ]),
        Line::from(vec![
            Span::styled("  Highest Blood Sugar: ", MaternalTheme::text_secondary()),
            Span::styled(
                format!("{} mmol/L", findings.highest_bs),
                MaternalTheme::text(),
            ),
        ]),
        Line::from(vec![
            Span::styled("  Avg age (high risk): ", MaternalTheme::text_secondary()),
            Span::styled(fmt_age(findings.avg_age_high), MaternalTheme::danger()),
        ]),
        Line::from(vec![
            Span::styled("  Avg age (low risk): ", MaternalTheme::text_secondary()),
            Span::styled(fmt_age(findings.avg_age_low), MaternalTheme::success()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Majority category: ", MaternalTheme::text_secondary()),
            Span::styled(
                data.majority.display_label(),
                MaternalTheme::risk_level(data.majority),
            ),
        ]),
    ];

    let block = Block::default()
        .title(Span::styled(" Key Findings ", MaternalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MaternalTheme::border());
    f.render_widget(Paragraph::new(lines).block(block), area);
}
