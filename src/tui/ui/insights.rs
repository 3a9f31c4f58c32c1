//! Insights view: auto-generated narrative over the filtered dataset.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::application::{DashboardReport, ReportData};
use crate::domain::NumericField;
use crate::tui::styles::MaternalTheme;

/// Render the insights view. `focus` selects the field whose value
/// distribution is charted.
pub fn render_insights(f: &mut Frame, area: Rect, report: &DashboardReport, focus: NumericField) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_insights_header(f, chunks[0]);

    match report {
        DashboardReport::NoData => render_no_data(f, chunks[1]),
        DashboardReport::Ready(data) => render_insights_content(f, chunks[1], data, focus),
    }

    render_insights_footer(f, chunks[2]);
}

fn render_insights_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MaternalTheme::text()),
        Span::styled("Insights", MaternalTheme::title()),
        Span::styled(
            " │ Outliers, Distributions, Correlations",
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
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(MaternalTheme::border()),
    );

    f.render_widget(content, area);
}

fn render_insights_content(f: &mut Frame, area: Rect, data: &ReportData, focus: NumericField) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(10), // Outlier chart
            Constraint::Length(8),  // Outlier summary
            Constraint::Min(8),     // Focused field histogram
        ])
        .split(columns[0]);

    render_outlier_chart(f, left[0], data);
    render_outlier_summary(f, left[1], data);
    render_histogram(f, left[2], data, focus);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9), // Distribution shapes
            Constraint::Min(8),    // Correlations + recommendation
        ])
        .split(columns[1]);

    render_distribution_shapes(f, right[0], data);
    render_correlation_summary(f, right[1], data);
}

/// Equal-width bins over [min, max]; the last bin's upper edge is inclusive.
fn histogram(values: &[f64], bins: usize) -> Vec<(String, u64)> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if !(max > min) {
        // Constant column: everything lands in one bin.
        return vec![(format!("{min:.0}"), values.len() as u64)];
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0u64; bins];
    for &v in values {
        let i = (((v - min) / width) as usize).min(bins - 1);
        counts[i] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| (format!("{:.0}", min + width * i as f64), count))
        .collect()
}

fn render_histogram(f: &mut Frame, area: Rect, data: &ReportData, focus: NumericField) {
    let block = Block::default()
        .title(Span::styled(
            format!(" {} Distribution (←→ to change) ", focus.name()),
            MaternalTheme::subtitle(),
        ))
        .borders(Borders::ALL)
        .border_style(MaternalTheme::border());

    let values = data.view.column(focus);
    let bars: Vec<Bar> = histogram(&values, 8)
        .into_iter()
        .map(|(label, count)| {
            Bar::default()
                .label(Line::from(label))
                .value(count)
                .style(MaternalTheme::subtitle())
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .bar_width(5)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars));

    f.render_widget(chart, area);
}

fn render_outlier_chart(f: &mut Frame, area: Rect, data: &ReportData) {
    let block = Block::default()
        .title(Span::styled(" Outlier % per Field ", MaternalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MaternalTheme::border());

    let bars: Vec<Bar> = data
        .outliers
        .ranked
        .iter()
        .map(|(field, pct)| {
            Bar::default()
                .label(Line::from(field.name()))
                .value(pct.round() as u64)
                .style(MaternalTheme::info())
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .bar_width(7)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars));

    f.render_widget(chart, area);
}

fn render_outlier_summary(f: &mut Frame, area: Rect, data: &ReportData) {
    let (most_field, most_pct) = data.outliers.most();
    let (least_field, least_pct) = data.outliers.least();

    let lines = vec![
        Line::from(vec![
            Span::styled("  Most outliers: ", MaternalTheme::text_secondary()),
            Span::styled(
                format!("{most_field} ({most_pct:.1}%)"),
                MaternalTheme::warning(),
            ),
        ]),
        Line::from(vec![
            Span::styled("  Least outliers: ", MaternalTheme::text_secondary()),
            Span::styled(
                format!("{least_field} ({least_pct:.1}%)"),
                MaternalTheme::success(),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  High outlier share means wide variability;",
            MaternalTheme::text_muted(),
        )),
        Line::from(Span::styled(
            "  extreme values can flag conditions worth review.",
            MaternalTheme::text_muted(),
        )),
    ];

    let block = Block::default()
        .title(Span::styled(" Outlier Insight ", MaternalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MaternalTheme::border());
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_distribution_shapes(f: &mut Frame, area: Rect, data: &ReportData) {
    let lines: Vec<Line> = data
        .shapes
        .iter()
        .map(|(field, shape)| {
            Line::from(vec![
                Span::styled(format!("  {}: ", field.name()), MaternalTheme::text_secondary()),
                Span::styled(shape.description(), MaternalTheme::text()),
            ])
        })
        .collect();

    let block = Block::default()
        .title(Span::styled(" Distribution Shapes ", MaternalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MaternalTheme::border());
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_correlation_summary(f: &mut Frame, area: Rect, data: &ReportData) {
    let mut lines = Vec::new();

    if let Some(strongest) = data.correlations.first() {
        lines.push(Line::from(vec![
            Span::styled("  Strongest: ", MaternalTheme::text_secondary()),
            Span::styled(
                format!("{} ↔ {} ({:+.2})", strongest.a, strongest.b, strongest.r),
                MaternalTheme::text(),
            ),
        ]));
    }
    if let Some(weakest) = data.correlations.last() {
        lines.push(Line::from(vec![
            Span::styled("  Weakest: ", MaternalTheme::text_secondary()),
            Span::styled(
                format!("{} ↔ {} ({:+.2})", weakest.a, weakest.b, weakest.r),
                MaternalTheme::text(),
            ),
        ]));
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "  Too little variation to correlate",
            MaternalTheme::text_muted(),
        )));
    }

    lines.push(Line::from(""));
    match data.dominant {
        Some((field, r)) => {
            lines.push(Line::from(vec![
                Span::styled("  Most tied to risk: ", MaternalTheme::text_secondary()),
                Span::styled(format!("{field} ({r:+.2})"), MaternalTheme::focused()),
            ]));
        }
        None => {
            lines.push(Line::from(Span::styled(
                "  No variable stands out against risk",
                MaternalTheme::text_muted(),
            )));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("  {}", data.recommendation),
        MaternalTheme::text_muted(),
    )));

    let block = Block::default()
        .title(Span::styled(" Correlation Insight ", MaternalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MaternalTheme::border());
    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        area,
    );
}

fn render_insights_footer(f: &mut Frame, area: Rect) {
    let content = Line::from(vec![
        Span::styled("[←→] ", MaternalTheme::key_hint()),
        Span::styled("Field ", MaternalTheme::key_desc()),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_bins_cover_all_values() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let bins = histogram(&values, 4);

        assert_eq!(bins.len(), 4);
        let total: u64 = bins.iter().map(|(_, c)| c).sum();
        assert_eq!(total, 8);
        // The maximum lands in the last bin, not past it.
        assert_eq!(bins[3].1, 2);
    }

    #[test]
    fn test_histogram_constant_column_single_bin() {
        let bins = histogram(&[98.0, 98.0, 98.0], 8);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].1, 3);
    }
}
