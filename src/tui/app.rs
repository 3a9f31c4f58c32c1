//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - Report recomputation on every filter change
//! - Synchronous risk prediction

use std::io;
use std::time::Duration;

use anyhow::{anyhow, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::{CsvDataset, TreeModel};
use crate::application::{DashboardReport, DashboardService, PredictionService};
use crate::domain::NumericField;
use crate::ports::DatasetSource;

use super::ui::{
    dashboard::render_dashboard,
    data::{render_data, DataTableState},
    filters::{render_filters, FiltersState},
    insights::render_insights,
    predict::{render_predict, PredictFormState},
    render_disclaimer,
};

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Insights,
    Data,
    Filters,
    Predict,
}

/// Main application state
pub struct App {
    /// Current screen
    screen: Screen,

    /// Whether the app should quit
    should_quit: bool,

    /// Dashboard service over the loaded dataset
    dashboard: DashboardService,

    /// Prediction service over the loaded model
    predictor: PredictionService<TreeModel>,

    /// Filter controls state (owns the active criteria)
    filters_state: FiltersState,

    /// Prediction form state
    predict_state: PredictFormState,

    /// Scroll state for the raw data table
    data_state: DataTableState,

    /// Report for the active criteria, recomputed on every change
    report: DashboardReport,

    /// Field whose distribution the insights screen charts
    insights_focus: NumericField,
}

impl App {
    /// Create a new application instance from the configured artifact paths.
    ///
    /// Both loads are fatal: the dashboard is meaningless without its
    /// dataset, and prediction without its model.
    ///
    /// # Errors
    /// Returns error if the dataset or model cannot be loaded.
    pub fn new() -> Result<Self> {
        let data_path = std::env::var("GRAVIDA_DATA_PATH")
            .unwrap_or_else(|_| "data/maternal.csv".to_string());
        let records = CsvDataset::new(&data_path)
            .load()
            .map_err(|e| anyhow!("Failed to load dataset from {data_path:?}: {e}"))?;

        let model_path = std::env::var("GRAVIDA_MODEL_PATH")
            .unwrap_or_else(|_| "models/risk_tree.json".to_string());
        let model = TreeModel::load(std::path::Path::new(&model_path))
            .map_err(|e| anyhow!("Failed to load model from {model_path:?}: {e}"))?;

        Ok(Self::with_dependencies(
            DashboardService::new(records),
            PredictionService::new(model),
        ))
    }

    /// Create application with injected services (Composition Root pattern).
    #[must_use]
    pub fn with_dependencies(
        dashboard: DashboardService,
        predictor: PredictionService<TreeModel>,
    ) -> Self {
        let filters_state = FiltersState::new(dashboard.default_criteria());
        let report = dashboard.report(&filters_state.criteria);

        Self {
            screen: Screen::Dashboard,
            should_quit: false,
            dashboard,
            predictor,
            filters_state,
            predict_state: PredictFormState::default(),
            data_state: DataTableState::default(),
            report,
            insights_focus: NumericField::Age,
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| {
                let area = f.area();
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(area);

                let content_area = chunks[0];
                let disclaimer_area = chunks[1];

                match self.screen {
                    Screen::Dashboard => render_dashboard(
                        f,
                        content_area,
                        &self.report,
                        self.dashboard.records().len(),
                    ),
                    Screen::Insights => {
                        render_insights(f, content_area, &self.report, self.insights_focus)
                    }
                    Screen::Data => render_data(f, content_area, &self.report, &self.data_state),
                    Screen::Filters => render_filters(
                        f,
                        content_area,
                        &self.filters_state,
                        self.matching_rows(),
                    ),
                    Screen::Predict => render_predict(f, content_area, &self.predict_state),
                }

                render_disclaimer(f, disclaimer_area);
            })?;

            // Handle input (short poll to stay responsive)
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key.code, key.modifiers);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn matching_rows(&self) -> usize {
        match &self.report {
            DashboardReport::NoData => 0,
            DashboardReport::Ready(data) => data.view.len(),
        }
    }

    fn refresh_report(&mut self) {
        self.report = self.dashboard.report(&self.filters_state.criteria);
        self.data_state.clamp(self.matching_rows());
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Dashboard => self.handle_dashboard_key(key),
            Screen::Insights => self.handle_insights_key(key),
            Screen::Data => self.handle_data_key(key),
            Screen::Filters => self.handle_filters_key(key),
            Screen::Predict => self.handle_predict_key(key),
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('i') | KeyCode::Char('I') => {
                self.screen = Screen::Insights;
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                self.data_state.clamp(self.matching_rows());
                self.screen = Screen::Data;
            }
            KeyCode::Char('f') | KeyCode::Char('F') => {
                self.screen = Screen::Filters;
            }
            KeyCode::Char('p') | KeyCode::Char('P') => {
                self.predict_state = PredictFormState::default();
                self.screen = Screen::Predict;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn handle_insights_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.screen = Screen::Dashboard;
            }
            KeyCode::Char('f') | KeyCode::Char('F') => {
                self.screen = Screen::Filters;
            }
            KeyCode::Left => {
                let i = self.insights_focus.index();
                self.insights_focus = NumericField::ALL[(i + 5) % 6];
            }
            KeyCode::Right => {
                let i = self.insights_focus.index();
                self.insights_focus = NumericField::ALL[(i + 1) % 6];
            }
            _ => {}
        }
    }

    fn handle_data_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.screen = Screen::Dashboard;
            }
            KeyCode::Char('f') | KeyCode::Char('F') => {
                self.screen = Screen::Filters;
            }
            KeyCode::Up => {
                self.data_state.prev_row();
            }
            KeyCode::Down => {
                self.data_state.next_row(self.matching_rows());
            }
            KeyCode::PageUp => {
                self.data_state.page_up();
            }
            KeyCode::PageDown => {
                self.data_state.page_down(self.matching_rows());
            }
            _ => {}
        }
    }

    fn handle_filters_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.screen = Screen::Dashboard;
            }
            KeyCode::Up => {
                self.filters_state.prev_row();
            }
            KeyCode::Down | KeyCode::Tab => {
                self.filters_state.next_row();
            }
            KeyCode::Left => {
                if self.filters_state.adjust(-1.0) {
                    self.refresh_report();
                }
            }
            KeyCode::Right => {
                if self.filters_state.adjust(1.0) {
                    self.refresh_report();
                }
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.filters_state.reset();
                self.refresh_report();
            }
            _ => {}
        }
    }

    fn handle_predict_key(&mut self, key: KeyCode) {
        if self.predict_state.result.is_some() {
            match key {
                KeyCode::Enter => {
                    self.predict_state = PredictFormState::default();
                }
                KeyCode::Esc => {
                    self.screen = Screen::Dashboard;
                }
                _ => {}
            }
            return;
        }

        match key {
            KeyCode::Esc => {
                self.screen = Screen::Dashboard;
            }
            KeyCode::Up => {
                self.predict_state.prev_field();
            }
            KeyCode::Down | KeyCode::Tab => {
                self.predict_state.next_field();
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.predict_state.load_sample_data();
            }
            KeyCode::Char(c) => {
                self.predict_state.input_char(c);
            }
            KeyCode::Backspace => {
                self.predict_state.delete_char();
            }
            KeyCode::Delete => {
                self.predict_state.clear_field();
            }
            KeyCode::Enter => {
                self.submit_prediction();
            }
            _ => {}
        }
    }

    fn submit_prediction(&mut self) {
        let input = match self.predict_state.to_input() {
            Ok(input) => input,
            Err(e) => {
                self.predict_state.error_message = Some(e);
                return;
            }
        };

        match self.predictor.predict(&input) {
            Ok(assessment) => {
                self.predict_state.error_message = None;
                self.predict_state.result = Some(assessment);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Prediction rejected");
                self.predict_state.error_message = Some(e.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::tree;
    use crate::application::FieldRange;
    use crate::domain::{PatientRecord, RiskLevel};

    fn dataset() -> Vec<PatientRecord> {
        vec![
            PatientRecord {
                age: 25,
                systolic_bp: 130,
                diastolic_bp: 80,
                bs: 15.0,
                body_temp: 98.0,
                heart_rate: 86,
                risk_level: RiskLevel::High,
            },
            PatientRecord {
                age: 35,
                systolic_bp: 120,
                diastolic_bp: 60,
                bs: 6.1,
                body_temp: 98.0,
                heart_rate: 76,
                risk_level: RiskLevel::Low,
            },
        ]
    }

    fn app() -> App {
        App::with_dependencies(
            DashboardService::new(dataset()),
            PredictionService::new(TreeModel::from_exported(tree::tests::sample_model()).unwrap()),
        )
    }

    #[test]
    fn test_initial_report_spans_dataset() {
        let app = app();
        assert_eq!(app.screen, Screen::Dashboard);
        assert_eq!(app.matching_rows(), 2);
    }

    #[test]
    fn test_filter_adjustment_recomputes_report() {
        let mut app = app();
        app.screen = Screen::Filters;

        // Narrow Age to exclude the younger patient: Age min is row 0.
        app.filters_state.criteria.age = FieldRange::new(30.0, 35.0);
        app.refresh_report();
        assert_eq!(app.matching_rows(), 1);

        app.handle_filters_key(KeyCode::Char('r'));
        assert_eq!(app.matching_rows(), 2);
    }

    #[test]
    fn test_data_screen_scrolls_and_clamps() {
        let mut app = app();
        app.handle_dashboard_key(KeyCode::Char('d'));
        assert_eq!(app.screen, Screen::Data);

        app.handle_data_key(KeyCode::Down);
        assert_eq!(app.data_state.selected, 1);
        // Two rows in view: the highlight stops at the last one.
        app.handle_data_key(KeyCode::Down);
        assert_eq!(app.data_state.selected, 1);

        // Narrowing the filter to one row pulls the highlight back in.
        app.filters_state.criteria.age = FieldRange::new(30.0, 35.0);
        app.refresh_report();
        assert_eq!(app.matching_rows(), 1);
        assert_eq!(app.data_state.selected, 0);

        app.handle_data_key(KeyCode::Esc);
        assert_eq!(app.screen, Screen::Dashboard);
    }

    #[test]
    fn test_prediction_flow() {
        let mut app = app();
        app.screen = Screen::Predict;

        app.predict_state.load_sample_data();
        app.handle_predict_key(KeyCode::Enter);

        let assessment = app.predict_state.result.as_ref().expect("result");
        // Sample data: BS 7.0 <= 7.95, SystolicBP 120 <= 135 -> low risk.
        assert_eq!(assessment.level, RiskLevel::Low);
    }

    #[test]
    fn test_invalid_prediction_shows_error() {
        let mut app = app();
        app.screen = Screen::Predict;

        app.predict_state.load_sample_data();
        app.predict_state.fields[0].value = "150".to_string();
        app.handle_predict_key(KeyCode::Enter);

        assert!(app.predict_state.result.is_none());
        assert!(app
            .predict_state
            .error_message
            .as_ref()
            .is_some_and(|m| m.contains("Age")));
    }
}
