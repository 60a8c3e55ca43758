use anyhow::Result;
use ratatui::widgets::TableState;
use timepivot_core::{ReportQuery, UserReport};

/// Browser state: the current query, its report and the table cursor.
pub struct ReportApp<F>
where
    F: Fn(&ReportQuery) -> Result<UserReport>,
{
    load: F,
    pub query: ReportQuery,
    pub report: Option<UserReport>,
    pub error: Option<String>,
    pub state: TableState,
    /// First date column shown.
    pub day_offset: usize,
}

impl<F> ReportApp<F>
where
    F: Fn(&ReportQuery) -> Result<UserReport>,
{
    pub fn new(load: F, query: ReportQuery) -> Self {
        let mut app = ReportApp {
            load,
            query,
            report: None,
            error: None,
            state: TableState::default(),
            day_offset: 0,
        };
        app.reload();
        app
    }

    pub fn reload(&mut self) {
        match (self.load)(&self.query) {
            Ok(report) => {
                self.state.select(if report.rows.is_empty() { None } else { Some(0) });
                self.report = Some(report);
                self.error = None;
            }
            Err(e) => {
                self.state.select(None);
                self.report = None;
                self.error = Some(e.to_string());
            }
        }
        self.day_offset = self.day_offset.min(self.day_count().saturating_sub(1));
    }

    fn row_count(&self) -> usize {
        self.report.as_ref().map_or(0, |r| r.rows.len())
    }

    fn day_count(&self) -> usize {
        self.query.period.num_days() as usize
    }

    pub fn next(&mut self) {
        let len = self.row_count();
        if len == 0 { return; }

        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.row_count();
        if len == 0 { return; }

        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    pub fn next_period(&mut self) {
        if let Ok(period) = self.query.period.next() {
            self.query.period = period;
            self.day_offset = 0;
            self.reload();
        }
    }

    pub fn previous_period(&mut self) {
        if let Ok(period) = self.query.period.previous() {
            self.query.period = period;
            self.day_offset = 0;
            self.reload();
        }
    }

    pub fn scroll_days_right(&mut self) {
        if self.day_offset + 1 < self.day_count() {
            self.day_offset += 1;
        }
    }

    pub fn scroll_days_left(&mut self) {
        self.day_offset = self.day_offset.saturating_sub(1);
    }
}
