pub mod app;
pub mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use timepivot_core::{ReportQuery, UserReport};

use crate::tui::app::ReportApp;

pub fn run<F>(load: F, query: ReportQuery) -> Result<()>
where
    F: Fn(&ReportQuery) -> Result<UserReport>,
{
    let mut app = ReportApp::new(load, query);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B, F>(terminal: &mut Terminal<B>, app: &mut ReportApp<F>) -> Result<()>
where
    B: Backend,
    F: Fn(&ReportQuery) -> Result<UserReport>,
{
    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .map_err(|e| io::Error::other(e.to_string()))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Left => app.previous_period(),
                    KeyCode::Right => app.next_period(),
                    KeyCode::Char('h') => app.scroll_days_left(),
                    KeyCode::Char('l') => app.scroll_days_right(),
                    KeyCode::Down | KeyCode::Char('j') => app.next(),
                    KeyCode::Up | KeyCode::Char('k') => app.previous(),
                    KeyCode::Char('r') => app.reload(),
                    _ => {}
                }
            }
        }
    }
}
