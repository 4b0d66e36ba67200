//! Interactive terminal dashboard
//!
//! Draws the same statistics as the HTML page with ratatui widgets and
//! redraws on every terminal resize.

pub mod app;
pub mod events;
pub mod ui;

pub use app::App;
pub use events::{AppEvent, EventHandler};

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::client::{StatsClient, StatsSource};
use crate::config::Config;
use crate::dashboard::DashboardOptions;

/// Load the statistics and run the terminal dashboard until the user quits
pub async fn run_interactive(config: &Config, source: &StatsSource) -> Result<()> {
    let client = StatsClient::from_config(config);
    let result = client.load(source).await;
    let mut app = App::new(source.to_string(), DashboardOptions::from(config), result);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!(error = %err, "Terminal dashboard failed");
    }
    res
}

/// Main application loop
fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let event_handler = EventHandler::new();

    loop {
        if app.needs_clear {
            terminal.clear()?;
            app.needs_clear = false;
        }
        terminal.draw(|f| ui::draw(f, app))?;

        match event_handler.next()? {
            AppEvent::Key(key) => {
                if !app.handle_key(key) {
                    break;
                }
            }
            AppEvent::Resize(width, height) => app.on_resize(width, height),
            AppEvent::Tick => {}
        }
    }

    Ok(())
}
