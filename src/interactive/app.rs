//! Application state for the terminal dashboard

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::chart::primitives::{Easing, Transition};
use crate::dashboard::DashboardOptions;
use crate::error::FetchError;
use crate::leaderboard::{rank_entries, RankedEntry};
use crate::stats::{hour_series, weekday_series, DayCount, HourCount, StatsDocument};

/// Chart data derived once from the document
#[derive(Debug, Clone)]
pub struct Loaded {
    pub document: Arc<StatsDocument>,
    pub days: Vec<DayCount>,
    pub hours: Vec<HourCount>,
    pub leaderboard: Vec<RankedEntry>,
}

pub struct App {
    pub source: String,
    pub options: DashboardOptions,
    /// `None` when loading failed
    pub loaded: Option<Loaded>,
    pub error: Option<FetchError>,
    /// Set by a resize, cleared once the screen has been wiped
    pub needs_clear: bool,
    gauge: Transition,
    started: Instant,
}

impl App {
    pub fn new(
        source: impl Into<String>,
        options: DashboardOptions,
        result: Result<StatsDocument, FetchError>,
    ) -> Self {
        let (loaded, error) = match result {
            Ok(document) => {
                let days = weekday_series(&document.weekday_wr_histogram, options.week_start_offset);
                let hours = hour_series(&document.hour_reply_histogram);
                let leaderboard = rank_entries(&document.cc_histogram, options.leaderboard_size);
                (
                    Some(Loaded {
                        document: Arc::new(document),
                        days,
                        hours,
                        leaderboard,
                    }),
                    None,
                )
            }
            Err(err) => (None, Some(err)),
        };

        App {
            source: source.into(),
            options,
            loaded,
            error,
            needs_clear: false,
            gauge: Transition::new(Duration::from_millis(2000), Easing::CubicInOut),
            started: Instant::now(),
        }
    }

    /// Handle a key press, returning false when the app should exit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => false,
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.restart_animation();
                true
            }
            _ => true,
        }
    }

    pub fn on_resize(&mut self, width: u16, height: u16) {
        tracing::debug!(width, height, "Terminal resized");
        self.needs_clear = true;
    }

    pub fn restart_animation(&mut self) {
        self.started = Instant::now();
    }

    /// Ratio shown by the gauge `elapsed` into the animation
    pub fn gauge_ratio_at(&self, elapsed: Duration) -> f64 {
        match &self.loaded {
            Some(loaded) => {
                loaded.document.ratio_replied_wrs.clamp(0.0, 1.0) * self.gauge.progress(elapsed)
            }
            None => 0.0,
        }
    }

    pub fn gauge_ratio(&self) -> f64 {
        self.gauge_ratio_at(self.started.elapsed())
    }
}
