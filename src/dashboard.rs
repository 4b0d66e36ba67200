//! Fetch, format and draw: the controller tying the client, the renderers
//! and the page together.

use std::sync::Arc;

use crate::chart::{ChartKind, ContainerDimensions, DonutChart, Element, HourChart, WeekdayChart};
use crate::client::{StatsClient, StatsSource};
use crate::config::{
    Config, DEFAULT_FAILURE_MESSAGE, DEFAULT_LEADERBOARD_SIZE, DEFAULT_WEEK_START_OFFSET,
};
use crate::error::{FetchError, RenderError};
use crate::format::{format_count, format_delay, format_percentage};
use crate::leaderboard::{rank_entries, render_rows};
use crate::page::{MountPoint, Page, Viewport};
use crate::stats::{hour_series, weekday_series, StatsDocument};

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardOptions {
    pub week_start_offset: u32,
    pub leaderboard_size: usize,
    pub failure_message: String,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        DashboardOptions {
            week_start_offset: DEFAULT_WEEK_START_OFFSET,
            leaderboard_size: DEFAULT_LEADERBOARD_SIZE,
            failure_message: DEFAULT_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl From<&Config> for DashboardOptions {
    fn from(config: &Config) -> Self {
        DashboardOptions {
            week_start_offset: config.week_start_offset,
            leaderboard_size: config.leaderboard_size,
            failure_message: config.failure_message.clone(),
        }
    }
}

/// What the last load produced
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    document: Option<Arc<StatsDocument>>,
    failure: Option<FetchError>,
}

impl DashboardState {
    pub fn document(&self) -> Option<&Arc<StatsDocument>> {
        self.document.as_ref()
    }

    pub fn failure(&self) -> Option<&FetchError> {
        self.failure.as_ref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    options: DashboardOptions,
    donut: DonutChart,
    weekday: WeekdayChart,
    hours: HourChart,
    state: DashboardState,
}

impl Dashboard {
    pub fn new(options: DashboardOptions) -> Self {
        Dashboard {
            options,
            ..Dashboard::default()
        }
    }

    pub fn options(&self) -> &DashboardOptions {
        &self.options
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Fetch once and fill the page with the result
    pub async fn load(
        &mut self,
        page: &mut Page,
        client: &StatsClient,
        source: &StatsSource,
    ) -> Result<(), FetchError> {
        let result = client.load(source).await;
        self.apply(page, result)
    }

    /// Fill the page from a fetch result. A failure is shown on the page and
    /// returned to the caller.
    pub fn apply(
        &mut self,
        page: &mut Page,
        result: Result<StatsDocument, FetchError>,
    ) -> Result<(), FetchError> {
        match result {
            Ok(document) => {
                self.state = DashboardState {
                    document: Some(Arc::new(document)),
                    failure: None,
                };
                self.show_document(page);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "Showing failure message");
                self.state = DashboardState {
                    document: None,
                    failure: Some(err.clone()),
                };
                self.show_failure(page);
                Err(err)
            }
        }
    }

    fn show_document(&self, page: &mut Page) {
        let Some(document) = self.state.document.clone() else {
            return;
        };

        page.container_mut(MountPoint::PercentageText)
            .set_text(format_percentage(document.ratio_replied_wrs));
        page.container_mut(MountPoint::WrittenCount)
            .set_text(format_count(document.num_wrs));
        page.container_mut(MountPoint::SkippedCount)
            .set_text(format_count(document.num_skipped_wrs));
        page.container_mut(MountPoint::DelayText)
            .set_text(format_delay(document.avg_reply_delay));

        self.render_charts(page);

        let ranked = rank_entries(&document.cc_histogram, self.options.leaderboard_size);
        let leaderboard = page.container_mut(MountPoint::Leaderboard);
        leaderboard.clear();
        leaderboard.append_items(render_rows(&ranked));
    }

    fn show_failure(&self, page: &mut Page) {
        for mount in MountPoint::ALL {
            let container = page.container_mut(mount);
            if mount.is_text() {
                container.set_text(self.options.failure_message.clone());
            } else {
                container.clear();
            }
        }
    }

    /// Redraw every chart with the last document at the page's current sizes
    pub fn render_charts(&self, page: &mut Page) {
        if self.state.document.is_none() {
            tracing::debug!("No statistics loaded, skipping chart render");
            return;
        }

        let charts = [
            (ChartKind::Donut, MountPoint::ProgressCircle),
            (ChartKind::Weekday, MountPoint::WeekdayChart),
            (ChartKind::Hours, MountPoint::HourChart),
        ];
        for (kind, mount) in charts {
            let dims = page.dimensions(mount);
            match self.render_chart(kind, dims) {
                Ok(svg) => page.container_mut(mount).replace_svg(svg),
                Err(err) => tracing::error!(chart = %kind, error = %err, "Chart render failed"),
            }
        }
    }

    /// Apply a new viewport and redraw the charts
    pub fn resize(&self, page: &mut Page, viewport: Viewport) {
        tracing::debug!(width = viewport.width, height = viewport.height, "Viewport resized");
        page.set_viewport(viewport);
        self.render_charts(page);
    }

    /// One chart for the loaded document at the given size
    pub fn render_chart(
        &self,
        kind: ChartKind,
        dims: ContainerDimensions,
    ) -> Result<Element, RenderError> {
        let document = self.state.document.as_ref().ok_or(RenderError::NothingLoaded)?;
        let svg = match kind {
            ChartKind::Donut => self.donut.render(dims, document.ratio_replied_wrs),
            ChartKind::Weekday => self.weekday.render(
                dims,
                &weekday_series(&document.weekday_wr_histogram, self.options.week_start_offset),
            ),
            ChartKind::Hours => self
                .hours
                .render(dims, &hour_series(&document.hour_reply_histogram)),
        };
        Ok(svg)
    }
}
