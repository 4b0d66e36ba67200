//! Plain-text report of the statistics for the `summary` command

use std::fmt;
use unicode_width::UnicodeWidthStr;

use crate::format::{format_count, format_delay, format_hour, format_percentage};
use crate::leaderboard::{rank_entries, Badge};
use crate::stats::{hour_series, weekday_series, StatsDocument};

const BAR_WIDTH: usize = 30;

/// Pad `text` with spaces to `width` terminal columns
pub fn pad_to_width(text: &str, width: usize) -> String {
    let current = UnicodeWidthStr::width(text);
    if current >= width {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(width - current))
    }
}

fn bar(count: u32, max: u32) -> String {
    if max == 0 {
        return String::new();
    }
    let len = (count as f64 / max as f64 * BAR_WIDTH as f64).round() as usize;
    "█".repeat(len)
}

/// Text report over one document; render it with `to_string` or `{}`
pub struct Summary<'a> {
    pub document: &'a StatsDocument,
    pub week_start_offset: u32,
    /// Leaderboard rows to show
    pub top: usize,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let document = self.document;

        writeln!(f, "=== Weekly report statistics ===")?;
        writeln!(
            f,
            "Replied:        {}",
            format_percentage(document.ratio_replied_wrs)
        )?;
        writeln!(f, "Written:        {}", format_count(document.num_wrs))?;
        writeln!(f, "Skipped:        {}", format_count(document.num_skipped_wrs))?;
        writeln!(
            f,
            "Reply delay:    {}",
            format_delay(document.avg_reply_delay)
        )?;

        let days = weekday_series(&document.weekday_wr_histogram, self.week_start_offset);
        let max_day = days.iter().map(|day| day.count).max().unwrap_or(0);
        writeln!(f, "\n=== WRs per weekday ===")?;
        for day in &days {
            writeln!(
                f,
                "{} {:>3} {}",
                day.label,
                day.count,
                bar(day.count, max_day)
            )?;
        }

        let hours = hour_series(&document.hour_reply_histogram);
        let max_hour = hours.iter().map(|hour| hour.count).max().unwrap_or(0);
        writeln!(f, "\n=== Replies per hour ===")?;
        for hour in hours.iter().filter(|hour| hour.count > 0) {
            writeln!(
                f,
                "{:>5} {:>3} {}",
                format_hour(hour.hour),
                hour.count,
                bar(hour.count, max_hour)
            )?;
        }

        let ranked = rank_entries(&document.cc_histogram, self.top);
        writeln!(f, "\n=== Most in CC ===")?;
        if ranked.is_empty() {
            writeln!(f, "Nobody in CC")?;
        }
        let name_width = ranked
            .iter()
            .map(|entry| UnicodeWidthStr::width(entry.username.as_str()) + 1)
            .max()
            .unwrap_or(0);
        for entry in &ranked {
            let badge = Badge::for_rank(entry.rank).symbol(entry.rank);
            writeln!(
                f,
                "{} {} {}x",
                pad_to_width(&badge, 4),
                pad_to_width(&format!("@{}", entry.username), name_width),
                entry.count
            )?;
        }
        Ok(())
    }
}

pub fn render_summary(document: &StatsDocument, week_start_offset: u32, top: usize) -> String {
    Summary {
        document,
        week_start_offset,
        top,
    }
    .to_string()
}
