//! Time-of-day area chart with a left-to-right reveal

use std::time::Duration;

use super::primitives::{
    cardinal_area, cardinal_line, fixed_ticks, Easing, LinearScale, Scale, Transition,
};
use super::svg::{num, Element};
use super::{theme, ContainerDimensions, Margins};
use crate::format::format_hour;
use crate::stats::{HourCount, HOURS_PER_DAY};

const CLIP_ID: &str = "hour-reveal";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourChart {
    pub margins: Margins,
    /// Hours between x-axis ticks
    pub tick_step: u32,
    /// Spline tension, 0 is the smoothest
    pub tension: f64,
    pub transition: Transition,
}

impl Default for HourChart {
    fn default() -> Self {
        HourChart {
            margins: Margins::default(),
            tick_step: 3,
            tension: 0.0,
            transition: Transition::new(Duration::from_millis(1500), Easing::CubicInOut),
        }
    }
}

/// Points over [0, 24]; the day wraps, so hour 24 repeats hour 0
pub fn closed_points(series: &[HourCount]) -> Vec<(f64, f64)> {
    let mut points: Vec<(f64, f64)> = series
        .iter()
        .map(|point| (point.hour as f64, point.count as f64))
        .collect();
    if let Some(midnight) = series.iter().find(|point| point.hour == 0) {
        points.push((HOURS_PER_DAY as f64, midnight.count as f64));
    }
    points
}

impl HourChart {
    pub fn scales(
        &self,
        dims: ContainerDimensions,
        series: &[HourCount],
    ) -> (LinearScale, LinearScale) {
        let (width, height) = self.margins.inner(dims);
        let max = series.iter().map(|point| point.count).max().unwrap_or(0) as f64;
        (
            LinearScale::new((0.0, HOURS_PER_DAY as f64), (0.0, width)),
            LinearScale::new((0.0, max), (height, 0.0)),
        )
    }

    pub fn ticks(&self) -> Vec<u32> {
        fixed_ticks(0.0, HOURS_PER_DAY as f64, self.tick_step.max(1) as f64)
            .into_iter()
            .map(|tick| tick as u32)
            .collect()
    }

    pub fn render(&self, dims: ContainerDimensions, series: &[HourCount]) -> Element {
        let (width, height) = self.margins.inner(dims);
        let (x, y) = self.scales(dims, series);
        let points: Vec<(f64, f64)> = closed_points(series)
            .into_iter()
            .map(|(hour, count)| (x.apply(hour), y.apply(count)))
            .collect();

        let ticks = self.ticks().into_iter().map(|hour| {
            let x_pos = num(x.apply(hour as f64));
            Element::new("g")
                .attr("class", "tick")
                .child(
                    Element::new("line")
                        .attr("class", "grid")
                        .attr("x1", &x_pos)
                        .attr("x2", &x_pos)
                        .attr("y1", 0)
                        .attr("y2", num(height))
                        .attr("stroke", theme::GRID),
                )
                .child(
                    Element::new("text")
                        .attr("x", &x_pos)
                        .attr("y", num(height + 20.0))
                        .attr("text-anchor", "middle")
                        .attr("fill", theme::TEXT)
                        .text(format_hour(hour)),
                )
        });

        let reveal = Element::new("clipPath").attr("id", CLIP_ID).child(
            Element::new("rect")
                .attr("x", 0)
                .attr("y", 0)
                .attr("width", num(width))
                .attr("height", num(height))
                .child(self.transition.animate("width", 0.0, width)),
        );

        let clip = format!("url(#{})", CLIP_ID);
        let area = Element::new("path")
            .attr("class", "area")
            .attr("d", cardinal_area(&points, height, self.tension))
            .attr("fill", theme::PALETTE_1)
            .attr("fill-opacity", 0.35)
            .attr("clip-path", &clip);
        let line = Element::new("path")
            .attr("class", "line")
            .attr("d", cardinal_line(&points, self.tension))
            .attr("fill", "none")
            .attr("stroke", theme::PALETTE_1)
            .attr("stroke-width", 2)
            .attr("clip-path", &clip);

        Element::svg(dims.width, dims.height)
            .attr("class", "chart hours")
            .child(Element::new("defs").child(reveal))
            .child(
                Element::new("g")
                    .attr(
                        "transform",
                        format!(
                            "translate({},{})",
                            num(self.margins.left),
                            num(self.margins.top)
                        ),
                    )
                    .child(Element::new("g").attr("class", "x-axis").children(ticks))
                    .child(area)
                    .child(line),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{hour_series, HourHistogram};

    fn series() -> Vec<HourCount> {
        let hist: HourHistogram = [(0, 1), (9, 2), (15, 5), (16, 6), (21, 1)]
            .into_iter()
            .collect();
        hour_series(&hist)
    }

    fn dims() -> ContainerDimensions {
        ContainerDimensions::new(600.0, 250.0)
    }

    #[test]
    fn test_closed_points_wrap_midnight() {
        let points = closed_points(&series());
        assert_eq!(points.len(), 25);
        assert_eq!(points[0], (0.0, 1.0));
        assert_eq!(points[24], (24.0, 1.0));
    }

    #[test]
    fn test_ticks_every_three_hours() {
        let chart = HourChart::default();
        assert_eq!(chart.ticks(), vec![0, 3, 6, 9, 12, 15, 18, 21, 24]);

        let svg = chart.render(dims(), &series());
        let labels: Vec<String> = svg
            .find_all("text")
            .into_iter()
            .map(|t| t.text_content())
            .collect();
        assert_eq!(labels.first().map(String::as_str), Some("0:00"));
        assert_eq!(labels.get(7).map(String::as_str), Some("21:00"));
        // 24 wraps to midnight
        assert_eq!(labels.last().map(String::as_str), Some("0:00"));
        assert_eq!(svg.find_all("line").len(), 9);
    }

    #[test]
    fn test_area_and_line_are_clipped() {
        let svg = HourChart::default().render(dims(), &series());
        let paths = svg.find_all("path");
        assert_eq!(paths.len(), 2);
        assert!(paths
            .iter()
            .all(|p| p.get_attr("clip-path") == Some("url(#hour-reveal)")));
        assert!(paths[0].get_attr("d").unwrap().ends_with('Z'));
    }

    #[test]
    fn test_reveal_grows_to_full_width() {
        let chart = HourChart::default();
        let svg = chart.render(dims(), &series());
        let (width, _) = chart.margins.inner(dims());
        let clip = svg.find_by_id(CLIP_ID).unwrap();
        let animate = clip.find_all("animate");
        assert_eq!(animate.len(), 1);
        assert_eq!(animate[0].get_attr("attributeName"), Some("width"));
        assert_eq!(animate[0].get_attr("from"), Some("0"));
        assert_eq!(animate[0].get_attr("to"), Some(num(width).as_str()));
        assert_eq!(animate[0].get_attr("dur"), Some("1500ms"));
    }

    #[test]
    fn test_peak_touches_top() {
        let chart = HourChart::default();
        let (x, y) = chart.scales(dims(), &series());
        assert_eq!(y.apply(6.0), 0.0);
        assert_eq!(x.apply(24.0), 540.0);
    }

    #[test]
    fn test_empty_histogram_is_flat() {
        let flat = hour_series(&HourHistogram::new());
        let svg = HourChart::default().render(dims(), &flat);
        let line = svg.find_all("path")[1].get_attr("d").unwrap().to_string();
        assert!(line.starts_with("M0,200"));
        assert!(!line.contains("NaN"));
    }
}
