//! Weekday bar chart

use std::time::Duration;

use super::primitives::{fixed_ticks, BandScale, Easing, LinearScale, Scale, Transition};
use super::svg::{num, Element};
use super::{theme, ContainerDimensions, Margins};
use crate::stats::DayCount;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeekdayChart {
    pub margins: Margins,
    /// Share of each band left empty between bars
    pub padding: f64,
    /// Count between horizontal gridlines
    pub grid_step: f64,
    /// Corner radius as a share of bar width
    pub corner_ratio: f64,
    pub transition: Transition,
}

impl Default for WeekdayChart {
    fn default() -> Self {
        WeekdayChart {
            margins: Margins::default(),
            padding: 0.2,
            grid_step: 5.0,
            corner_ratio: 0.15,
            transition: Transition::new(Duration::from_millis(1000), Easing::CubicInOut),
        }
    }
}

impl WeekdayChart {
    pub fn scales(
        &self,
        dims: ContainerDimensions,
        series: &[DayCount],
    ) -> (BandScale, LinearScale) {
        let (width, height) = self.margins.inner(dims);
        let max = series.iter().map(|day| day.count).max().unwrap_or(0) as f64;
        (
            BandScale::new(series.len(), (0.0, width), self.padding),
            LinearScale::new((0.0, max), (height, 0.0)),
        )
    }

    pub fn render(&self, dims: ContainerDimensions, series: &[DayCount]) -> Element {
        let (width, height) = self.margins.inner(dims);
        let (x, y) = self.scales(dims, series);

        let grid = fixed_ticks(0.0, y.domain().1, self.grid_step)
            .into_iter()
            .map(|value| {
                let y_pos = y.apply(value);
                Element::new("g")
                    .attr("class", "tick")
                    .child(
                        Element::new("line")
                            .attr("class", "grid")
                            .attr("x1", 0)
                            .attr("x2", num(width))
                            .attr("y1", num(y_pos))
                            .attr("y2", num(y_pos))
                            .attr("stroke", theme::GRID),
                    )
                    .child(
                        Element::new("text")
                            .attr("x", -8)
                            .attr("y", num(y_pos))
                            .attr("dy", "0.32em")
                            .attr("text-anchor", "end")
                            .attr("fill", theme::TEXT)
                            .text(format!("{}", value as u32)),
                    )
            });

        let labels = series.iter().map(|day| {
            Element::new("text")
                .attr("class", "label")
                .attr("x", num(x.center(day.slot)))
                .attr("y", num(height + 20.0))
                .attr("text-anchor", "middle")
                .attr("fill", theme::TEXT)
                .text(day.label)
        });

        let radius = x.bandwidth() * self.corner_ratio;
        let bars = series.iter().map(|day| {
            let top = y.apply(day.count as f64);
            let bar_height = (height - top).max(0.0);
            let mut bar = Element::new("rect")
                .attr("class", "bar")
                .attr("x", num(x.apply(day.slot)))
                .attr("y", num(top))
                .attr("width", num(x.bandwidth()))
                .attr("height", num(bar_height))
                .attr("rx", num(radius))
                .attr("ry", num(radius))
                .attr("fill", theme::PALETTE_2);
            if bar_height > 0.0 {
                bar.push(self.transition.animate("height", 0.0, bar_height));
                bar.push(self.transition.animate("y", height, top));
            }
            bar.child(Element::new("title").text(format!("{}: {}", day.label, day.count)))
        });

        Element::svg(dims.width, dims.height)
            .attr("class", "chart weekday")
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
                    .child(Element::new("g").attr("class", "grid").children(grid))
                    .child(Element::new("g").attr("class", "x-axis").children(labels))
                    .child(Element::new("g").attr("class", "bars").children(bars)),
            )
    }
}
