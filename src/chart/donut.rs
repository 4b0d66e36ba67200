//! Progress ring showing the share of replied WRs

use std::f64::consts::TAU;
use std::time::Duration;

use super::primitives::{Arc, Easing, Transition};
use super::svg::{num, Element};
use super::{theme, ContainerDimensions};

const GRADIENT_ID: &str = "donut-gradient";
const SHADOW_ID: &str = "donut-shadow";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DonutChart {
    /// Space between the ring and the container edge
    pub margin: f64,
    pub thickness: f64,
    pub transition: Transition,
    /// Keyframes of the sweep animation
    pub frames: usize,
}

impl Default for DonutChart {
    fn default() -> Self {
        DonutChart {
            margin: 20.0,
            thickness: 25.0,
            transition: Transition::new(Duration::from_millis(2000), Easing::CubicInOut),
            frames: 60,
        }
    }
}

/// Resolved ring geometry for one render
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DonutGeometry {
    pub center: (f64, f64),
    pub arc: Arc,
}

impl DonutGeometry {
    pub fn sweep_degrees(&self) -> f64 {
        self.arc.sweep().to_degrees()
    }

    /// The arc drawn partway through the animation
    pub fn at_progress(&self, progress: f64) -> Arc {
        Arc {
            end_angle: self.arc.start_angle + self.arc.sweep() * progress,
            ..self.arc
        }
    }
}

impl DonutChart {
    pub fn geometry(&self, dims: ContainerDimensions, ratio: f64) -> DonutGeometry {
        let ratio = if ratio.is_finite() { ratio.clamp(0.0, 1.0) } else { 0.0 };
        let outer = (dims.width.min(dims.height) / 2.0 - self.margin).max(0.0);
        let inner = (outer - self.thickness).max(0.0);
        DonutGeometry {
            center: (dims.width / 2.0, dims.height / 2.0),
            arc: Arc {
                inner_radius: inner,
                outer_radius: outer,
                start_angle: 0.0,
                end_angle: ratio * TAU,
            },
        }
    }

    pub fn render(&self, dims: ContainerDimensions, ratio: f64) -> Element {
        let geometry = self.geometry(dims, ratio);
        let keyframes: Vec<String> = self
            .transition
            .frames(self.frames)
            .into_iter()
            .map(|progress| geometry.at_progress(progress).path())
            .collect();

        let mut path = Element::new("path")
            .attr("class", "donut-arc")
            .attr("d", geometry.arc.path())
            .attr("fill", format!("url(#{})", GRADIENT_ID))
            .attr("fill-rule", "evenodd")
            .attr("style", format!("filter: url(#{})", SHADOW_ID));
        if geometry.arc.sweep() > 0.0 {
            path.push(self.transition.animate_values("d", &keyframes));
        }

        Element::svg(dims.width, dims.height)
            .attr("class", "chart donut")
            .child(defs())
            .child(
                Element::new("g")
                    .attr(
                        "transform",
                        format!(
                            "translate({},{})",
                            num(geometry.center.0),
                            num(geometry.center.1)
                        ),
                    )
                    .child(path),
            )
    }
}

fn defs() -> Element {
    let gradient = Element::new("linearGradient")
        .attr("id", GRADIENT_ID)
        .attr("x1", "0%")
        .attr("x2", "100%")
        .attr("y1", "0%")
        .attr("y2", "0%")
        .child(
            Element::new("stop")
                .attr("offset", "0%")
                .attr("stop-color", theme::PALETTE_3),
        )
        .child(
            Element::new("stop")
                .attr("offset", "100%")
                .attr("stop-color", theme::PALETTE_4),
        );

    let shadow = Element::new("filter")
        .attr("id", SHADOW_ID)
        .attr("height", "130%")
        .child(
            Element::new("feGaussianBlur")
                .attr("in", "SourceAlpha")
                .attr("stdDeviation", 0.5)
                .attr("result", "blur"),
        )
        .child(
            Element::new("feOffset")
                .attr("in", "blur")
                .attr("dx", 1)
                .attr("dy", 1)
                .attr("result", "offsetBlur"),
        )
        .child(
            Element::new("feMerge")
                .child(Element::new("feMergeNode").attr("in", "offsetBlur"))
                .child(Element::new("feMergeNode").attr("in", "SourceGraphic")),
        );

    Element::new("defs").child(gradient).child(shadow)
}
