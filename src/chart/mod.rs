//! SVG chart renderers.
//!
//! Each renderer is a pure function of container dimensions and data and
//! returns a fresh `<svg>` tree; the page container swaps it in whole.

pub mod area;
pub mod bars;
pub mod donut;
pub mod primitives;
pub mod svg;

use std::fmt;
use std::str::FromStr;

pub use area::HourChart;
pub use bars::WeekdayChart;
pub use donut::{DonutChart, DonutGeometry};
pub use svg::Element;

use crate::error::RenderError;

/// Colors come from CSS variables defined by the page theme
pub mod theme {
    pub const PALETTE_1: &str = "var(--color-palette-1)";
    pub const PALETTE_2: &str = "var(--color-palette-2)";
    pub const PALETTE_3: &str = "var(--color-palette-3)";
    pub const PALETTE_4: &str = "var(--color-palette-4)";
    pub const GRID: &str = "var(--color-grid)";
    pub const TEXT: &str = "var(--color-text)";
}

/// Pixel size of a mount point, read from the page on every render
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerDimensions {
    pub width: f64,
    pub height: f64,
}

impl ContainerDimensions {
    /// Negative and non-finite sizes collapse to zero
    pub fn new(width: f64, height: f64) -> Self {
        ContainerDimensions {
            width: clamp_size(width),
            height: clamp_size(height),
        }
    }

    /// Like [`ContainerDimensions::new`] but rejects sizes a caller asked for explicitly
    pub fn checked(width: f64, height: f64) -> Result<Self, RenderError> {
        for value in [width, height] {
            if !value.is_finite() || value < 0.0 {
                return Err(RenderError::InvalidDimensions(format!("{}x{}", width, height)));
            }
        }
        Ok(Self::new(width, height))
    }
}

fn clamp_size(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

/// Inner drawing area of an axis chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Margins {
            top: 20.0,
            right: 20.0,
            bottom: 30.0,
            left: 40.0,
        }
    }
}

impl Margins {
    /// Plot width and height left after the margins, never negative
    pub fn inner(&self, dims: ContainerDimensions) -> (f64, f64) {
        (
            (dims.width - self.left - self.right).max(0.0),
            (dims.height - self.top - self.bottom).max(0.0),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Donut,
    Weekday,
    Hours,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Donut, ChartKind::Weekday, ChartKind::Hours];
}

impl FromStr for ChartKind {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "donut" | "progress" => Ok(ChartKind::Donut),
            "weekday" | "bars" => Ok(ChartKind::Weekday),
            "hours" | "hour" | "area" => Ok(ChartKind::Hours),
            other => Err(RenderError::UnknownChart(other.to_string())),
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChartKind::Donut => "donut",
            ChartKind::Weekday => "weekday",
            ChartKind::Hours => "hours",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_kind_parse() {
        assert_eq!("donut".parse::<ChartKind>(), Ok(ChartKind::Donut));
        assert_eq!(" Weekday ".parse::<ChartKind>(), Ok(ChartKind::Weekday));
        assert_eq!("area".parse::<ChartKind>(), Ok(ChartKind::Hours));
        assert_eq!(
            "pie".parse::<ChartKind>(),
            Err(RenderError::UnknownChart("pie".to_string()))
        );
    }

    #[test]
    fn test_dimensions_reject_non_finite() {
        assert_eq!(
            ContainerDimensions::new(f64::INFINITY, f64::NAN),
            ContainerDimensions::new(0.0, 0.0)
        );
        assert_eq!(ContainerDimensions::new(-5.0, 10.0).width, 0.0);

        assert_eq!(
            ContainerDimensions::checked(400.0, 300.0),
            Ok(ContainerDimensions::new(400.0, 300.0))
        );
        assert_eq!(
            ContainerDimensions::checked(f64::INFINITY, 300.0),
            Err(RenderError::InvalidDimensions("infx300".to_string()))
        );
        assert!(ContainerDimensions::checked(400.0, f64::NAN).is_err());
        assert!(ContainerDimensions::checked(-1.0, 300.0).is_err());
    }

    #[test]
    fn test_margins_never_negative() {
        let (w, h) = Margins::default().inner(ContainerDimensions::new(30.0, 10.0));
        assert_eq!((w, h), (0.0, 0.0));
    }
}
