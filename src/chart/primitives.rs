//! Chart primitives: scales, ticks, arc and spline geometry, easing.
//!
//! The renderers only talk to this module, so nothing outside it knows how
//! paths are built or how motion is expressed.

use std::f64::consts::{PI, TAU};
use std::time::Duration;

use super::svg::{num, Element};

/// Maps a domain value to a pixel position
pub trait Scale {
    type Domain;

    fn apply(&self, value: Self::Domain) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        LinearScale { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }
}

impl Scale for LinearScale {
    type Domain = f64;

    /// A collapsed domain maps everything to the start of the range
    fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return r0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }
}

/// Evenly spaced categories with padding between and around the bands
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandScale {
    count: usize,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    /// `padding` is the share of a step left empty, applied inside and outside
    pub fn new(count: usize, range: (f64, f64), padding: f64) -> Self {
        let padding = padding.clamp(0.0, 1.0);
        let (r0, r1) = range;
        let n = count as f64;
        let denom = (n - padding + 2.0 * padding).max(1.0);
        let step = (r1 - r0) / denom;
        let start = r0 + (r1 - r0 - step * (n - padding)) / 2.0;
        BandScale {
            count,
            start,
            step,
            bandwidth: step * (1.0 - padding),
        }
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Center of a band
    pub fn center(&self, index: usize) -> f64 {
        self.apply(index) + self.bandwidth / 2.0
    }
}

impl Scale for BandScale {
    type Domain = usize;

    fn apply(&self, index: usize) -> f64 {
        self.start + self.step * index as f64
    }
}

/// Tick values from `start` to `end` inclusive at a fixed step
pub fn fixed_ticks(start: f64, end: f64, step: f64) -> Vec<f64> {
    if step <= 0.0 || end < start {
        return vec![start];
    }
    let count = ((end - start) / step + 1e-9).floor() as usize;
    (0..=count).map(|i| start + step * i as f64).collect()
}

/// An annular sector, angles in radians clockwise from 12 o'clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Arc {
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Path with rounded ends; empty for a zero sweep, two rings for a full one
    pub fn path(&self) -> String {
        let sweep = self.sweep();
        let (r0, r1) = (self.inner_radius, self.outer_radius);
        if sweep <= f64::EPSILON || r1 <= 0.0 {
            return String::new();
        }
        if sweep >= TAU - 1e-9 {
            return format!("{} {}", circle_path(r1, true), circle_path(r0, false));
        }

        let cap = (r1 - r0) / 2.0;
        let large = if sweep > PI { 1 } else { 0 };
        let (a0, a1) = (self.start_angle, self.end_angle);
        let (ox0, oy0) = polar(r1, a0);
        let (ox1, oy1) = polar(r1, a1);
        let (ix1, iy1) = polar(r0, a1);
        let (ix0, iy0) = polar(r0, a0);
        format!(
            "M{},{}A{},{} 0 {} 1 {},{}A{},{} 0 0 1 {},{}A{},{} 0 {} 0 {},{}A{},{} 0 0 1 {},{}Z",
            num(ox0),
            num(oy0),
            num(r1),
            num(r1),
            large,
            num(ox1),
            num(oy1),
            num(cap),
            num(cap),
            num(ix1),
            num(iy1),
            num(r0),
            num(r0),
            large,
            num(ix0),
            num(iy0),
            num(cap),
            num(cap),
            num(ox0),
            num(oy0),
        )
    }
}

fn circle_path(radius: f64, clockwise: bool) -> String {
    if radius <= 0.0 {
        return String::new();
    }
    let flag = if clockwise { 1 } else { 0 };
    let r = num(radius);
    format!(
        "M0,-{r}A{r},{r} 0 1 {flag} 0,{r}A{r},{r} 0 1 {flag} 0,-{r}Z",
        r = r,
        flag = flag
    )
}

/// Point at `radius` and `angle` (clockwise from 12 o'clock) in SVG coordinates
pub fn polar(radius: f64, angle: f64) -> (f64, f64) {
    (radius * angle.sin(), -radius * angle.cos())
}

/// One cubic Bezier segment of a spline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub from: (f64, f64),
    pub c1: (f64, f64),
    pub c2: (f64, f64),
    pub to: (f64, f64),
}

impl CubicSegment {
    pub fn point_at(&self, t: f64) -> (f64, f64) {
        let u = 1.0 - t;
        let a = u * u * u;
        let b = 3.0 * u * u * t;
        let c = 3.0 * u * t * t;
        let d = t * t * t;
        (
            a * self.from.0 + b * self.c1.0 + c * self.c2.0 + d * self.to.0,
            a * self.from.1 + b * self.c1.1 + c * self.c2.1 + d * self.to.1,
        )
    }
}

/// Cardinal spline through `points`; tension 0 is the classic smooth curve,
/// tension 1 gives straight lines.
pub fn cardinal_segments(points: &[(f64, f64)], tension: f64) -> Vec<CubicSegment> {
    let k = (1.0 - tension) / 6.0;
    let last = points.len().saturating_sub(1);
    let at = |i: usize| points[i.min(last)];

    (0..last)
        .map(|i| {
            let prev = at(i.saturating_sub(1));
            let from = at(i);
            let to = at(i + 1);
            let next = at(i + 2);
            CubicSegment {
                from,
                c1: (from.0 + k * (to.0 - prev.0), from.1 + k * (to.1 - prev.1)),
                c2: (to.0 - k * (next.0 - from.0), to.1 - k * (next.1 - from.1)),
                to,
            }
        })
        .collect()
}

/// SVG path of a cardinal spline
pub fn cardinal_line(points: &[(f64, f64)], tension: f64) -> String {
    let Some(first) = points.first() else {
        return String::new();
    };
    let mut path = format!("M{},{}", num(first.0), num(first.1));
    for seg in cardinal_segments(points, tension) {
        path.push_str(&format!(
            "C{},{},{},{},{},{}",
            num(seg.c1.0),
            num(seg.c1.1),
            num(seg.c2.0),
            num(seg.c2.1),
            num(seg.to.0),
            num(seg.to.1)
        ));
    }
    path
}

/// Closed area between a cardinal spline and a horizontal baseline
pub fn cardinal_area(points: &[(f64, f64)], baseline: f64, tension: f64) -> String {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return String::new();
    };
    format!(
        "{}L{},{}L{},{}Z",
        cardinal_line(points, tension),
        num(last.0),
        num(baseline),
        num(first.0),
        num(baseline)
    )
}

/// Sample a spline at `per_segment` steps per segment, endpoints included
pub fn sample_spline(points: &[(f64, f64)], tension: f64, per_segment: usize) -> Vec<(f64, f64)> {
    let per_segment = per_segment.max(1);
    let segments = cardinal_segments(points, tension);
    if segments.is_empty() {
        return points.to_vec();
    }
    let mut samples = Vec::with_capacity(segments.len() * per_segment + 1);
    for seg in &segments {
        for step in 0..per_segment {
            samples.push(seg.point_at(step as f64 / per_segment as f64));
        }
    }
    if let Some(seg) = segments.last() {
        samples.push(seg.to);
    }
    samples
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    CubicInOut,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = 2.0 * t - 2.0;
                    u * u * u / 2.0 + 1.0
                }
            }
        }
    }

    /// Control points of the matching SMIL `keySplines` curve
    pub fn key_spline(self) -> &'static str {
        match self {
            Easing::Linear => "0 0 1 1",
            Easing::CubicInOut => "0.65 0 0.35 1",
        }
    }
}

/// A timed, eased interpolation from 0 to 1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub duration: Duration,
    pub easing: Easing,
}

impl Transition {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Transition { duration, easing }
    }

    /// Eased progress after `elapsed`
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        self.easing
            .apply(elapsed.as_secs_f64() / self.duration.as_secs_f64())
    }

    /// Eased progress at `frames + 1` evenly spaced instants
    pub fn frames(&self, frames: usize) -> Vec<f64> {
        let frames = frames.max(1);
        (0..=frames)
            .map(|i| self.easing.apply(i as f64 / frames as f64))
            .collect()
    }

    fn dur(&self) -> String {
        format!("{}ms", self.duration.as_millis())
    }

    /// Smooth numeric animation of one attribute
    pub fn animate(&self, attribute: &str, from: f64, to: f64) -> Element {
        Element::new("animate")
            .attr("attributeName", attribute)
            .attr("from", num(from))
            .attr("to", num(to))
            .attr("dur", self.dur())
            .attr("fill", "freeze")
            .attr("calcMode", "spline")
            .attr("keyTimes", "0;1")
            .attr("keySplines", self.easing.key_spline())
    }

    /// Step through precomputed values, e.g. path data sampled per frame
    pub fn animate_values(&self, attribute: &str, values: &[String]) -> Element {
        let last = values.len().saturating_sub(1).max(1);
        let key_times: Vec<String> = (0..values.len())
            .map(|i| num(i as f64 / last as f64))
            .collect();
        Element::new("animate")
            .attr("attributeName", attribute)
            .attr("values", values.join(";"))
            .attr("keyTimes", key_times.join(";"))
            .attr("dur", self.dur())
            .attr("fill", "freeze")
            .attr("calcMode", "discrete")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_linear_scale() {
        let y = LinearScale::new((0.0, 20.0), (100.0, 0.0));
        assert!(close(y.apply(0.0), 100.0));
        assert!(close(y.apply(10.0), 50.0));
        assert!(close(y.apply(20.0), 0.0));
    }

    #[test]
    fn test_linear_scale_collapsed_domain() {
        let y = LinearScale::new((0.0, 0.0), (100.0, 0.0));
        assert!(close(y.apply(0.0), 100.0));
    }

    #[test]
    fn test_band_scale_fills_range() {
        let x = BandScale::new(7, (0.0, 700.0), 0.2);
        let step = x.apply(1) - x.apply(0);
        assert!(close(x.bandwidth(), step * 0.8));
        // Outer padding is symmetric
        let left = x.apply(0);
        let right = 700.0 - (x.apply(6) + x.bandwidth());
        assert!(close(left, right));
        assert!(left > 0.0);
    }

    #[test]
    fn test_band_scale_no_padding() {
        let x = BandScale::new(4, (0.0, 100.0), 0.0);
        assert!(close(x.apply(0), 0.0));
        assert!(close(x.bandwidth(), 25.0));
        assert!(close(x.center(3), 87.5));
    }

    #[test]
    fn test_fixed_ticks() {
        assert_eq!(fixed_ticks(0.0, 24.0, 3.0).len(), 9);
        assert_eq!(fixed_ticks(0.0, 12.0, 5.0), vec![0.0, 5.0, 10.0]);
        assert_eq!(fixed_ticks(0.0, 0.0, 5.0), vec![0.0]);
    }

    #[test]
    fn test_polar_origin_is_twelve_oclock() {
        let (x, y) = polar(10.0, 0.0);
        assert!(close(x, 0.0) && close(y, -10.0));
        let (x, y) = polar(10.0, PI / 2.0);
        assert!(close(x, 10.0) && close(y, 0.0));
    }

    #[test]
    fn test_arc_degenerate_cases() {
        let empty = Arc {
            inner_radius: 50.0,
            outer_radius: 75.0,
            start_angle: 0.0,
            end_angle: 0.0,
        };
        assert!(empty.path().is_empty());

        let full = Arc {
            end_angle: TAU,
            ..empty
        };
        let path = full.path();
        assert_eq!(path.matches('M').count(), 2);
        assert!(path.starts_with("M0,-75"));
    }

    #[test]
    fn test_arc_large_flag() {
        let quarter = Arc {
            inner_radius: 50.0,
            outer_radius: 75.0,
            start_angle: 0.0,
            end_angle: PI / 2.0,
        };
        assert!(quarter.path().contains("A75,75 0 0 1 75,0"));

        let three_quarters = Arc {
            end_angle: 1.5 * PI,
            ..quarter
        };
        assert!(three_quarters.path().contains("A75,75 0 1 1 -75,0"));
    }

    #[test]
    fn test_cardinal_passes_through_points() {
        let points = [(0.0, 0.0), (1.0, 2.0), (2.0, 1.0), (3.0, 3.0)];
        let segments = cardinal_segments(&points, 0.0);
        assert_eq!(segments.len(), 3);
        for (seg, pair) in segments.iter().zip(points.windows(2)) {
            assert_eq!(seg.point_at(0.0), pair[0]);
            assert_eq!(seg.point_at(1.0), pair[1]);
        }
    }

    #[test]
    fn test_cardinal_full_tension_is_straight() {
        let points = [(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)];
        let segments = cardinal_segments(&points, 1.0);
        assert_eq!(segments[0].c1, (0.0, 0.0));
        assert_eq!(segments[0].c2, (1.0, 1.0));
    }

    #[test]
    fn test_cardinal_paths() {
        assert!(cardinal_line(&[], 0.0).is_empty());
        let points = [(0.0, 10.0), (5.0, 0.0), (10.0, 10.0)];
        let line = cardinal_line(&points, 0.0);
        assert!(line.starts_with("M0,10C"));
        assert_eq!(line.matches('C').count(), 2);
        let area = cardinal_area(&points, 20.0, 0.0);
        assert!(area.ends_with("L10,20L0,20Z"));
    }

    #[test]
    fn test_sample_spline_endpoints() {
        let points = [(0.0, 0.0), (1.0, 4.0), (2.0, 0.0)];
        let samples = sample_spline(&points, 0.0, 4);
        assert_eq!(samples.len(), 9);
        assert_eq!(samples.first(), Some(&(0.0, 0.0)));
        assert_eq!(samples.last(), Some(&(2.0, 0.0)));
    }

    #[test]
    fn test_easing_bounds() {
        for easing in [Easing::Linear, Easing::CubicInOut] {
            assert!(close(easing.apply(0.0), 0.0));
            assert!(close(easing.apply(1.0), 1.0));
            assert!(close(easing.apply(0.5), 0.5));
            assert!(close(easing.apply(2.0), 1.0));
        }
        assert!(Easing::CubicInOut.apply(0.25) < 0.25);
        assert!(Easing::CubicInOut.apply(0.75) > 0.75);
    }

    #[test]
    fn test_transition_progress() {
        let t = Transition::new(Duration::from_secs(2), Easing::Linear);
        assert!(close(t.progress(Duration::ZERO), 0.0));
        assert!(close(t.progress(Duration::from_secs(1)), 0.5));
        assert!(close(t.progress(Duration::from_secs(5)), 1.0));

        let instant = Transition::new(Duration::ZERO, Easing::CubicInOut);
        assert!(close(instant.progress(Duration::ZERO), 1.0));
    }

    #[test]
    fn test_transition_frames() {
        let frames = Transition::new(Duration::from_secs(1), Easing::CubicInOut).frames(10);
        assert_eq!(frames.len(), 11);
        assert!(close(frames[0], 0.0));
        assert!(close(frames[10], 1.0));
        assert!(frames.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_animate_elements() {
        let t = Transition::new(Duration::from_millis(1000), Easing::CubicInOut);
        let el = t.animate("height", 0.0, 42.0);
        assert_eq!(el.get_attr("dur"), Some("1000ms"));
        assert_eq!(el.get_attr("to"), Some("42"));
        assert_eq!(el.get_attr("keySplines"), Some("0.65 0 0.35 1"));

        let values = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let el = t.animate_values("d", &values);
        assert_eq!(el.get_attr("values"), Some("a;b;c"));
        assert_eq!(el.get_attr("keyTimes"), Some("0;0.5;1"));
    }
}
