//! The dashboard page: named mount points with a size and replaceable content.
//!
//! Container sizes come from the viewport through [`Layout`] and are looked
//! up again on every render, so a resize only has to update the viewport.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::chart::svg::{escape, num, Element};
use crate::chart::ContainerDimensions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MountPoint {
    ProgressCircle,
    PercentageText,
    WrittenCount,
    SkippedCount,
    DelayText,
    WeekdayChart,
    HourChart,
    Leaderboard,
}

impl MountPoint {
    pub const ALL: [MountPoint; 8] = [
        MountPoint::ProgressCircle,
        MountPoint::PercentageText,
        MountPoint::WrittenCount,
        MountPoint::SkippedCount,
        MountPoint::DelayText,
        MountPoint::WeekdayChart,
        MountPoint::HourChart,
        MountPoint::Leaderboard,
    ];

    /// Stable element id on the page
    pub fn id(self) -> &'static str {
        match self {
            MountPoint::ProgressCircle => "progress-circle",
            MountPoint::PercentageText => "percentage",
            MountPoint::WrittenCount => "wrs-written",
            MountPoint::SkippedCount => "wrs-skipped",
            MountPoint::DelayText => "reply-delay",
            MountPoint::WeekdayChart => "weekday-chart",
            MountPoint::HourChart => "hour-chart",
            MountPoint::Leaderboard => "cc-leaderboard",
        }
    }

    pub fn is_text(self) -> bool {
        matches!(
            self,
            MountPoint::PercentageText
                | MountPoint::WrittenCount
                | MountPoint::SkippedCount
                | MountPoint::DelayText
        )
    }

    fn caption(self) -> &'static str {
        match self {
            MountPoint::ProgressCircle => "Replied",
            MountPoint::PercentageText => "Reply rate",
            MountPoint::WrittenCount => "Written",
            MountPoint::SkippedCount => "Skipped",
            MountPoint::DelayText => "Average reply delay",
            MountPoint::WeekdayChart => "WRs per weekday",
            MountPoint::HourChart => "Replies per hour",
            MountPoint::Leaderboard => "Most in CC",
        }
    }
}

/// Browser window size in pixels
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            width: 1280,
            height: 800,
        }
    }
}

/// Share of the viewport given to each chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub circle_share: f64,
    pub circle_min: f64,
    pub circle_max: f64,
    pub weekday_share: (f64, f64),
    pub hour_share: (f64, f64),
    pub text_height: f64,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            circle_share: 0.25,
            circle_min: 120.0,
            circle_max: 400.0,
            weekday_share: (0.45, 0.4),
            hour_share: (0.9, 0.35),
            text_height: 40.0,
        }
    }
}

impl Layout {
    pub fn dimensions(&self, mount: MountPoint, viewport: Viewport) -> ContainerDimensions {
        let width = viewport.width as f64;
        let height = viewport.height as f64;
        match mount {
            MountPoint::ProgressCircle => {
                let side = (width * self.circle_share).clamp(self.circle_min, self.circle_max);
                ContainerDimensions::new(side, side)
            }
            MountPoint::WeekdayChart => ContainerDimensions::new(
                width * self.weekday_share.0,
                height * self.weekday_share.1,
            ),
            MountPoint::HourChart => {
                ContainerDimensions::new(width * self.hour_share.0, height * self.hour_share.1)
            }
            MountPoint::Leaderboard => {
                ContainerDimensions::new(width * self.circle_share, height * self.weekday_share.1)
            }
            _ => ContainerDimensions::new(width * self.circle_share, self.text_height),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Content {
    #[default]
    Empty,
    Text(String),
    Svg(Element),
    List(Vec<Element>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    mount: MountPoint,
    content: Content,
}

impl Container {
    fn new(mount: MountPoint) -> Self {
        Container {
            mount,
            content: Content::Empty,
        }
    }

    pub fn mount(&self) -> MountPoint {
        self.mount
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn clear(&mut self) {
        self.content = Content::Empty;
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.content = Content::Text(text.into());
    }

    pub fn text(&self) -> Option<&str> {
        match &self.content {
            Content::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Remove whatever was drawn before, then insert `svg`
    pub fn replace_svg(&mut self, svg: Element) {
        self.clear();
        self.content = Content::Svg(svg);
    }

    pub fn svg(&self) -> Option<&Element> {
        match &self.content {
            Content::Svg(svg) => Some(svg),
            _ => None,
        }
    }

    /// Number of `<svg>` roots currently in the container
    pub fn svg_count(&self) -> usize {
        match &self.content {
            Content::Svg(svg) => svg.find_all("svg").len(),
            Content::List(items) => items.iter().map(|item| item.find_all("svg").len()).sum(),
            _ => 0,
        }
    }

    /// Add list items after any already present
    pub fn append_items(&mut self, items: Vec<Element>) {
        match &mut self.content {
            Content::List(existing) => existing.extend(items),
            _ => self.content = Content::List(items),
        }
    }

    pub fn items(&self) -> &[Element] {
        match &self.content {
            Content::List(items) => items,
            _ => &[],
        }
    }

    fn to_element(&self, dims: ContainerDimensions) -> Element {
        let mut el = match self.mount {
            MountPoint::Leaderboard => Element::new("ol"),
            mount if mount.is_text() => Element::new("span"),
            _ => Element::new("div").attr(
                "style",
                format!("width:{}px;height:{}px", num(dims.width), num(dims.height)),
            ),
        }
        .attr("id", self.mount.id());

        match &self.content {
            Content::Empty => {}
            Content::Text(text) => el = el.text(text.clone()),
            Content::Svg(svg) => el.push(svg.clone()),
            Content::List(items) => el = el.children(items.iter().cloned()),
        }
        el
    }
}

const STYLE: &str = r#"
:root {
  --color-palette-1: #3d5a80;
  --color-palette-2: #98c1d9;
  --color-palette-3: #ee6c4d;
  --color-palette-4: #f4a261;
  --color-grid: #e0e0e0;
  --color-text: #293241;
}
body { font-family: system-ui, sans-serif; color: var(--color-text); margin: 2rem; }
.dashboard { display: flex; flex-wrap: wrap; gap: 1.5rem; }
.card { padding: 1rem; border-radius: 12px; box-shadow: 0 1px 4px rgba(0, 0, 0, 0.12); }
.card h2 { font-size: 1rem; margin: 0 0 0.5rem; }
.metric span { font-size: 1.6rem; font-weight: 600; }
ol#cc-leaderboard { list-style: none; padding: 0; margin: 0; }
.leaderboard-row { display: flex; gap: 0.5rem; opacity: 0; animation: enter 0.4s ease-out forwards; }
.badge.neutral { color: #8d99ae; min-width: 2ch; }
.count { margin-left: auto; }
@keyframes enter { from { opacity: 0; transform: translateY(6px); } to { opacity: 1; transform: none; } }
"#;

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    viewport: Viewport,
    layout: Layout,
    containers: BTreeMap<MountPoint, Container>,
}

impl Page {
    pub fn new(viewport: Viewport) -> Self {
        Self::with_layout(viewport, Layout::default())
    }

    pub fn with_layout(viewport: Viewport, layout: Layout) -> Self {
        Page {
            viewport,
            layout,
            containers: MountPoint::ALL
                .iter()
                .map(|mount| (*mount, Container::new(*mount)))
                .collect(),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Change the viewport; content stays until it is redrawn
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Current size of a mount point
    pub fn dimensions(&self, mount: MountPoint) -> ContainerDimensions {
        self.layout.dimensions(mount, self.viewport)
    }

    pub fn container(&self, mount: MountPoint) -> &Container {
        // Every mount point is created in `with_layout`
        &self.containers[&mount]
    }

    pub fn container_mut(&mut self, mount: MountPoint) -> &mut Container {
        self.containers
            .entry(mount)
            .or_insert_with(|| Container::new(mount))
    }

    /// Total `<svg>` roots on the page
    pub fn svg_count(&self) -> usize {
        self.containers.values().map(Container::svg_count).sum()
    }

    fn card(&self, mounts: &[MountPoint], class: &str) -> Element {
        let mut card = Element::new("section").attr("class", format!("card {}", class));
        for mount in mounts {
            let container = self.container(*mount);
            let element = container.to_element(self.dimensions(*mount));
            card.push(
                Element::new("div")
                    .attr("class", if mount.is_text() { "metric" } else { "panel" })
                    .child(Element::new("h2").text(mount.caption()))
                    .child(element),
            );
        }
        card
    }

    /// Standalone HTML document
    pub fn to_html(&self, title: &str, generated: &str) -> String {
        let main = Element::new("main")
            .attr("class", "dashboard")
            .child(self.card(
                &[MountPoint::ProgressCircle, MountPoint::PercentageText],
                "progress",
            ))
            .child(self.card(
                &[
                    MountPoint::WrittenCount,
                    MountPoint::SkippedCount,
                    MountPoint::DelayText,
                ],
                "counters",
            ))
            .child(self.card(&[MountPoint::WeekdayChart], "weekday"))
            .child(self.card(&[MountPoint::Leaderboard], "leaderboard"))
            .child(self.card(&[MountPoint::HourChart], "hours"));

        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
             <title>{title}</title>\n<style>{style}</style>\n</head>\n<body>\n\
             <h1>{title}</h1>\n{main}\n<footer>Generated {generated}</footer>\n</body>\n</html>\n",
            title = escape(title),
            style = STYLE,
            main = main,
            generated = escape(generated),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_mount_point_exists() {
        let page = Page::new(Viewport::default());
        for mount in MountPoint::ALL {
            assert_eq!(page.container(mount).mount(), mount);
            assert_eq!(page.container(mount).content(), &Content::Empty);
        }
        assert_eq!(page.svg_count(), 0);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<&str> = MountPoint::ALL.iter().map(|m| m.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), MountPoint::ALL.len());
    }

    #[test]
    fn test_dimensions_follow_viewport() {
        let mut page = Page::new(Viewport {
            width: 1000,
            height: 600,
        });
        let before = page.dimensions(MountPoint::WeekdayChart);
        assert!((before.width - 450.0).abs() < 1e-9);
        assert!((before.height - 240.0).abs() < 1e-9);

        page.set_viewport(Viewport {
            width: 500,
            height: 600,
        });
        let after = page.dimensions(MountPoint::WeekdayChart);
        assert!((after.width - 225.0).abs() < 1e-9);
    }

    #[test]
    fn test_progress_circle_is_square_and_clamped() {
        let layout = Layout::default();
        let small = layout.dimensions(
            MountPoint::ProgressCircle,
            Viewport {
                width: 200,
                height: 200,
            },
        );
        assert_eq!(small, ContainerDimensions::new(120.0, 120.0));
        let large = layout.dimensions(
            MountPoint::ProgressCircle,
            Viewport {
                width: 4000,
                height: 2000,
            },
        );
        assert_eq!(large.width, 400.0);
        assert_eq!(large.width, large.height);
    }

    #[test]
    fn test_replace_svg_keeps_one() {
        let mut page = Page::new(Viewport::default());
        let container = page.container_mut(MountPoint::WeekdayChart);
        container.replace_svg(Element::svg(10.0, 10.0));
        container.replace_svg(Element::svg(20.0, 20.0));
        assert_eq!(container.svg_count(), 1);
        assert_eq!(container.svg().unwrap().get_attr("width"), Some("20"));
    }

    #[test]
    fn test_append_items_is_additive() {
        let mut page = Page::new(Viewport::default());
        let container = page.container_mut(MountPoint::Leaderboard);
        container.append_items(vec![Element::new("li")]);
        container.append_items(vec![Element::new("li"), Element::new("li")]);
        assert_eq!(container.items().len(), 3);
        container.clear();
        assert!(container.items().is_empty());
    }

    #[test]
    fn test_html_contains_mount_points() {
        let mut page = Page::new(Viewport::default());
        page.container_mut(MountPoint::PercentageText).set_text("76%");
        page.container_mut(MountPoint::ProgressCircle)
            .replace_svg(Element::svg(100.0, 100.0));

        let html = page.to_html("WR <stats>", "2025-01-01");
        assert!(html.starts_with("<!DOCTYPE html>"));
        for mount in MountPoint::ALL {
            assert!(html.contains(&format!("id=\"{}\"", mount.id())), "{}", mount.id());
        }
        assert!(html.contains("<span id=\"percentage\">76%</span>"));
        assert!(html.contains("<title>WR &lt;stats&gt;</title>"));
        assert!(html.contains("--color-palette-3"));
        assert_eq!(html.matches("<svg").count(), 1);
    }

    #[test]
    fn test_empty_page_closes_every_container() {
        let page = Page::new(Viewport::default());
        let html = page.to_html("WR statistics", "now");
        assert!(html.contains("<ol id=\"cc-leaderboard\"></ol>"));
        assert!(html.contains("<span id=\"reply-delay\"></span>"));
        assert!(html.contains("id=\"progress-circle\"></div>"));
        assert!(html.contains("id=\"hour-chart\"></div>"));
        assert!(!html.contains("/>"));
    }
}
