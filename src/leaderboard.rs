//! Ranking of the people most often in CC, and the list rows showing them

use crate::chart::svg::Element;
use crate::stats::CcHistogram;

/// Delay between the entrance animations of consecutive rows
pub const STAGGER_MS: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    pub username: String,
    pub count: u32,
    /// 1-based
    pub rank: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Gold,
    Silver,
    Bronze,
    Neutral,
}

impl Badge {
    pub fn for_rank(rank: usize) -> Self {
        match rank {
            1 => Badge::Gold,
            2 => Badge::Silver,
            3 => Badge::Bronze,
            _ => Badge::Neutral,
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            Badge::Gold => "gold",
            Badge::Silver => "silver",
            Badge::Bronze => "bronze",
            Badge::Neutral => "neutral",
        }
    }

    /// Medal for the podium, the rank number otherwise
    pub fn symbol(self, rank: usize) -> String {
        match self {
            Badge::Gold => "🥇".to_string(),
            Badge::Silver => "🥈".to_string(),
            Badge::Bronze => "🥉".to_string(),
            Badge::Neutral => format!("{}.", rank),
        }
    }
}

/// Sort by count, highest first, and keep the top `limit`.
///
/// The sort is stable, so equal counts keep their order in the document.
pub fn rank_entries(hist: &CcHistogram, limit: usize) -> Vec<RankedEntry> {
    let mut entries: Vec<(&String, &u32)> = hist.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1));
    entries
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(index, (username, count))| RankedEntry {
            username: username.clone(),
            count: *count,
            rank: index + 1,
        })
        .collect()
}

/// One `<li>` per entry, in rank order
pub fn render_rows(entries: &[RankedEntry]) -> Vec<Element> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let badge = Badge::for_rank(entry.rank);
            Element::new("li")
                .attr("class", format!("leaderboard-row {}", badge.class()))
                .attr(
                    "style",
                    format!("animation-delay: {}ms", index as u64 * STAGGER_MS),
                )
                .child(
                    Element::new("span")
                        .attr("class", format!("badge {}", badge.class()))
                        .text(badge.symbol(entry.rank)),
                )
                .child(
                    Element::new("span")
                        .attr("class", "username")
                        .text(format!("@{}", entry.username)),
                )
                .child(
                    Element::new("span")
                        .attr("class", "count")
                        .text(format!("{}x", entry.count)),
                )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hist(pairs: &[(&str, u32)]) -> CcHistogram {
        pairs
            .iter()
            .map(|(name, count)| (name.to_string(), *count))
            .collect()
    }

    #[test]
    fn test_ties_keep_document_order() {
        let ranked = rank_entries(&hist(&[("alice", 10), ("bob", 10), ("carol", 5)]), 10);
        let names: Vec<&str> = ranked.iter().map(|e| e.username.as_str()).collect();
        assert_eq!(names, ["alice", "bob", "carol"]);
        assert_eq!(ranked[2].rank, 3);

        let ranked = rank_entries(&hist(&[("bob", 10), ("carol", 5), ("alice", 10)]), 10);
        let names: Vec<&str> = ranked.iter().map(|e| e.username.as_str()).collect();
        assert_eq!(names, ["bob", "alice", "carol"]);
    }

    #[test]
    fn test_truncates_to_limit() {
        let pairs: Vec<(String, u32)> = (0..15).map(|i| (format!("user{}", i), i)).collect();
        let hist: CcHistogram = pairs.into_iter().collect();
        let ranked = rank_entries(&hist, 10);
        assert_eq!(ranked.len(), 10);
        assert_eq!(ranked[0].username, "user14");
        assert_eq!(ranked[9].username, "user5");
        assert_eq!(ranked[9].rank, 10);
    }

    #[test]
    fn test_empty_histogram() {
        assert!(rank_entries(&CcHistogram::new(), 10).is_empty());
        assert!(render_rows(&[]).is_empty());
    }

    #[test]
    fn test_badges() {
        assert_eq!(Badge::for_rank(1), Badge::Gold);
        assert_eq!(Badge::for_rank(3), Badge::Bronze);
        assert_eq!(Badge::for_rank(4), Badge::Neutral);
        assert_eq!(Badge::Neutral.symbol(7), "7.");
    }

    #[test]
    fn test_rows() {
        let ranked = rank_entries(
            &hist(&[("a", 4), ("b", 3), ("c", 2), ("d", 1)]),
            10,
        );
        let rows = render_rows(&ranked);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].get_attr("class"), Some("leaderboard-row gold"));
        assert_eq!(rows[3].get_attr("class"), Some("leaderboard-row neutral"));
        assert_eq!(rows[2].get_attr("style"), Some("animation-delay: 200ms"));
        assert_eq!(rows[1].text_content(), "🥈@b3x");
        assert_eq!(rows[3].text_content(), "4.@d1x");
    }
}
