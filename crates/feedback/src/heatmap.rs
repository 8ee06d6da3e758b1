//! Heatmap projection: reaction distribution, top hot paragraphs, and heat
//! tiers derived from an [`ArticleAggregate`].

use crate::error::{FeedbackError, Result};
use crate::types::{ArticleAggregate, FeedbackKind, FeedbackRecord};
use serde::{Deserialize, Serialize};

/// Configuration for heatmap projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    /// Number of hot paragraphs to surface
    pub top_n: usize,

    /// Number of discrete heat tiers (cool → hot)
    pub tiers: usize,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self { top_n: 5, tiers: 5 }
    }
}

impl HeatmapConfig {
    /// Validate configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.tiers == 0 {
            return Err("tiers must be > 0".to_string());
        }
        Ok(())
    }
}

/// Total count of one reaction kind across the article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KindCount {
    pub kind: FeedbackKind,
    pub count: u64,
}

/// A ranked paragraph in the heatmap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotParagraph {
    pub paragraph_id: String,
    pub hotness: u64,
    /// `hotness / max_hotness`, in `[0, 1]`
    pub normalized: f64,
    /// Heat tier in `[0, tiers - 1]`
    pub tier: usize,
    /// Most frequent reaction, used as the entry label
    pub top_record: Option<FeedbackRecord>,
}

/// Tier of one paragraph, for coloring the whole article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphTier {
    pub paragraph_id: String,
    pub tier: usize,
}

/// Projected heatmap view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Heatmap {
    /// Kinds with count > 0, most frequent first
    pub distribution: Vec<KindCount>,
    /// Top paragraphs by hotness
    pub hot_paragraphs: Vec<HotParagraph>,
    /// Tier of every paragraph present in the aggregate
    pub paragraph_tiers: Vec<ParagraphTier>,
    /// Normalization base (at least 1)
    pub max_hotness: u64,
}

impl Heatmap {
    /// True when no paragraph has any feedback
    pub fn is_cold(&self) -> bool {
        self.hot_paragraphs.is_empty()
    }
}

/// Map a hotness value to a tier in `[0, tiers - 1]`.
///
/// `max_hotness` is floored at 1. The clamp matters: `normalized == 1.0`
/// would otherwise land on `tiers`. Returns 0 when `tiers == 0`.
pub fn heat_tier(hotness: u64, max_hotness: u64, tiers: usize) -> usize {
    if tiers == 0 {
        return 0;
    }
    let normalized = normalize(hotness, max_hotness);
    let raw = (normalized * tiers as f64).floor() as usize;
    raw.min(tiers - 1)
}

fn normalize(hotness: u64, max_hotness: u64) -> f64 {
    let max = max_hotness.max(1);
    (hotness.min(max) as f64) / (max as f64)
}

/// Projects aggregates into heatmaps
#[derive(Debug, Clone, Default)]
pub struct HeatmapProjector {
    config: HeatmapConfig,
}

impl HeatmapProjector {
    pub fn new(config: HeatmapConfig) -> Result<Self> {
        config.validate().map_err(FeedbackError::invalid_config)?;
        Ok(Self { config })
    }

    /// Project an aggregate with the configured `top_n`
    pub fn project(&self, state: &ArticleAggregate) -> Heatmap {
        self.project_top(state, self.config.top_n)
    }

    /// Project an aggregate with an explicit `top_n`
    pub fn project_top(&self, state: &ArticleAggregate, top_n: usize) -> Heatmap {
        let tiers = self.config.tiers;
        let max_hotness = state
            .paragraphs
            .iter()
            .map(|p| p.hotness)
            .max()
            .unwrap_or(0)
            .max(1);

        let mut hot: Vec<_> = state.paragraphs.iter().filter(|p| p.hotness > 0).collect();
        // Stable: equal hotness keeps insertion order
        hot.sort_by(|a, b| b.hotness.cmp(&a.hotness));

        let hot_paragraphs = hot
            .into_iter()
            .take(top_n)
            .map(|p| HotParagraph {
                paragraph_id: p.paragraph_id.clone(),
                hotness: p.hotness,
                normalized: normalize(p.hotness, max_hotness),
                tier: heat_tier(p.hotness, max_hotness, tiers),
                top_record: p.top_record().cloned(),
            })
            .collect();

        let paragraph_tiers = state
            .paragraphs
            .iter()
            .map(|p| ParagraphTier {
                paragraph_id: p.paragraph_id.clone(),
                tier: heat_tier(p.hotness, max_hotness, tiers),
            })
            .collect();

        Heatmap {
            distribution: distribution(state),
            hot_paragraphs,
            paragraph_tiers,
            max_hotness,
        }
    }
}

/// Per-kind totals with count > 0, descending; ties in declaration order
pub fn distribution(state: &ArticleAggregate) -> Vec<KindCount> {
    let mut totals: Vec<KindCount> = FeedbackKind::ALL
        .into_iter()
        .map(|kind| KindCount {
            kind,
            count: state
                .paragraphs
                .iter()
                .filter_map(|p| p.record(kind))
                .map(|r| r.count)
                .sum(),
        })
        .filter(|entry| entry.count > 0)
        .collect();
    totals.sort_by(|a, b| b.count.cmp(&a.count));
    totals
}

/// Project with the default tier count
pub fn project(state: &ArticleAggregate, top_n: usize) -> Heatmap {
    HeatmapProjector::default().project_top(state, top_n)
}
