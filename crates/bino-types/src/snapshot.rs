//! Market/news snapshot produced by the external scraper.

use serde::{Deserialize, Serialize};

/// A point-in-time capture of market and news data.
///
/// Produced wholesale by the scraping collaborator and replaced on each
/// refresh (no merge); the pipeline treats it as read-only. Every field is
/// optional on the wire — missing data is substituted with fallbacks at
/// grounding time, never treated as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// When the snapshot was captured, as formatted by the scraper.
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Spot price as displayed by the source, e.g. `"$612.40"`.
    #[serde(default)]
    pub price: Option<String>,
    /// 24h change as displayed by the source, e.g. `"+2.41%"`.
    #[serde(default)]
    pub variation_24h: Option<String>,
    /// Ordered highlight strings scraped from the news page.
    #[serde(default)]
    pub deep_dives: Vec<String>,
}
