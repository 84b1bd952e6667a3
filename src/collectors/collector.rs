use crate::{
    error::ScrapeError,
    metrics::{
        MetricRecord,
        NodeStats,
    },
};
use std::{
    future::Future,
    pin::Pin,
};

pub type CollectResult = Result<Vec<MetricRecord>, ScrapeError>;

/// A named sub-collector run by the [`Orchestrator`](super::Orchestrator).
///
/// Every collector receives the same snapshot of one scrape. Most collectors
/// are pure mappings and resolve immediately; the node-info collector issues
/// its own request.
pub trait Collector: Send + Sync {
    /// Collect the records for one scrape.
    fn collect<'a>(&'a self, stats: &'a NodeStats) -> Pin<Box<dyn Future<Output = CollectResult> + Send + 'a>>;

    /// Get the name of this collector
    fn name(&self) -> &'static str;
}
