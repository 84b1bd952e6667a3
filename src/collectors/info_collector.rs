use crate::{
    collectors::collector::{
        CollectResult,
        Collector,
    },
    metrics::{
        descriptors,
        MetricRecord,
        NodeStats,
    },
};
use futures::future::ready;
use std::{
    future::Future,
    pin::Pin,
};

/// Node identity and health from the stats document.
pub struct InfoCollector;

impl InfoCollector {
    pub fn map(stats: &NodeStats) -> CollectResult {
        let d = &descriptors().info;
        Ok(vec![
            MetricRecord::gauge(
                &d.info,
                1.0,
                &[
                    stats.version.as_str(),
                    stats.http_address.as_str(),
                    stats.name.as_str(),
                    stats.id.as_str(),
                    stats.ephemeral_id.as_str(),
                ],
            )?,
            MetricRecord::gauge(&d.status, stats.status().as_value(), &[])?,
        ])
    }
}

impl Collector for InfoCollector {
    fn collect<'a>(&'a self, stats: &'a NodeStats) -> Pin<Box<dyn Future<Output = CollectResult> + Send + 'a>> {
        Box::pin(ready(Self::map(stats)))
    }

    fn name(&self) -> &'static str {
        "info"
    }
}
