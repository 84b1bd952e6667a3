use crate::{
    collectors::collector::{
        CollectResult,
        Collector,
    },
    metrics::{
        descriptors,
        node_stats::EventStats,
        shared::millis_to_seconds,
        MetricRecord,
        NodeStats,
    },
};
use futures::future::ready;
use std::{
    future::Future,
    pin::Pin,
};

/// Node-wide event totals.
pub struct EventCollector;

impl EventCollector {
    pub fn map(events: &EventStats) -> CollectResult {
        let d = &descriptors().event;
        Ok(vec![
            MetricRecord::counter(&d.in_total, events.in_ as f64, &[])?,
            MetricRecord::counter(&d.filtered_total, events.filtered as f64, &[])?,
            MetricRecord::counter(&d.out_total, events.out as f64, &[])?,
            MetricRecord::counter(&d.duration_seconds_total, millis_to_seconds(events.duration_in_millis), &[])?,
            MetricRecord::counter(
                &d.queue_push_duration_seconds_total,
                millis_to_seconds(events.queue_push_duration_in_millis),
                &[],
            )?,
        ])
    }
}

impl Collector for EventCollector {
    fn collect<'a>(&'a self, stats: &'a NodeStats) -> Pin<Box<dyn Future<Output = CollectResult> + Send + 'a>> {
        Box::pin(ready(Self::map(&stats.events)))
    }

    fn name(&self) -> &'static str {
        "event"
    }
}
