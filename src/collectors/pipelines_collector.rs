//! Per-pipeline detail: event totals, queue, dead letter queue and plugins.
//!
//! Every record carries the pipeline name as its first label, so the output is
//! a set of series and the iteration order of the pipeline map is irrelevant.
//!
//! Filters are labeled by their position in the pipeline's filter list as well
//! as id and name. Logstash generates filter ids from config content, so the
//! index is the only thing telling two identical filters apart. Reordering
//! filters in the config therefore changes the series identities.

use crate::{
    collectors::collector::{
        CollectResult,
        Collector,
    },
    error::ScrapeError,
    metrics::{
        descriptors,
        node_stats::PipelineStats,
        shared::millis_to_seconds,
        MetricRecord,
        NodeStats,
    },
};
use futures::future::ready;
use std::{
    collections::HashMap,
    future::Future,
    pin::Pin,
};

pub struct PipelinesCollector;

impl PipelinesCollector {
    pub fn map(pipelines: &HashMap<String, PipelineStats>) -> CollectResult {
        let mut records = Vec::new();
        for (name, pipeline) in pipelines {
            records.extend(Self::map_pipeline(name, pipeline)?);
        }
        Ok(records)
    }

    pub fn map_pipeline(name: &str, p: &PipelineStats) -> Result<Vec<MetricRecord>, ScrapeError> {
        let d = &descriptors().pipeline;
        let events = &p.events;
        let queue = &p.queue;
        let capacity = &queue.capacity;
        let dlq = &p.dead_letter_queue;

        let pipeline = &[name];
        let queue_labels = &[name, queue.queue_type.as_str()];

        let mut records = vec![
            MetricRecord::counter(&d.event_in, events.in_ as f64, pipeline)?,
            MetricRecord::counter(&d.event_filtered, events.filtered as f64, pipeline)?,
            MetricRecord::counter(&d.event_out, events.out as f64, pipeline)?,
            MetricRecord::counter(&d.event_duration, millis_to_seconds(events.duration_in_millis), pipeline)?,
            MetricRecord::counter(
                &d.event_queue_push_duration,
                millis_to_seconds(events.queue_push_duration_in_millis),
                pipeline,
            )?,
            // queue
            MetricRecord::gauge(&d.queue_events_count, queue.events_count as f64, queue_labels)?,
            MetricRecord::counter(&d.queue_size_bytes, queue.queue_size_in_bytes as f64, queue_labels)?,
            MetricRecord::counter(&d.queue_max_size_bytes, queue.max_queue_size_in_bytes as f64, queue_labels)?,
            // queue capacity
            MetricRecord::counter(
                &d.capacity_max_unread_events,
                capacity.max_unread_events as f64,
                queue_labels,
            )?,
            MetricRecord::counter(
                &d.capacity_max_queue_size_bytes,
                capacity.max_queue_size_in_bytes as f64,
                queue_labels,
            )?,
            MetricRecord::counter(
                &d.capacity_page_capacity_bytes,
                capacity.page_capacity_in_bytes as f64,
                queue_labels,
            )?,
            MetricRecord::counter(
                &d.capacity_queue_size_bytes,
                capacity.queue_size_in_bytes as f64,
                queue_labels,
            )?,
            // dead letter queue
            MetricRecord::counter(&d.dlq_dropped_events, dlq.dropped_events as f64, pipeline)?,
            MetricRecord::counter(&d.dlq_max_queue_size_bytes, dlq.max_queue_size_in_bytes as f64, pipeline)?,
            MetricRecord::counter(&d.dlq_queue_size_bytes, dlq.queue_size_in_bytes as f64, pipeline)?,
        ];

        for input in &p.plugins.inputs {
            let labels = &[name, input.id.as_str(), input.name.as_str()];
            records.push(MetricRecord::gauge(&d.input_connections, input.current_connections as f64, labels)?);
            records.push(MetricRecord::counter(
                &d.input_queue_push_duration,
                millis_to_seconds(input.events.queue_push_duration_in_millis),
                labels,
            )?);
            records.push(MetricRecord::counter(&d.input_out, input.events.out as f64, labels)?);
        }

        for (idx, filter) in p.plugins.filters.iter().enumerate() {
            let index = idx.to_string();
            let labels = &[name, filter.id.as_str(), filter.name.as_str(), index.as_str()];
            records.push(MetricRecord::counter(
                &d.filter_duration,
                millis_to_seconds(filter.events.duration_in_millis),
                labels,
            )?);
            records.push(MetricRecord::counter(&d.filter_in, filter.events.in_ as f64, labels)?);
            records.push(MetricRecord::counter(&d.filter_out, filter.events.out as f64, labels)?);
        }

        for output in &p.plugins.outputs {
            let labels = &[name, output.id.as_str(), output.name.as_str()];
            records.push(MetricRecord::counter(
                &d.output_duration,
                millis_to_seconds(output.events.duration_in_millis),
                labels,
            )?);
            records.push(MetricRecord::counter(&d.output_in, output.events.in_ as f64, labels)?);
            records.push(MetricRecord::counter(&d.output_out, output.events.out as f64, labels)?);
            records.push(MetricRecord::counter(
                &d.output_successes,
                output.documents.successes as f64,
                labels,
            )?);
            records.push(MetricRecord::counter(
                &d.output_non_retryable_failures,
                output.documents.non_retryable_failures as f64,
                labels,
            )?);
        }

        Ok(records)
    }
}

impl Collector for PipelinesCollector {
    fn collect<'a>(&'a self, stats: &'a NodeStats) -> Pin<Box<dyn Future<Output = CollectResult> + Send + 'a>> {
        Box::pin(ready(Self::map(&stats.pipelines)))
    }

    fn name(&self) -> &'static str {
        "pipelines"
    }
}
