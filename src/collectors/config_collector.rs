use crate::{
    collectors::collector::{
        CollectResult,
        Collector,
    },
    metrics::{
        descriptors,
        node_stats::{
            PipelineConfig,
            ReloadsStats,
        },
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

/// Node-level pipeline settings: workers, batch size and batch delay.
pub struct PipelineConfigCollector;

impl PipelineConfigCollector {
    pub fn map(config: &PipelineConfig) -> CollectResult {
        let d = &descriptors().pipeline_config;
        Ok(vec![
            MetricRecord::gauge(&d.workers, config.workers as f64, &[])?,
            MetricRecord::gauge(&d.batch_size, config.batch_size as f64, &[])?,
            MetricRecord::gauge(&d.batch_delay_seconds, millis_to_seconds(config.batch_delay), &[])?,
        ])
    }
}

impl Collector for PipelineConfigCollector {
    fn collect<'a>(&'a self, stats: &'a NodeStats) -> Pin<Box<dyn Future<Output = CollectResult> + Send + 'a>> {
        Box::pin(ready(Self::map(&stats.pipeline)))
    }

    fn name(&self) -> &'static str {
        "pipeline_config"
    }
}

/// Config reload outcomes.
pub struct ReloadsConfigCollector;

impl ReloadsConfigCollector {
    pub fn map(reloads: &ReloadsStats) -> CollectResult {
        let d = &descriptors().reloads_config;
        Ok(vec![
            MetricRecord::counter(&d.failures, reloads.failures as f64, &[])?,
            MetricRecord::counter(&d.successes, reloads.successes as f64, &[])?,
        ])
    }
}

impl Collector for ReloadsConfigCollector {
    fn collect<'a>(&'a self, stats: &'a NodeStats) -> Pin<Box<dyn Future<Output = CollectResult> + Send + 'a>> {
        Box::pin(ready(Self::map(&stats.reloads)))
    }

    fn name(&self) -> &'static str {
        "reloads_config"
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::metrics::MetricValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn batch_delay_is_reported_in_seconds() {
        let config = PipelineConfig {
            workers: 4,
            batch_size: 125,
            batch_delay: 50,
        };
        let records = PipelineConfigCollector::map(&config).unwrap();
        let values: Vec<_> = records.iter().map(|r| r.value).collect();
        assert_eq!(
            values,
            [
                MetricValue::Gauge(4.0),
                MetricValue::Gauge(125.0),
                MetricValue::Gauge(0.05)
            ]
        );
    }

    #[test]
    fn reloads_are_counters() {
        let reloads = ReloadsStats {
            failures: 2,
            successes: 17,
        };
        let records = ReloadsConfigCollector::map(&reloads).unwrap();
        assert_eq!(records[0].name(), "logstash_reloads_config_failures_total");
        assert_eq!(records[0].value, MetricValue::Counter(2.0));
        assert_eq!(records[1].name(), "logstash_reloads_config_successes_total");
        assert_eq!(records[1].value, MetricValue::Counter(17.0));
    }
}
