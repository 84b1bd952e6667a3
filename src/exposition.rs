//! Render one scrape's records in the Prometheus text format.

use crate::metrics::{
    MetricDescriptor,
    MetricRecord,
    MetricValue,
};
use prometheus::{
    proto,
    Encoder,
    Registry,
    TextEncoder,
};
use std::collections::BTreeMap;

/// Group records into metric families, keyed and ordered by metric name.
///
/// The family type is taken from the first record of a descriptor.
pub fn families(records: &[MetricRecord]) -> Vec<proto::MetricFamily> {
    let mut grouped: BTreeMap<&str, (&MetricDescriptor, Vec<&MetricRecord>)> = BTreeMap::new();
    for record in records {
        grouped
            .entry(record.desc.fq_name())
            .or_insert_with(|| (record.desc, Vec::new()))
            .1
            .push(record);
    }

    grouped
        .into_values()
        .map(|(desc, records)| family(desc, &records))
        .collect()
}

fn family(desc: &MetricDescriptor, records: &[&MetricRecord]) -> proto::MetricFamily {
    let metric_type = match records[0].value {
        MetricValue::Gauge(_) => proto::MetricType::GAUGE,
        MetricValue::Counter(_) => proto::MetricType::COUNTER,
        MetricValue::Summary { .. } => proto::MetricType::SUMMARY,
    };

    let metrics: Vec<proto::Metric> = records.iter().map(|record| metric(desc, record)).collect();

    let mut family = proto::MetricFamily::default();
    family.set_name(desc.fq_name().to_string());
    family.set_help(desc.help().to_string());
    family.set_field_type(metric_type);
    family.set_metric(metrics.into());
    family
}

fn metric(desc: &MetricDescriptor, record: &MetricRecord) -> proto::Metric {
    let labels: Vec<proto::LabelPair> = desc
        .label_names()
        .iter()
        .zip(&record.labels)
        .map(|(name, value)| {
            let mut pair = proto::LabelPair::default();
            pair.set_name(name.to_string());
            pair.set_value(value.clone());
            pair
        })
        .collect();

    let mut metric = proto::Metric::default();
    metric.set_label(labels.into());

    match record.value {
        MetricValue::Gauge(value) => {
            let mut gauge = proto::Gauge::default();
            gauge.set_value(value);
            metric.set_gauge(gauge);
        }
        MetricValue::Counter(value) => {
            let mut counter = proto::Counter::default();
            counter.set_value(value);
            metric.set_counter(counter);
        }
        MetricValue::Summary { count, sum } => {
            let mut summary = proto::Summary::default();
            summary.set_sample_count(count);
            summary.set_sample_sum(sum);
            metric.set_summary(summary);
        }
    }

    metric
}

/// Text exposition of `records` followed by everything in `registry`.
pub fn encode(records: &[MetricRecord], registry: &Registry) -> prometheus::Result<String> {
    let mut all = families(records);
    all.extend(registry.gather());

    let mut buffer = Vec::new();
    TextEncoder::new().encode(&all, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}

pub fn content_type() -> String {
    TextEncoder::new().format_type().to_string()
}
