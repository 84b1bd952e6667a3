use crate::{
    collectors::collector::{
        CollectResult,
        Collector,
    },
    metrics::{
        descriptors,
        node_stats::ProcessStats,
        shared::{
            millis_to_seconds,
            percent_to_ratio,
        },
        MetricRecord,
        NodeStats,
    },
};
use futures::future::ready;
use std::{
    future::Future,
    pin::Pin,
};

pub struct ProcessCollector;

impl ProcessCollector {
    pub fn map(process: &ProcessStats) -> CollectResult {
        let d = &descriptors().process;
        let cpu = &process.cpu;

        let mut records = vec![
            MetricRecord::gauge(&d.open_file_descriptors, process.open_file_descriptors as f64, &[])?,
            MetricRecord::gauge(&d.max_file_descriptors, process.max_file_descriptors as f64, &[])?,
            MetricRecord::gauge(&d.total_virtual_memory_bytes, process.mem.total_virtual_in_bytes as f64, &[])?,
            MetricRecord::counter(&d.cpu_time_seconds, millis_to_seconds(cpu.total_in_millis), &[])?,
            MetricRecord::gauge(&d.cpu_usage_ratio, percent_to_ratio(cpu.percent), &[])?,
        ];

        let load = &cpu.load_average;
        for (window, value) in [("1", load.one), ("5", load.five), ("15", load.fifteen)] {
            records.push(MetricRecord::gauge(&d.load_average, value, &[window])?);
        }

        Ok(records)
    }
}

impl Collector for ProcessCollector {
    fn collect<'a>(&'a self, stats: &'a NodeStats) -> Pin<Box<dyn Future<Output = CollectResult> + Send + 'a>> {
        Box::pin(ready(Self::map(&stats.process)))
    }

    fn name(&self) -> &'static str {
        "process"
    }
}

#[cfg(test)]
mod test {
    use super::ProcessCollector;
    use crate::metrics::{
        node_stats::ProcessStats,
        MetricValue,
    };
    use pretty_assertions::assert_eq;

    fn process() -> ProcessStats {
        serde_json::from_value(serde_json::json!({
            "open_file_descriptors": 112,
            "max_file_descriptors": 1048576,
            "mem": { "total_virtual_in_bytes": 7_245_692_928_u64 },
            "cpu": {
                "total_in_millis": 81_500,
                "percent": 4,
                "load_average": { "1m": 0.5, "5m": 0.75, "15m": 1.25 }
            }
        }))
        .unwrap()
    }

    #[test]
    fn converts_units() {
        let records = ProcessCollector::map(&process()).unwrap();
        assert_eq!(records.len(), 8);

        let cpu_time = records.iter().find(|r| r.name() == "logstash_process_process_time_seconds").unwrap();
        assert_eq!(cpu_time.value, MetricValue::Counter(81.5));

        let cpu_ratio = records.iter().find(|r| r.name() == "logstash_process_cpu_usage_ratio").unwrap();
        assert_eq!(cpu_ratio.value, MetricValue::Gauge(0.04));
    }

    #[test]
    fn load_average_is_labeled_by_window() {
        let records = ProcessCollector::map(&process()).unwrap();
        let loads: Vec<_> = records
            .iter()
            .filter(|r| r.name() == "logstash_process_load_average")
            .map(|r| (r.labels[0].as_str(), r.sample()))
            .collect();
        assert_eq!(loads, [("1", 0.5), ("5", 0.75), ("15", 1.25)]);
    }

    #[test]
    fn unavailable_descriptor_counts_pass_through() {
        let process: ProcessStats = serde_json::from_value(serde_json::json!({
            "open_file_descriptors": -1,
            "max_file_descriptors": -1
        }))
        .unwrap();
        let records = ProcessCollector::map(&process).unwrap();
        assert_eq!(records[0].sample(), -1.0);
    }
}
