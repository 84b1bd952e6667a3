use crate::{
    collectors::collector::{
        CollectResult,
        Collector,
    },
    metrics::{
        descriptors,
        node_stats::JvmStats,
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

pub struct JvmCollector;

impl JvmCollector {
    pub fn map(jvm: &JvmStats) -> CollectResult {
        let d = &descriptors().jvm;
        let mem = &jvm.mem;

        let mut records = vec![
            MetricRecord::gauge(&d.threads_count, jvm.threads.count as f64, &[])?,
            MetricRecord::gauge(&d.heap_used_ratio, percent_to_ratio(mem.heap_used_percent as f64), &[])?,
            MetricRecord::gauge(&d.heap_committed_bytes, mem.heap_committed_in_bytes as f64, &[])?,
            MetricRecord::gauge(&d.heap_used_bytes, mem.heap_used_in_bytes as f64, &[])?,
        ];

        let pools = [
            ("young", &mem.pools.young),
            ("survivor", &mem.pools.survivor),
            ("old", &mem.pools.old),
        ];
        for (pool, stats) in pools {
            records.push(MetricRecord::gauge(&d.pool_used_bytes, stats.used_in_bytes as f64, &[pool])?);
        }
        for (pool, stats) in pools {
            records.push(MetricRecord::gauge(
                &d.pool_committed_bytes,
                stats.committed_in_bytes as f64,
                &[pool],
            )?);
        }
        for (pool, stats) in pools {
            records.push(MetricRecord::gauge(&d.pool_max_bytes, stats.max_in_bytes as f64, &[pool])?);
        }

        let collectors = &jvm.gc.collectors;
        for (name, gc) in [("young", &collectors.young), ("old", &collectors.old)] {
            records.push(MetricRecord::summary(
                &d.gc_collection,
                gc.collection_count,
                millis_to_seconds(gc.collection_time_in_millis),
                &[name],
            )?);
        }

        Ok(records)
    }
}

impl Collector for JvmCollector {
    fn collect<'a>(&'a self, stats: &'a NodeStats) -> Pin<Box<dyn Future<Output = CollectResult> + Send + 'a>> {
        Box::pin(ready(Self::map(&stats.jvm)))
    }

    fn name(&self) -> &'static str {
        "jvm"
    }
}
