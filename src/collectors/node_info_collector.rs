use crate::{
    client::StatsFetcher,
    collectors::collector::{
        CollectResult,
        Collector,
    },
    metrics::{
        descriptors,
        MetricRecord,
        NodeInfo,
        NodeStats,
    },
};
use std::{
    future::Future,
    pin::Pin,
};

/// Static facts about the node, its OS and its JVM from `GET /_node/`.
///
/// This is the only collector with its own request, so it is also the only one
/// that can fail on connectivity while the stats scrape succeeds.
pub struct NodeInfoCollector {
    fetcher: StatsFetcher,
}

impl NodeInfoCollector {
    pub fn new(fetcher: StatsFetcher) -> Self {
        Self { fetcher }
    }

    pub fn map(info: &NodeInfo) -> CollectResult {
        let d = &descriptors().node_info;
        let processors = info.os.available_processors.to_string();

        Ok(vec![
            MetricRecord::gauge(&d.node, 1.0, &[info.version.as_str()])?,
            MetricRecord::gauge(
                &d.os,
                1.0,
                &[
                    info.os.name.as_str(),
                    info.os.arch.as_str(),
                    info.os.version.as_str(),
                    processors.as_str(),
                ],
            )?,
            MetricRecord::gauge(
                &d.jvm,
                1.0,
                &[
                    info.jvm.vm_name.as_str(),
                    info.jvm.vm_version.as_str(),
                    info.jvm.vm_vendor.as_str(),
                ],
            )?,
        ])
    }
}

impl Collector for NodeInfoCollector {
    fn collect<'a>(&'a self, _stats: &'a NodeStats) -> Pin<Box<dyn Future<Output = CollectResult> + Send + 'a>> {
        Box::pin(async move {
            let info = self.fetcher.node_info().await?;
            Self::map(&info)
        })
    }

    fn name(&self) -> &'static str {
        "node_info"
    }
}
