use crate::{
    client::StatsFetcher,
    collectors::{
        Collector,
        EventCollector,
        InfoCollector,
        JvmCollector,
        NodeInfoCollector,
        PipelineConfigCollector,
        PipelinesCollector,
        ProcessCollector,
        ReloadsConfigCollector,
    },
    config::Config,
    error::ScrapeError,
    metrics::{
        descriptors,
        MetricRecord,
        NodeStats,
        NAMESPACE,
    },
    sink::MetricSink,
};
use eyre::Result;
use prometheus::{
    Gauge,
    GaugeVec,
    HistogramOpts,
    HistogramVec,
    IntCounter,
    Opts,
    Registry,
};
use std::{
    sync::Arc,
    time::{
        Duration,
        Instant,
    },
};
use tokio::{
    sync::Mutex,
    task::JoinSet,
};

const RESULT_SUCCESS: &str = "success";
const RESULT_ERROR: &str = "error";

/// Exporter self-monitoring that survives between scrapes.
struct ScrapeBookkeeping {
    up: Gauge,
    total_scrapes: IntCounter,
    json_parse_failures: IntCounter,
    scrape_failures: IntCounter,
    collector_duration: HistogramVec,
}

impl ScrapeBookkeeping {
    fn new(registry: &Registry) -> Result<Self> {
        let d = &descriptors().exporter;
        let collector_duration = HistogramVec::new(
            HistogramOpts::new(
                "collector_duration_seconds",
                "Time spent by each sub-collector during a scrape.",
            )
            .namespace(NAMESPACE)
            .subsystem("exporter"),
            &["collector", "result"],
        )?;
        registry.register(Box::new(collector_duration.clone()))?;

        let build_info = GaugeVec::new(
            Opts::new("build_info", "A metric with a constant '1' value labeled by the exporter version.")
                .namespace(NAMESPACE)
                .subsystem("exporter"),
            &["version"],
        )?;
        build_info.with_label_values(&[env!("CARGO_PKG_VERSION")]).set(1.0);
        registry.register(Box::new(build_info))?;

        Ok(Self {
            up: Gauge::new(d.up.fq_name(), d.up.help())?,
            total_scrapes: IntCounter::new(d.total_scrapes.fq_name(), d.total_scrapes.help())?,
            json_parse_failures: IntCounter::new(d.json_parse_failures.fq_name(), d.json_parse_failures.help())?,
            scrape_failures: IntCounter::new(d.scrape_failures.fq_name(), d.scrape_failures.help())?,
            collector_duration,
        })
    }

    fn records(&self) -> Result<Vec<MetricRecord>, ScrapeError> {
        let d = &descriptors().exporter;
        Ok(vec![
            MetricRecord::gauge(&d.up, self.up.get(), &[])?,
            MetricRecord::counter(&d.total_scrapes, self.total_scrapes.get() as f64, &[])?,
            MetricRecord::counter(&d.json_parse_failures, self.json_parse_failures.get() as f64, &[])?,
            MetricRecord::counter(&d.scrape_failures, self.scrape_failures.get() as f64, &[])?,
        ])
    }
}

/// What one sub-collector task reports back to the join.
struct CollectorOutcome {
    /// Position in the registration list; names need not be unique.
    idx: usize,
    name: &'static str,
    elapsed: Duration,
    result: Result<usize, ScrapeError>,
}

/// Fetches one stats snapshot per scrape and fans it out to every registered
/// sub-collector.
///
/// Scrapes are serialized: at most one request against Logstash is in flight
/// no matter how many readers hit the exposition endpoint at once. Within a
/// scrape the sub-collectors run as parallel tasks over the same immutable
/// snapshot, and a failing collector only loses its own records.
pub struct Orchestrator {
    fetcher: StatsFetcher,
    collectors: Vec<Arc<dyn Collector>>,
    bookkeeping: ScrapeBookkeeping,
    registry: Registry,
    scrape_lock: Mutex<()>,
}

impl Orchestrator {
    /// Create an orchestrator with all available collectors
    pub fn new(config: &Config) -> Result<Self> {
        let fetcher = StatsFetcher::new(config)?;
        let collectors: Vec<Arc<dyn Collector>> = vec![
            Arc::new(InfoCollector),
            Arc::new(NodeInfoCollector::new(fetcher.clone())),
            Arc::new(JvmCollector),
            Arc::new(ProcessCollector),
            Arc::new(EventCollector),
            Arc::new(PipelinesCollector),
            Arc::new(PipelineConfigCollector),
            Arc::new(ReloadsConfigCollector),
        ];
        Self::with_collectors(fetcher, collectors)
    }

    pub fn with_collectors(fetcher: StatsFetcher, collectors: Vec<Arc<dyn Collector>>) -> Result<Self> {
        let registry = Registry::new();
        let bookkeeping = ScrapeBookkeeping::new(&registry)?;

        Ok(Self {
            fetcher,
            collectors,
            bookkeeping,
            registry,
            scrape_lock: Mutex::new(()),
        })
    }

    pub fn collector_names(&self) -> Vec<&'static str> {
        self.collectors.iter().map(|c| c.name()).collect()
    }

    /// The exporter's own live metrics (collector durations, build info).
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Run one complete scrape and write every record into `sink`.
    ///
    /// Never fails: an unreachable or misbehaving Logstash is reported through
    /// `logstash_up` and the failure counters.
    pub async fn collect(&self, sink: &MetricSink) {
        let _guard = self.scrape_lock.lock().await;
        let started = Instant::now();

        self.bookkeeping.total_scrapes.inc();

        match self.fetcher.node_stats().await {
            Ok(stats) => {
                self.bookkeeping.up.set(1.0);
                self.run_collectors(Arc::new(stats), sink).await;
            }
            Err(err) => {
                warn!(error = %err, "can't scrape Logstash");
                if err.is_decode() {
                    self.bookkeeping.json_parse_failures.inc();
                }
                self.bookkeeping.scrape_failures.inc();
                self.bookkeeping.up.set(0.0);
            }
        }

        match self.bookkeeping.records() {
            Ok(records) => sink.send_all(records),
            Err(err) => error!(error = %err, "failed to build exporter metrics"),
        }

        debug!(elapsed = ?started.elapsed(), "scrape finished");
    }

    async fn run_collectors(&self, stats: Arc<NodeStats>, sink: &MetricSink) {
        let fan_out = Instant::now();
        let mut tasks = JoinSet::new();

        for (idx, collector) in self.collectors.iter().enumerate() {
            let collector = Arc::clone(collector);
            let stats = Arc::clone(&stats);
            let sink = sink.clone();

            tasks.spawn(async move {
                let start = Instant::now();
                let result = collector.collect(&stats).await.map(|records| {
                    let count = records.len();
                    sink.send_all(records);
                    count
                });
                CollectorOutcome {
                    idx,
                    name: collector.name(),
                    elapsed: start.elapsed(),
                    result,
                }
            });
        }

        let mut outcomes = Vec::with_capacity(self.collectors.len());
        let mut reported = vec![false; self.collectors.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => {
                    reported[outcome.idx] = true;
                    outcomes.push(outcome);
                }
                Err(err) => error!(error = %err, "collector task did not complete"),
            }
        }

        for outcome in &outcomes {
            match &outcome.result {
                Ok(count) => {
                    trace!(collector = outcome.name, records = count, elapsed = ?outcome.elapsed, "collector finished");
                    self.observe(outcome.name, RESULT_SUCCESS, outcome.elapsed);
                }
                Err(err) => {
                    error!(collector = outcome.name, error = %err, "collector failed");
                    if err.is_decode() {
                        self.bookkeeping.json_parse_failures.inc();
                    }
                    self.observe(outcome.name, RESULT_ERROR, outcome.elapsed);
                }
            }
        }

        // A task that panicked never reported back; account for it as an error.
        for (collector, _) in self.collectors.iter().zip(&reported).filter(|(_, done)| !**done) {
            self.observe(collector.name(), RESULT_ERROR, fan_out.elapsed());
        }
    }

    fn observe(&self, collector: &str, result: &str, elapsed: Duration) {
        self.bookkeeping
            .collector_duration
            .with_label_values(&[collector, result])
            .observe(elapsed.as_secs_f64());
    }
}
