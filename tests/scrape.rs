use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Router,
};
use logstash_exporter::{
    descriptors,
    exposition,
    server::{
        create_router,
        HealthResponse,
    },
    sink,
    CollectResult,
    Collector,
    Config,
    JvmCollector,
    MetricRecord,
    NodeStats,
    Orchestrator,
    ScrapeError,
    StatsFetcher,
};
use pretty_assertions::assert_eq;
use std::{
    future::Future,
    net::SocketAddr,
    pin::Pin,
    sync::{
        Arc,
        RwLock,
    },
    time::Duration,
};
use tokio::net::TcpListener;

const NODE_STATS: &str = include_str!("fixtures/node_stats.json");

const NODE_INFO: &str = r#"{
  "host": "ls-01.internal",
  "version": "8.13.0",
  "http_address": "127.0.0.1:9600",
  "id": "5a1c0b2e-7f3d-4c59-9a6e-0d3b8e1f4a27",
  "name": "ls-01",
  "os": {
    "name": "Linux",
    "arch": "amd64",
    "version": "6.1.0-18-cloud-amd64",
    "available_processors": 8
  },
  "jvm": {
    "pid": 1,
    "version": "17.0.10",
    "vm_name": "OpenJDK 64-Bit Server VM",
    "vm_version": "17.0.10+7",
    "vm_vendor": "Eclipse Adoptium"
  }
}"#;

type Reply = Arc<RwLock<(StatusCode, String)>>;

/// A stand-in for the Logstash monitoring API whose replies can be swapped
/// between scrapes.
#[derive(Clone)]
struct MockLogstash {
    stats: Reply,
    info: Reply,
}

impl MockLogstash {
    fn healthy() -> Self {
        Self {
            stats: Arc::new(RwLock::new((StatusCode::OK, NODE_STATS.to_string()))),
            info: Arc::new(RwLock::new((StatusCode::OK, NODE_INFO.to_string()))),
        }
    }

    fn set_stats(&self, status: StatusCode, body: &str) {
        *self.stats.write().unwrap() = (status, body.to_string());
    }

    fn set_info(&self, status: StatusCode, body: &str) {
        *self.info.write().unwrap() = (status, body.to_string());
    }

    async fn spawn(&self) -> Config {
        let app = Router::new()
            .route("/_node/stats", get(node_stats))
            .route("/_node/", get(node_info))
            .with_state(self.clone());
        let addr = serve(app).await;

        Config::new(
            &format!("http://{addr}/"),
            "127.0.0.1:0".parse().unwrap(),
            Duration::from_secs(2),
        )
        .unwrap()
    }
}

async fn node_stats(State(mock): State<MockLogstash>) -> (StatusCode, String) {
    mock.stats.read().unwrap().clone()
}

async fn node_info(State(mock): State<MockLogstash>) -> (StatusCode, String) {
    mock.info.read().unwrap().clone()
}

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn scrape(orchestrator: &Orchestrator) -> Vec<MetricRecord> {
    let (sink, mut batch) = sink::channel();
    orchestrator.collect(&sink).await;
    batch.drain()
}

fn value_of(records: &[MetricRecord], name: &str) -> Option<f64> {
    records.iter().find(|r| r.name() == name).map(|r| r.sample())
}

fn has(records: &[MetricRecord], name: &str) -> bool {
    records.iter().any(|r| r.name() == name)
}

fn sorted(mut records: Vec<MetricRecord>) -> Vec<MetricRecord> {
    records.sort_by(|a, b| (a.name(), &a.labels).cmp(&(b.name(), &b.labels)));
    records
}

const BOOKKEEPING: [&str; 4] = [
    "logstash_up",
    "logstash_exporter_total_scrapes",
    "logstash_exporter_json_parse_failures",
    "logstash_exporter_scrape_failures",
];

#[tokio::test]
async fn healthy_scrape_runs_every_collector() {
    let config = MockLogstash::healthy().spawn().await;
    let orchestrator = Orchestrator::new(&config).unwrap();

    let records = scrape(&orchestrator).await;

    assert_eq!(value_of(&records, "logstash_up"), Some(1.0));
    assert_eq!(value_of(&records, "logstash_exporter_scrape_failures"), Some(0.0));
    assert_eq!(value_of(&records, "logstash_exporter_json_parse_failures"), Some(0.0));

    for name in [
        "logstash_info",
        "logstash_status",
        "logstash_info_node",
        "logstash_info_os",
        "logstash_info_jvm",
        "logstash_jvm_threads_count",
        "logstash_jvm_gc_collection_duration_seconds",
        "logstash_process_open_file_descriptors",
        "logstash_event_in_total",
        "logstash_pipeline_event_in_total",
        "logstash_pipeline_filter_duration_seconds_total",
    ] {
        assert!(has(&records, name), "missing {name}");
    }

    let os = records.iter().find(|r| r.name() == "logstash_info_os").unwrap();
    assert_eq!(os.label("available_processors"), Some("8"));
    assert_eq!(os.label("arch"), Some("amd64"));
}

#[tokio::test]
async fn repeated_scrapes_only_move_the_scrape_counter() {
    let config = MockLogstash::healthy().spawn().await;
    let orchestrator = Orchestrator::new(&config).unwrap();

    let first = scrape(&orchestrator).await;
    let second = scrape(&orchestrator).await;

    assert_eq!(value_of(&first, "logstash_exporter_total_scrapes"), Some(1.0));
    assert_eq!(value_of(&second, "logstash_exporter_total_scrapes"), Some(2.0));

    let without_counter = |records: Vec<MetricRecord>| {
        sorted(
            records
                .into_iter()
                .filter(|r| r.name() != "logstash_exporter_total_scrapes")
                .collect(),
        )
    };
    assert_eq!(without_counter(first), without_counter(second));
}

#[tokio::test]
async fn g1_pools_without_a_max_still_scrape() {
    let mut raw: serde_json::Value = serde_json::from_str(NODE_STATS).unwrap();
    for pool in ["young", "survivor"] {
        raw["jvm"]["mem"]["pools"][pool]["max_in_bytes"] = serde_json::json!(-1);
        raw["jvm"]["mem"]["pools"][pool]["peak_max_in_bytes"] = serde_json::json!(-1);
    }
    let mock = MockLogstash::healthy();
    mock.set_stats(StatusCode::OK, &raw.to_string());
    let config = mock.spawn().await;
    let orchestrator = Orchestrator::new(&config).unwrap();

    let records = scrape(&orchestrator).await;

    assert_eq!(value_of(&records, "logstash_up"), Some(1.0));
    assert_eq!(value_of(&records, "logstash_exporter_json_parse_failures"), Some(0.0));
    let maxima: Vec<_> = records
        .iter()
        .filter(|r| r.name() == "logstash_jvm_memory_pool_max_bytes")
        .map(|r| (r.label("pool").unwrap(), r.sample()))
        .collect();
    assert_eq!(maxima, [("young", -1.0), ("survivor", -1.0), ("old", 724_828_160.0)]);
}

#[tokio::test]
async fn non_200_stats_reports_down_without_mapped_records() {
    let mock = MockLogstash::healthy();
    mock.set_stats(StatusCode::SERVICE_UNAVAILABLE, "");
    let config = mock.spawn().await;
    let orchestrator = Orchestrator::new(&config).unwrap();

    let records = scrape(&orchestrator).await;

    let values: Vec<_> = records.iter().map(|r| (r.name(), r.sample())).collect();
    assert_eq!(
        values,
        [
            ("logstash_up", 0.0),
            ("logstash_exporter_total_scrapes", 1.0),
            ("logstash_exporter_json_parse_failures", 0.0),
            ("logstash_exporter_scrape_failures", 1.0),
        ]
    );
}

#[tokio::test]
async fn truncated_stats_counts_a_parse_failure() {
    let mock = MockLogstash::healthy();
    mock.set_stats(StatusCode::OK, &NODE_STATS[..NODE_STATS.len() / 2]);
    let config = mock.spawn().await;
    let orchestrator = Orchestrator::new(&config).unwrap();

    let records = scrape(&orchestrator).await;

    assert_eq!(records.len(), BOOKKEEPING.len());
    assert_eq!(value_of(&records, "logstash_up"), Some(0.0));
    assert_eq!(value_of(&records, "logstash_exporter_json_parse_failures"), Some(1.0));
    assert_eq!(value_of(&records, "logstash_exporter_scrape_failures"), Some(1.0));
}

#[tokio::test]
async fn recovery_after_an_outage_brings_up_back() {
    let mock = MockLogstash::healthy();
    mock.set_stats(StatusCode::BAD_GATEWAY, "");
    let config = mock.spawn().await;
    let orchestrator = Orchestrator::new(&config).unwrap();

    let down = scrape(&orchestrator).await;
    assert_eq!(value_of(&down, "logstash_up"), Some(0.0));

    mock.set_stats(StatusCode::OK, NODE_STATS);
    let up = scrape(&orchestrator).await;
    assert_eq!(value_of(&up, "logstash_up"), Some(1.0));
    assert_eq!(value_of(&up, "logstash_exporter_scrape_failures"), Some(1.0));
    assert!(has(&up, "logstash_jvm_threads_count"));
}

#[tokio::test]
async fn node_info_failure_is_isolated() {
    let mock = MockLogstash::healthy();
    mock.set_info(StatusCode::OK, "{\"os\": ");
    let config = mock.spawn().await;
    let orchestrator = Orchestrator::new(&config).unwrap();

    let records = scrape(&orchestrator).await;

    assert_eq!(value_of(&records, "logstash_up"), Some(1.0));
    assert_eq!(value_of(&records, "logstash_exporter_json_parse_failures"), Some(1.0));
    assert_eq!(value_of(&records, "logstash_exporter_scrape_failures"), Some(0.0));
    assert!(!has(&records, "logstash_info_node"));
    assert!(has(&records, "logstash_info"));
    assert!(has(&records, "logstash_pipeline_event_in_total"));

    let text = exposition::encode(&records, orchestrator.registry()).unwrap();
    assert!(text.contains(
        "logstash_exporter_collector_duration_seconds_count{collector=\"node_info\",result=\"error\"} 1"
    ));
    assert!(text.contains("logstash_exporter_collector_duration_seconds_count{collector=\"jvm\",result=\"success\"} 1"));
}

struct FailingCollector;

impl Collector for FailingCollector {
    fn collect<'a>(&'a self, _stats: &'a NodeStats) -> Pin<Box<dyn Future<Output = CollectResult> + Send + 'a>> {
        Box::pin(futures::future::ready(Err(ScrapeError::Cardinality {
            metric: "logstash_broken".into(),
            expected: 1,
            got: 0,
        })))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

struct PanickingCollector;

impl Collector for PanickingCollector {
    fn collect<'a>(&'a self, _stats: &'a NodeStats) -> Pin<Box<dyn Future<Output = CollectResult> + Send + 'a>> {
        Box::pin(futures::future::lazy(|_| -> CollectResult { panic!("collector blew up") }))
    }

    fn name(&self) -> &'static str {
        "panicking"
    }
}

#[tokio::test]
async fn failing_collectors_do_not_take_others_down() {
    let config = MockLogstash::healthy().spawn().await;
    let collectors: Vec<Arc<dyn Collector>> = vec![
        Arc::new(FailingCollector),
        Arc::new(JvmCollector),
        Arc::new(PanickingCollector),
    ];
    let orchestrator = Orchestrator::with_collectors(StatsFetcher::new(&config).unwrap(), collectors).unwrap();

    let records = scrape(&orchestrator).await;

    assert_eq!(value_of(&records, "logstash_up"), Some(1.0));
    assert_eq!(value_of(&records, "logstash_exporter_json_parse_failures"), Some(0.0));
    assert_eq!(value_of(&records, "logstash_jvm_threads_count"), Some(58.0));
    assert!(!has(&records, "logstash_broken"));

    let text = exposition::encode(&records, orchestrator.registry()).unwrap();
    assert!(text.contains(
        "logstash_exporter_collector_duration_seconds_count{collector=\"failing\",result=\"error\"} 1"
    ));
    assert!(text.contains(
        "logstash_exporter_collector_duration_seconds_count{collector=\"panicking\",result=\"error\"} 1"
    ));
}

#[tokio::test]
async fn concurrent_scrapes_on_one_sink_do_not_interleave() {
    let config = MockLogstash::healthy().spawn().await;
    let orchestrator = Orchestrator::new(&config).unwrap();
    let per_scrape = scrape(&orchestrator).await.len();

    let (sink, mut batch) = sink::channel();
    tokio::join!(orchestrator.collect(&sink), orchestrator.collect(&sink));
    let records = batch.drain();

    assert_eq!(records.len(), 2 * per_scrape);
    let (first, second) = records.split_at(per_scrape);
    for (half, total) in [(first, 2.0), (second, 3.0)] {
        let tail: Vec<_> = half[per_scrape - BOOKKEEPING.len()..].iter().map(|r| r.name()).collect();
        assert_eq!(tail, BOOKKEEPING);
        assert_eq!(value_of(half, "logstash_exporter_total_scrapes"), Some(total));
        assert_eq!(
            half.iter().filter(|r| r.name() == "logstash_exporter_total_scrapes").count(),
            1
        );
    }
}

#[tokio::test]
async fn http_endpoints() {
    let config = MockLogstash::healthy().spawn().await;
    let orchestrator = Arc::new(Orchestrator::new(&config).unwrap());
    let addr = serve(create_router(orchestrator)).await;
    let client = reqwest::Client::new();

    let response = client.get(format!("http://{addr}/metrics")).send().await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let content_type = response.headers()[reqwest::header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/plain"));
    let body = response.text().await.unwrap();
    assert!(body.contains("logstash_up 1"));
    assert!(body.contains("# TYPE logstash_jvm_gc_collection_duration_seconds summary"));
    assert!(body.contains("logstash_jvm_gc_collection_duration_seconds_count{collector=\"young\"} 61"));
    assert!(body.contains(&format!(
        "logstash_exporter_build_info{{version=\"{}\"}} 1",
        env!("CARGO_PKG_VERSION")
    )));

    let ping = client.get(format!("http://{addr}/-/ping")).send().await.unwrap();
    assert_eq!(ping.status(), reqwest::StatusCode::OK);

    let health: HealthResponse = client
        .get(format!("http://{addr}/-/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health.status, "OK");
}

#[test]
fn descriptor_table_covers_bookkeeping() {
    let d = &descriptors().exporter;
    let names = [
        d.up.fq_name(),
        d.total_scrapes.fq_name(),
        d.json_parse_failures.fq_name(),
        d.scrape_failures.fq_name(),
    ];
    assert_eq!(names, BOOKKEEPING);
}
