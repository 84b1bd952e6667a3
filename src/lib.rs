//! # Logstash Exporter
//!
//! Polls the Logstash monitoring API and republishes its nested node stats as
//! flat, labeled Prometheus metrics.
//!
//! ## Architecture
//!
//! - **`config`**: Configuration management and URL validation
//! - **`client`**: `StatsFetcher`, one GET per document against Logstash
//! - **`metrics`**: The decoded stats documents, descriptors and metric records
//! - **`collectors`**: Self-contained mappers plus the `Orchestrator` that runs them
//! - **`sink`**: The concurrent-append channel a scrape writes its records into
//! - **`exposition`**: Prometheus text rendering of a scrape
//! - **`server`**: The `/metrics`, `/-/ping` and `/-/health` endpoints
//!
//! ## Scrape flow
//!
//! A read of `/metrics` triggers `Orchestrator::collect`: the node stats are
//! fetched once, every sub-collector maps the same snapshot concurrently, and
//! the resulting records plus the exporter's own bookkeeping land in one sink.
//!
//! ## Usage
//!
//! ```bash
//! logstash-exporter --logstash-url=http://localhost:9600 --listen-address=0.0.0.0:2112
//!
//! # or from a file, with LOGSTASH_EXPORTER_* overrides
//! logstash-exporter --config=exporter.yaml
//! ```

#[macro_use]
extern crate tracing;

pub mod client;
pub mod collectors;
pub mod config;
pub mod error;
pub mod exposition;
pub mod metrics;
pub mod server;
pub mod sink;

pub use client::StatsFetcher;
pub use collectors::*;
pub use config::Config;
pub use error::ScrapeError;
pub use metrics::*;
pub use sink::{
    MetricBatch,
    MetricSink,
};
