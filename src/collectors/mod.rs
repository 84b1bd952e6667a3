//! # Collectors Module
//!
//! Mapping from the Logstash stats document to flat metric records.
//!
//! ## Architecture
//!
//! - **`Collector` trait**: Defines the interface for all sub-collectors
//! - **`InfoCollector`**: Node identity (`logstash_info`) and health (`logstash_status`)
//! - **`NodeInfoCollector`**: Node, OS and JVM facts from `GET /_node/`
//! - **`JvmCollector`**: Threads, heap, memory pools and GC summaries
//! - **`ProcessCollector`**: File descriptors, memory, CPU and load averages
//! - **`EventCollector`**: Node-wide event totals
//! - **`PipelinesCollector`**: Per-pipeline events, queues and plugins
//! - **`PipelineConfigCollector`** / **`ReloadsConfigCollector`**: Pipeline settings and reload counters
//! - **`Orchestrator`**: Fetches the snapshot once and runs every collector concurrently against it
//!
//! Every mapping collector is a pure function of its slice of the snapshot and
//! can be called directly through its `map` function.

pub mod collector;
pub mod config_collector;
pub mod event_collector;
pub mod info_collector;
pub mod jvm_collector;
pub mod node_info_collector;
pub mod orchestrator;
pub mod pipelines_collector;
pub mod process_collector;

// Re-export the main types for easy access
pub use collector::{
    CollectResult,
    Collector,
};
pub use config_collector::{
    PipelineConfigCollector,
    ReloadsConfigCollector,
};
pub use event_collector::EventCollector;
pub use info_collector::InfoCollector;
pub use jvm_collector::JvmCollector;
pub use node_info_collector::NodeInfoCollector;
pub use orchestrator::Orchestrator;
pub use pipelines_collector::PipelinesCollector;
pub use process_collector::ProcessCollector;
