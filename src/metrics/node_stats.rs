//! Typed view of the `GET /_node/stats` document.
//!
//! Every numeric field defaults to zero when Logstash omits it, which it does
//! for plugins that have not processed anything yet and for persisted-queue
//! sections of in-memory pipelines.
//!
//! Counters are signed. Logstash reports `-1` for limits the JVM does not
//! define, such as the maximum of the G1 eden and survivor pools.

use serde::{
    Deserialize,
    Serialize,
};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeStats {
    pub host: String,
    pub version: String,
    pub http_address: String,
    pub id: String,
    pub name: String,
    pub ephemeral_id: String,
    pub status: String,
    pub pipeline: PipelineConfig,
    pub reloads: ReloadsStats,
    pub jvm: JvmStats,
    pub process: ProcessStats,
    pub events: EventStats,
    pub pipelines: HashMap<String, PipelineStats>,
}

impl NodeStats {
    pub fn status(&self) -> NodeStatus {
        NodeStatus::from(self.status.as_str())
    }
}

/// Node health as reported by Logstash. Anything that is not green or yellow
/// is treated as the worst case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStatus {
    Green,
    Yellow,
    Other,
}

impl From<&str> for NodeStatus {
    fn from(status: &str) -> Self {
        match status {
            "green" => NodeStatus::Green,
            "yellow" => NodeStatus::Yellow,
            _ => NodeStatus::Other,
        }
    }
}

impl NodeStatus {
    pub fn as_value(self) -> f64 {
        match self {
            NodeStatus::Green => 0.0,
            NodeStatus::Yellow => 1.0,
            NodeStatus::Other => 2.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub workers: i64,
    pub batch_size: i64,
    /// Milliseconds.
    pub batch_delay: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReloadsStats {
    pub failures: i64,
    pub successes: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventStats {
    #[serde(rename = "in")]
    pub in_: i64,
    pub filtered: i64,
    pub out: i64,
    pub duration_in_millis: i64,
    pub queue_push_duration_in_millis: i64,
}

// -=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-
// JVM

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JvmStats {
    pub threads: ThreadStats,
    pub mem: JvmMemStats,
    pub gc: GcStats,
    pub uptime_in_millis: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreadStats {
    pub count: i64,
    pub peak_count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JvmMemStats {
    pub heap_used_percent: i64,
    pub heap_committed_in_bytes: i64,
    pub heap_used_in_bytes: i64,
    pub heap_max_in_bytes: i64,
    pub pools: MemPools,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemPools {
    pub young: MemPool,
    pub survivor: MemPool,
    pub old: MemPool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemPool {
    pub used_in_bytes: i64,
    pub committed_in_bytes: i64,
    pub max_in_bytes: i64,
    pub peak_used_in_bytes: i64,
    pub peak_max_in_bytes: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GcStats {
    pub collectors: GcCollectors,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GcCollectors {
    pub young: GcCollector,
    pub old: GcCollector,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GcCollector {
    pub collection_count: u64,
    pub collection_time_in_millis: i64,
}

// -=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-
// Process

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessStats {
    /// `-1` on platforms where Logstash cannot read descriptor counts.
    pub open_file_descriptors: i64,
    pub peak_open_file_descriptors: i64,
    pub max_file_descriptors: i64,
    pub mem: ProcessMemStats,
    pub cpu: CpuStats,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessMemStats {
    pub total_virtual_in_bytes: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CpuStats {
    pub total_in_millis: i64,
    pub percent: f64,
    pub load_average: LoadAverage,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadAverage {
    #[serde(rename = "1m")]
    pub one: f64,
    #[serde(rename = "5m")]
    pub five: f64,
    #[serde(rename = "15m")]
    pub fifteen: f64,
}

// -=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-
// Pipelines

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineStats {
    pub events: EventStats,
    pub plugins: PluginStats,
    pub queue: QueueStats,
    pub dead_letter_queue: DeadLetterQueueStats,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginStats {
    pub inputs: Vec<InputPlugin>,
    pub filters: Vec<FilterPlugin>,
    pub outputs: Vec<OutputPlugin>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueStats {
    #[serde(rename = "type")]
    pub queue_type: String,
    pub events_count: i64,
    pub queue_size_in_bytes: i64,
    pub max_queue_size_in_bytes: i64,
    pub capacity: QueueCapacity,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueCapacity {
    pub max_unread_events: i64,
    pub max_queue_size_in_bytes: i64,
    pub page_capacity_in_bytes: i64,
    pub queue_size_in_bytes: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeadLetterQueueStats {
    pub dropped_events: i64,
    pub expired_events: i64,
    pub max_queue_size_in_bytes: i64,
    pub queue_size_in_bytes: i64,
    pub last_error: String,
    pub storage_policy: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginEvents {
    #[serde(rename = "in")]
    pub in_: i64,
    pub out: i64,
    pub duration_in_millis: i64,
    pub queue_push_duration_in_millis: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputPlugin {
    pub id: String,
    pub name: String,
    pub current_connections: i64,
    pub events: PluginEvents,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterPlugin {
    pub id: String,
    pub name: String,
    pub events: PluginEvents,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputPlugin {
    pub id: String,
    pub name: String,
    pub events: PluginEvents,
    pub documents: DocumentStats,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentStats {
    pub successes: i64,
    pub non_retryable_failures: i64,
}
