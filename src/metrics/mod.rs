//! # Metrics Module
//!
//! Data structures on both sides of the mapping:
//!
//! - **`node_stats`**: the decoded `GET /_node/stats` snapshot
//! - **`node_info`**: the decoded `GET /_node/` document
//! - **`shared`**: metric descriptors, value kinds and records
//! - **`descriptors`**: the process-wide table of every metric family

pub mod descriptors;
pub mod node_info;
pub mod node_stats;
pub mod shared;

pub use descriptors::{
    descriptors,
    Descriptors,
};
pub use node_info::NodeInfo;
pub use node_stats::{
    NodeStats,
    NodeStatus,
};
pub use shared::{
    MetricDescriptor,
    MetricRecord,
    MetricValue,
    NAMESPACE,
};
