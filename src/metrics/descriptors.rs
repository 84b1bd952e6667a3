//! The process-wide descriptor table.
//!
//! Every metric family the exporter can emit is declared here exactly once.
//! The table is built lazily on first use and never mutated afterwards, so
//! concurrent scrapes share it by reference.

use crate::metrics::shared::{
    desc_fq,
    MetricDescriptor,
};
use lazy_static::lazy_static;

lazy_static! {
    static ref DESCRIPTORS: Descriptors = Descriptors::new();
}

pub fn descriptors() -> &'static Descriptors {
    &DESCRIPTORS
}

pub struct Descriptors {
    pub exporter: ExporterDescs,
    pub info: InfoDescs,
    pub node_info: NodeInfoDescs,
    pub jvm: JvmDescs,
    pub process: ProcessDescs,
    pub event: EventDescs,
    pub pipeline: PipelineDescs,
    pub pipeline_config: PipelineConfigDescs,
    pub reloads_config: ReloadsConfigDescs,
}

impl Descriptors {
    fn new() -> Self {
        Self {
            exporter: ExporterDescs::new(),
            info: InfoDescs::new(),
            node_info: NodeInfoDescs::new(),
            jvm: JvmDescs::new(),
            process: ProcessDescs::new(),
            event: EventDescs::new(),
            pipeline: PipelineDescs::new(),
            pipeline_config: PipelineConfigDescs::new(),
            reloads_config: ReloadsConfigDescs::new(),
        }
    }
}

pub struct ExporterDescs {
    pub up: MetricDescriptor,
    pub total_scrapes: MetricDescriptor,
    pub json_parse_failures: MetricDescriptor,
    pub scrape_failures: MetricDescriptor,
}

impl ExporterDescs {
    fn new() -> Self {
        let desc = desc_fq("");
        Self {
            up: desc("up", "Was the last scrape of Logstash successful.", &[]),
            total_scrapes: desc("exporter_total_scrapes", "Current total Logstash scrapes.", &[]),
            json_parse_failures: desc(
                "exporter_json_parse_failures",
                "Number of errors while parsing JSON.",
                &[],
            ),
            scrape_failures: desc(
                "exporter_scrape_failures",
                "Number of scrapes that could not fetch node stats.",
                &[],
            ),
        }
    }
}

pub struct InfoDescs {
    pub status: MetricDescriptor,
    pub info: MetricDescriptor,
}

impl InfoDescs {
    fn new() -> Self {
        let desc = desc_fq("");
        Self {
            status: desc("status", "Logstash status: 0 for Green; 1 for Yellow; 2 for Red.", &[]),
            info: desc(
                "info",
                "A metric with a constant '1' value labeled by version, http_address, name, id and ephemeral_id from \
                 Logstash instance.",
                &["version", "http_address", "name", "id", "ephemeral_id"],
            ),
        }
    }
}

pub struct NodeInfoDescs {
    pub node: MetricDescriptor,
    pub os: MetricDescriptor,
    pub jvm: MetricDescriptor,
}

impl NodeInfoDescs {
    fn new() -> Self {
        let desc = desc_fq("info");
        Self {
            node: desc(
                "node",
                "A metric with a constant '1' value labeled by Logstash version.",
                &["version"],
            ),
            os: desc(
                "os",
                "A metric with a constant '1' value labeled by name, arch, version, and available_processors of the \
                 OS running Logstash.",
                &["name", "arch", "version", "available_processors"],
            ),
            jvm: desc(
                "jvm",
                "A metric with a constant '1' value labeled by name, version, and vendor of the JVM running Logstash.",
                &["name", "version", "vendor"],
            ),
        }
    }
}

pub struct JvmDescs {
    pub threads_count: MetricDescriptor,
    pub heap_used_ratio: MetricDescriptor,
    pub heap_committed_bytes: MetricDescriptor,
    pub heap_used_bytes: MetricDescriptor,
    pub pool_used_bytes: MetricDescriptor,
    pub pool_committed_bytes: MetricDescriptor,
    pub pool_max_bytes: MetricDescriptor,
    pub gc_collection: MetricDescriptor,
}

impl JvmDescs {
    fn new() -> Self {
        let desc = desc_fq("jvm");
        Self {
            threads_count: desc("threads_count", "Current JVM thread count.", &[]),
            heap_used_ratio: desc("heap_used_ratio", "Current JVM heap usage ratio.", &[]),
            heap_committed_bytes: desc("heap_committed_bytes", "Current JVM heap committed size.", &[]),
            heap_used_bytes: desc("heap_used_bytes", "Current JVM heap used size.", &[]),
            pool_used_bytes: desc("memory_pool_used_bytes", "Current JVM heap pool used size.", &["pool"]),
            pool_committed_bytes: desc(
                "memory_pool_committed_bytes",
                "Current JVM heap pool committed size.",
                &["pool"],
            ),
            pool_max_bytes: desc("memory_pool_max_bytes", "Current JVM heap pool max size.", &["pool"]),
            gc_collection: desc(
                "gc_collection_duration_seconds",
                "GC collection count and cumulative duration.",
                &["collector"],
            ),
        }
    }
}

pub struct ProcessDescs {
    pub open_file_descriptors: MetricDescriptor,
    pub max_file_descriptors: MetricDescriptor,
    pub total_virtual_memory_bytes: MetricDescriptor,
    pub cpu_time_seconds: MetricDescriptor,
    pub cpu_usage_ratio: MetricDescriptor,
    pub load_average: MetricDescriptor,
}

impl ProcessDescs {
    fn new() -> Self {
        let desc = desc_fq("process");
        Self {
            open_file_descriptors: desc("open_file_descriptors", "Current open file descriptors.", &[]),
            max_file_descriptors: desc("max_file_descriptors", "Max file descriptors.", &[]),
            total_virtual_memory_bytes: desc(
                "total_virtual_memory_bytes",
                "Virtual memory used by the Logstash process.",
                &[],
            ),
            cpu_time_seconds: desc("process_time_seconds", "Total CPU time of the Logstash process.", &[]),
            cpu_usage_ratio: desc("cpu_usage_ratio", "CPU usage of the Logstash process.", &[]),
            load_average: desc("load_average", "System load average.", &["load"]),
        }
    }
}

pub struct EventDescs {
    pub in_total: MetricDescriptor,
    pub filtered_total: MetricDescriptor,
    pub out_total: MetricDescriptor,
    pub duration_seconds_total: MetricDescriptor,
    pub queue_push_duration_seconds_total: MetricDescriptor,
}

impl EventDescs {
    fn new() -> Self {
        let desc = desc_fq("event");
        Self {
            in_total: desc("in_total", "The total number of events in.", &[]),
            filtered_total: desc("filtered_total", "The total number of filtered events.", &[]),
            out_total: desc("out_total", "The total number of events out.", &[]),
            duration_seconds_total: desc(
                "duration_seconds_total",
                "The total process duration time in seconds.",
                &[],
            ),
            queue_push_duration_seconds_total: desc(
                "queue_push_duration_seconds_total",
                "The total in queue duration time in seconds.",
                &[],
            ),
        }
    }
}

pub struct PipelineDescs {
    pub event_in: MetricDescriptor,
    pub event_filtered: MetricDescriptor,
    pub event_out: MetricDescriptor,
    pub event_duration: MetricDescriptor,
    pub event_queue_push_duration: MetricDescriptor,

    pub queue_events_count: MetricDescriptor,
    pub queue_size_bytes: MetricDescriptor,
    pub queue_max_size_bytes: MetricDescriptor,

    pub capacity_max_unread_events: MetricDescriptor,
    pub capacity_max_queue_size_bytes: MetricDescriptor,
    pub capacity_page_capacity_bytes: MetricDescriptor,
    pub capacity_queue_size_bytes: MetricDescriptor,

    pub dlq_dropped_events: MetricDescriptor,
    pub dlq_max_queue_size_bytes: MetricDescriptor,
    pub dlq_queue_size_bytes: MetricDescriptor,

    pub input_connections: MetricDescriptor,
    pub input_queue_push_duration: MetricDescriptor,
    pub input_out: MetricDescriptor,

    pub filter_duration: MetricDescriptor,
    pub filter_in: MetricDescriptor,
    pub filter_out: MetricDescriptor,

    pub output_duration: MetricDescriptor,
    pub output_in: MetricDescriptor,
    pub output_out: MetricDescriptor,
    pub output_successes: MetricDescriptor,
    pub output_non_retryable_failures: MetricDescriptor,
}

impl PipelineDescs {
    fn new() -> Self {
        let desc = desc_fq("pipeline");
        let pipeline = &["pipeline"];
        let queue = &["pipeline", "queue_type"];
        let plugin = &["pipeline", "id", "name"];
        let filter = &["pipeline", "id", "name", "index"];

        Self {
            event_in: desc("event_in_total", "The total number of events in.", pipeline),
            event_filtered: desc("event_filtered_total", "The total number of filtered events.", pipeline),
            event_out: desc("event_out_total", "The total number of events out.", pipeline),
            event_duration: desc(
                "event_duration_seconds_total",
                "The total process duration time in seconds.",
                pipeline,
            ),
            event_queue_push_duration: desc(
                "event_queue_push_duration_seconds_total",
                "The total in queue duration time in seconds.",
                pipeline,
            ),

            queue_events_count: desc("queue_event_count", "The current events in queue.", queue),
            queue_size_bytes: desc("queue_size_bytes", "The current queue size in bytes.", queue),
            queue_max_size_bytes: desc("queue_max_size_bytes", "The max queue size in bytes.", queue),

            capacity_max_unread_events: desc(
                "capacity_max_unread_events",
                "The maximum number of unread events in capacity.",
                queue,
            ),
            capacity_max_queue_size_bytes: desc(
                "capacity_max_queue_size_bytes",
                "The maximum size of the capacity queue in bytes.",
                queue,
            ),
            capacity_page_capacity_bytes: desc(
                "page_capacity_bytes",
                "The capacity of a single page in bytes.",
                queue,
            ),
            capacity_queue_size_bytes: desc(
                "capacity_queue_size_bytes",
                "The current size of the queue capacity in bytes.",
                queue,
            ),

            dlq_dropped_events: desc(
                "dead_letter_queue_dropped_events_total",
                "The total number of dropped events in the dead letter queue.",
                pipeline,
            ),
            dlq_max_queue_size_bytes: desc(
                "dead_letter_queue_max_queue_size_bytes",
                "The maximum size of the dead letter queue in bytes.",
                pipeline,
            ),
            dlq_queue_size_bytes: desc(
                "dead_letter_queue_size_bytes",
                "The current size of the dead letter queue in bytes.",
                pipeline,
            ),

            input_connections: desc("input_connections", "The current number of connections.", plugin),
            input_queue_push_duration: desc(
                "input_queue_push_seconds_total",
                "The total in queue duration time in seconds.",
                plugin,
            ),
            input_out: desc("input_out_total", "The total number of events out.", plugin),

            filter_duration: desc(
                "filter_duration_seconds_total",
                "The total process duration time in seconds.",
                filter,
            ),
            filter_in: desc("filter_in_total", "The total number of events in.", filter),
            filter_out: desc("filter_out_total", "The total number of events out.", filter),

            output_duration: desc(
                "output_duration_seconds_total",
                "The total process duration time in seconds.",
                plugin,
            ),
            output_in: desc("output_in_total", "The total number of events in.", plugin),
            output_out: desc("output_out_total", "The total number of events out.", plugin),
            output_successes: desc("output_successes_total", "The total number of successful outputs.", plugin),
            output_non_retryable_failures: desc(
                "output_non_retryable_failures_total",
                "The total number of non-retryable output failures.",
                plugin,
            ),
        }
    }
}

pub struct PipelineConfigDescs {
    pub workers: MetricDescriptor,
    pub batch_size: MetricDescriptor,
    pub batch_delay_seconds: MetricDescriptor,
}

impl PipelineConfigDescs {
    fn new() -> Self {
        let desc = desc_fq("pipeline_config");
        Self {
            workers: desc(
                "workers",
                "The number of workers that will, in parallel, execute the filter and output stages of the pipeline.",
                &[],
            ),
            batch_size: desc(
                "batch_size",
                "The maximum number of events an individual worker thread will collect from inputs before attempting \
                 to execute its filters and outputs.",
                &[],
            ),
            batch_delay_seconds: desc(
                "batch_delay_seconds",
                "How long to wait before dispatching an undersized batch to workers.",
                &[],
            ),
        }
    }
}

pub struct ReloadsConfigDescs {
    pub failures: MetricDescriptor,
    pub successes: MetricDescriptor,
}

impl ReloadsConfigDescs {
    fn new() -> Self {
        let desc = desc_fq("reloads_config");
        Self {
            failures: desc("failures_total", "Number of failures during config reload.", &[]),
            successes: desc("successes_total", "Number of successful config reloads.", &[]),
        }
    }
}
