use crate::error::ScrapeError;

/// Fixed first segment of every exported metric name.
pub const NAMESPACE: &str = "logstash";

/// Join the non-empty segments with `_`.
pub fn build_fq_name(namespace: &str, subsystem: &str, name: &str) -> String {
    [namespace, subsystem, name]
        .iter()
        .filter(|segment| !segment.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("_")
}

/// Identity of one metric family: fully qualified name, help text and the
/// order of its label names. Label values handed to a [`MetricRecord`] must
/// follow that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricDescriptor {
    fq_name: String,
    help: &'static str,
    label_names: Vec<&'static str>,
}

impl MetricDescriptor {
    pub fn new(subsystem: &str, name: &str, help: &'static str, label_names: &[&'static str]) -> Self {
        Self {
            fq_name: build_fq_name(NAMESPACE, subsystem, name),
            help,
            label_names: label_names.to_vec(),
        }
    }

    pub fn fq_name(&self) -> &str {
        &self.fq_name
    }

    pub fn help(&self) -> &'static str {
        self.help
    }

    pub fn label_names(&self) -> &[&'static str] {
        &self.label_names
    }
}

/// Returns a constructor for descriptors sharing one subsystem.
pub fn desc_fq(subsystem: &'static str) -> impl Fn(&str, &'static str, &[&'static str]) -> MetricDescriptor {
    move |name, help, label_names| MetricDescriptor::new(subsystem, name, help, label_names)
}

/// The three shapes a record can take.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Gauge(f64),
    Counter(f64),
    /// GC-style summary: number of events and their cumulative time in seconds.
    Summary { count: u64, sum: f64 },
}

/// One sample produced during a scrape.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRecord {
    pub desc: &'static MetricDescriptor,
    pub value: MetricValue,
    pub labels: Vec<String>,
}

impl MetricRecord {
    pub fn new(desc: &'static MetricDescriptor, value: MetricValue, labels: &[&str]) -> Result<Self, ScrapeError> {
        if labels.len() != desc.label_names.len() {
            return Err(ScrapeError::Cardinality {
                metric: desc.fq_name.clone(),
                expected: desc.label_names.len(),
                got: labels.len(),
            });
        }

        Ok(Self {
            desc,
            value,
            labels: labels.iter().map(|label| label.to_string()).collect(),
        })
    }

    pub fn gauge(desc: &'static MetricDescriptor, value: f64, labels: &[&str]) -> Result<Self, ScrapeError> {
        Self::new(desc, MetricValue::Gauge(value), labels)
    }

    pub fn counter(desc: &'static MetricDescriptor, value: f64, labels: &[&str]) -> Result<Self, ScrapeError> {
        Self::new(desc, MetricValue::Counter(value), labels)
    }

    pub fn summary(
        desc: &'static MetricDescriptor,
        count: u64,
        sum: f64,
        labels: &[&str],
    ) -> Result<Self, ScrapeError> {
        Self::new(desc, MetricValue::Summary { count, sum }, labels)
    }

    pub fn name(&self) -> &str {
        self.desc.fq_name()
    }

    /// Label value by label name.
    pub fn label(&self, name: &str) -> Option<&str> {
        self.desc
            .label_names
            .iter()
            .position(|label_name| *label_name == name)
            .map(|idx| self.labels[idx].as_str())
    }

    /// Numeric value; for summaries the cumulative sum.
    pub fn sample(&self) -> f64 {
        match self.value {
            MetricValue::Gauge(value) | MetricValue::Counter(value) => value,
            MetricValue::Summary { sum, .. } => sum,
        }
    }
}

pub fn millis_to_seconds(millis: i64) -> f64 {
    millis as f64 / 1000.0
}

pub fn percent_to_ratio(percent: f64) -> f64 {
    percent / 100.0
}
