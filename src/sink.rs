use crate::metrics::MetricRecord;
use tokio::sync::mpsc;

/// Append-only destination for the records of a scrape.
///
/// Cheap to clone; every sub-collector task holds its own handle and writes
/// concurrently. Records from one `send_all` call arrive contiguously.
#[derive(Debug, Clone)]
pub struct MetricSink {
    tx: mpsc::UnboundedSender<Vec<MetricRecord>>,
}

/// Receiving side of a [`MetricSink`], owned by the exposition layer.
#[derive(Debug)]
pub struct MetricBatch {
    rx: mpsc::UnboundedReceiver<Vec<MetricRecord>>,
}

pub fn channel() -> (MetricSink, MetricBatch) {
    let (tx, rx) = mpsc::unbounded_channel();
    (MetricSink { tx }, MetricBatch { rx })
}

impl MetricSink {
    pub fn send(&self, record: MetricRecord) {
        self.send_all(vec![record]);
    }

    pub fn send_all(&self, records: Vec<MetricRecord>) {
        if records.is_empty() {
            return;
        }
        if self.tx.send(records).is_err() {
            debug!("metric batch receiver dropped, discarding records");
        }
    }
}

impl MetricBatch {
    /// Everything sent so far, in arrival order.
    pub fn drain(&mut self) -> Vec<MetricRecord> {
        let mut records = Vec::new();
        while let Ok(chunk) = self.rx.try_recv() {
            records.extend(chunk);
        }
        records
    }
}
