//! Chunking and sequential submission

use async_trait::async_trait;

use crate::error::{ApiError, SubmissionError};
use crate::spreadsheet::DataExtension;

/// Destination for one batch of data extensions
#[async_trait]
pub trait BatchSink: Send + Sync {
    /// Deliver one batch; returns only once the remote has answered
    async fn submit_batch(&self, batch: &[DataExtension]) -> Result<(), ApiError>;
}

/// Outcome of a fully successful submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubmissionReport {
    pub batches: usize,
    pub records: usize,
}

/// Split records into consecutive chunks of at most `batch_size` (min 1)
pub fn chunk_records(records: &[DataExtension], batch_size: usize) -> Vec<&[DataExtension]> {
    records.chunks(batch_size.max(1)).collect()
}

/// Submit all records in order, one batch at a time
///
/// Stops at the first failing batch; later batches are never sent.
pub async fn submit_in_batches<S>(
    sink: &S,
    records: &[DataExtension],
    batch_size: usize,
) -> Result<SubmissionReport, SubmissionError>
where
    S: BatchSink + ?Sized,
{
    let chunks = chunk_records(records, batch_size);
    let batches = chunks.len();
    log::info!(
        "Submitting {} data extensions in {} batches of up to {}",
        records.len(),
        batches,
        batch_size.max(1)
    );

    for (index, chunk) in chunks.into_iter().enumerate() {
        let batch = index + 1;
        log::info!("Submitting batch {}/{} ({} data extensions)", batch, batches, chunk.len());

        if let Err(source) = sink.submit_batch(chunk).await {
            log::error!("Batch {}/{} failed, aborting remaining batches: {}", batch, batches, source);
            return Err(SubmissionError {
                batch,
                batches,
                source,
            });
        }
    }

    log::info!("All {} batches submitted", batches);
    Ok(SubmissionReport {
        batches,
        records: records.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records batch sizes and fails on a chosen call
    #[derive(Default)]
    struct RecordingSink {
        calls: Mutex<Vec<usize>>,
        fail_on_call: Option<usize>,
    }

    #[async_trait]
    impl BatchSink for RecordingSink {
        async fn submit_batch(&self, batch: &[DataExtension]) -> Result<(), ApiError> {
            let mut calls = self.calls.lock().unwrap();
            calls.push(batch.len());
            if Some(calls.len()) == self.fail_on_call {
                return Err(ApiError::Status {
                    status: 500,
                    body: format!("call {} rejected", calls.len()),
                });
            }
            Ok(())
        }
    }

    fn records(count: usize) -> Vec<DataExtension> {
        (0..count)
            .map(|i| DataExtension {
                name: format!("DE {}", i),
                key: format!("DE_{}", i),
                is_sendable: true,
                category_id: String::new(),
                sendable_custom_object_field: String::new(),
                sendable_subscriber_field: String::new(),
                fields: Vec::new(),
            })
            .collect()
    }

    #[test]
    fn test_chunk_records() {
        let recs = records(5);
        let sizes: Vec<usize> = chunk_records(&recs, 2).iter().map(|c| c.len()).collect();
        assert_eq!(sizes, vec![2, 2, 1]);
        assert_eq!(chunk_records(&recs, 0).len(), 5);
        assert!(chunk_records(&[], 200).is_empty());
    }

    #[tokio::test]
    async fn test_450_records_in_three_batches() {
        let sink = RecordingSink::default();
        let recs = records(450);

        let report = submit_in_batches(&sink, &recs, 200).await.unwrap();

        assert_eq!(*sink.calls.lock().unwrap(), vec![200, 200, 50]);
        assert_eq!(report, SubmissionReport { batches: 3, records: 450 });
    }

    #[tokio::test]
    async fn test_failure_aborts_remaining_batches() {
        let sink = RecordingSink {
            fail_on_call: Some(2),
            ..Default::default()
        };
        let recs = records(450);

        let err = submit_in_batches(&sink, &recs, 200).await.unwrap_err();

        assert_eq!(*sink.calls.lock().unwrap(), vec![200, 200]);
        assert_eq!(err.batch, 2);
        assert_eq!(err.batches, 3);
        assert_eq!(err.source.remote_message(), "call 2 rejected");
    }

    #[tokio::test]
    async fn test_resubmission_resends_everything() {
        let recs = records(3);
        let failing = RecordingSink {
            fail_on_call: Some(2),
            ..Default::default()
        };
        assert!(submit_in_batches(&failing, &recs, 1).await.is_err());

        let retry = RecordingSink::default();
        submit_in_batches(&retry, &recs, 1).await.unwrap();
        assert_eq!(retry.calls.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_empty_submission() {
        let sink = RecordingSink::default();
        let report = submit_in_batches(&sink, &[], 200).await.unwrap();
        assert_eq!(report, SubmissionReport::default());
        assert!(sink.calls.lock().unwrap().is_empty());
    }
}
