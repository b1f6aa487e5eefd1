//! Batch submission of decoded data extensions
//!
//! Records are split into consecutive chunks and each chunk is handed to a
//! [`BatchSink`], strictly one at a time. The first failing chunk aborts the
//! rest; chunks already accepted remotely are not rolled back, and
//! resubmitting the same list sends every chunk again.

pub mod batch;
pub mod sinks;

pub use batch::{BatchSink, SubmissionReport, chunk_records, submit_in_batches};
pub use sinks::{DirectSink, ProxySink};
