//! Input side: record binding, list decoding, metric extraction

mod decode;
mod metrics;
mod record;

pub use decode::{try_decode_list, DecodeError};
pub use metrics::{satisfaction_ratio, try_volume_estimate, MetricError};
pub use record::{Record, RecordTable, Recoveries};
