//! Value objects - immutable types that represent domain concepts

mod fee_schedule;
mod record_id;
mod status_name;

pub use fee_schedule::FeeSchedule;
pub use record_id::{RecordId, RecordIdParseError};
pub use status_name::StatusName;
