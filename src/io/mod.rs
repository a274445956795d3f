/// CSV export of room assessments.
pub mod export;
