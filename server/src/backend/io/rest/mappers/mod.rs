pub mod export_mapper;
pub mod submission_mapper;
pub mod summary_mapper;

pub use export_mapper::ExportMapper;
pub use submission_mapper::SubmissionMapper;
pub use summary_mapper::SummaryMapper;
