//! # Domain Module
//!
//! Business rules of the steps challenge, independent of HTTP and of the
//! storage format.
//!
//! ## Module Organization
//!
//! - **record_store**: the submission collection, id assignment and the
//!   persisted handle shared by the services
//! - **aggregator**: status, penalties, per-participant summaries and totals
//! - **submission_service**: submit, edit, delete and the filtered table
//! - **payment_service**: bulk paid/unpaid marking
//! - **summary_service**: summaries, grand total and challenge rules
//! - **export_service**: payment summary CSV
//! - **reminder_service**: once-a-day reminder to log steps
//!
//! ## Business Rules
//!
//! - At most one submission per participant per date
//! - A day below the target step count costs a flat penalty
//! - Only participants on the roster can submit or be marked paid
//! - The grand total counts unpaid participants only

pub mod aggregator;
pub mod commands;
pub mod export_service;
pub mod models;
pub mod payment_service;
pub mod record_store;
pub mod reminder_service;
pub mod submission_service;
pub mod summary_service;

pub use aggregator::Aggregator;
pub use export_service::ExportService;
pub use payment_service::PaymentService;
pub use record_store::{RecordStore, RecordStoreHandle, SubmissionFilter};
pub use reminder_service::{Reminder, ReminderSchedule, ReminderService};
pub use submission_service::SubmissionService;
pub use summary_service::SummaryService;
