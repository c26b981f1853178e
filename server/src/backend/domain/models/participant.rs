//! Derived, never stored: per-participant statistics and table totals.

#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantSummary {
    pub name: String,
    pub total_submissions: usize,
    pub days_missed: usize,
    pub total_owed: u64,
    pub paid: bool,
    pub completion_rate: f64,
}

/// Totals over a (possibly filtered) list of submissions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubmissionTotals {
    pub total_entries: usize,
    pub total_missed: usize,
    pub total_owed: u64,
}
