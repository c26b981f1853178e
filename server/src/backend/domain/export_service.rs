//! Export service domain logic for the steps challenge.
//!
//! Builds the payment summary CSV from the same summaries and derivations the
//! API serves, and writes it to disk when asked. The REST layer only maps the
//! results to DTOs.

use anyhow::{anyhow, Context, Result};
use chrono::{Local, NaiveDate};
use log::{error, info};
use std::fs;
use std::path::PathBuf;

use crate::backend::domain::aggregator::Aggregator;
use crate::backend::domain::commands::export::{
    ExportDataResult, ExportToPathCommand, ExportToPathResult,
};
use crate::backend::domain::commands::summaries::SummaryResult;
use crate::backend::domain::models::submission::{StepStatus, Submission, DATE_FORMAT};
use crate::backend::domain::summary_service::SummaryService;
use crate::backend::storage::Connection;

const SUMMARY_HEADER: [&str; 5] = [
    "Name",
    "Total Submissions",
    "Days Missed",
    "Amount Owed",
    "Payment Status",
];
const DETAIL_HEADER: [&str; 5] = ["Date", "Name", "Steps", "Status", "Amount Owed"];

#[derive(Clone, Default)]
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    /// Build the payment summary CSV with the suggested file name.
    pub fn export_summary_csv<C: Connection>(
        &self,
        summary_service: &SummaryService<C>,
    ) -> Result<ExportDataResult> {
        info!("📄 EXPORT: Building payment summary CSV");

        let (summary, submissions) = summary_service.summaries_with_submissions()?;
        let aggregator = summary_service.aggregator();

        let csv_content = Self::render_csv(aggregator, &summary, &submissions)?;
        let filename = Self::export_filename(Local::now().date_naive());

        info!(
            "✅ EXPORT: Generated {} ({} bytes, {} submissions)",
            filename,
            csv_content.len(),
            submissions.len()
        );

        Ok(ExportDataResult {
            csv_content,
            filename,
            submission_count: submissions.len(),
        })
    }

    /// Write the summary CSV into `custom_path`, or the Documents directory
    /// (falling back to home) when no path is given.
    ///
    /// File system failures are reported through `success: false` rather
    /// than as errors.
    pub fn export_to_path<C: Connection>(
        &self,
        command: ExportToPathCommand,
        summary_service: &SummaryService<C>,
    ) -> Result<ExportToPathResult> {
        info!("📁 EXPORT: Exporting to path - custom_path: {:?}", command.custom_path);

        let export = self.export_summary_csv(summary_service)?;

        let export_dir = match command.custom_path {
            Some(custom_path) if !custom_path.trim().is_empty() => {
                PathBuf::from(self.sanitize_path(&custom_path))
            }
            _ => match dirs::document_dir().or_else(dirs::home_dir) {
                Some(dir) => dir,
                None => {
                    error!("❌ EXPORT: Could not determine default export directory");
                    return Ok(Self::failure(
                        "Failed to determine export directory".to_string(),
                        String::new(),
                    ));
                }
            },
        };

        if let Err(e) = fs::create_dir_all(&export_dir) {
            error!("❌ EXPORT: Failed to create export directory {:?}: {}", export_dir, e);
            return Ok(Self::failure(
                format!("Failed to create export directory: {}", e),
                export_dir.to_string_lossy().to_string(),
            ));
        }

        let file_path = export_dir.join(&export.filename);
        let file_path_str = file_path.to_string_lossy().to_string();

        match fs::write(&file_path, &export.csv_content) {
            Ok(()) => {
                info!(
                    "✅ EXPORT: Exported {} submissions to {}",
                    export.submission_count, file_path_str
                );
                Ok(ExportToPathResult {
                    success: true,
                    message: format!("File exported successfully to: {}", file_path_str),
                    file_path: file_path_str,
                    submission_count: export.submission_count,
                })
            }
            Err(e) => {
                error!("❌ EXPORT: Failed to write export file to {:?}: {}", file_path, e);
                Ok(Self::failure(
                    format!("Failed to write export file: {}", e),
                    file_path_str,
                ))
            }
        }
    }

    pub fn export_filename(date: NaiveDate) -> String {
        format!("steps-challenge-summary-{}.csv", date.format(DATE_FORMAT))
    }

    /// Render both CSV sections. Every amount comes from `summary` and
    /// `aggregator`, so the file matches what the API reports.
    pub fn render_csv(
        aggregator: &Aggregator,
        summary: &SummaryResult,
        submissions: &[Submission],
    ) -> Result<String> {
        let currency = &summary.currency_symbol;

        let summary_rows: Vec<Vec<String>> = summary
            .summaries
            .iter()
            .map(|s| {
                vec![
                    s.name.clone(),
                    s.total_submissions.to_string(),
                    s.days_missed.to_string(),
                    format!("{}{}", currency, s.total_owed),
                    if s.paid { "Paid" } else { "Pending" }.to_string(),
                ]
            })
            .collect();

        let grand_total_row = vec![vec![
            "Grand Total".to_string(),
            String::new(),
            String::new(),
            format!("{}{}", currency, summary.grand_total),
            String::new(),
        ]];

        let detail_rows: Vec<Vec<String>> = submissions
            .iter()
            .map(|s| {
                let status = match aggregator.status_of(s) {
                    StepStatus::Ok => "OK",
                    StepStatus::Missed => "Missed",
                };
                vec![
                    s.date.format(DATE_FORMAT).to_string(),
                    s.participant_name.clone(),
                    s.step_count.to_string(),
                    status.to_string(),
                    format!("{}{}", currency, aggregator.amount_owed(s)),
                ]
            })
            .collect();

        let mut out = String::new();
        out.push_str(&format!("{} - Payment Summary\n\n", Self::title(aggregator)));
        out.push_str(&Self::write_section(Some(&SUMMARY_HEADER[..]), &summary_rows)?);
        out.push('\n');
        out.push_str(&Self::write_section(None, &grand_total_row)?);
        out.push('\n');
        out.push_str("Detailed Submissions\n");
        out.push_str(&Self::write_section(Some(&DETAIL_HEADER[..]), &detail_rows)?);

        Ok(out)
    }

    fn title(aggregator: &Aggregator) -> String {
        let target = aggregator.target_steps();
        if target % 1000 == 0 {
            format!("{}K Steps Challenge", target / 1000)
        } else {
            format!("{} Steps Challenge", target)
        }
    }

    fn write_section(header: Option<&[&str]>, rows: &[Vec<String>]) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());

        if let Some(header) = header {
            writer
                .write_record(header)
                .context("Failed to write CSV header")?;
        }
        for row in rows {
            writer.write_record(row).context("Failed to write CSV row")?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow!("Failed to flush CSV writer: {}", e.error()))?;
        String::from_utf8(bytes).context("CSV output is not valid UTF-8")
    }

    fn failure(message: String, file_path: String) -> ExportToPathResult {
        ExportToPathResult {
            success: false,
            message,
            file_path,
            submission_count: 0,
        }
    }

    /// Basic cleanup of a user-typed directory: surrounding quotes, escaped
    /// spaces, trailing separators and a leading `~`.
    fn sanitize_path(&self, path: &str) -> String {
        let mut cleaned = path.trim().to_string();

        let quoted = cleaned.len() >= 2
            && ((cleaned.starts_with('"') && cleaned.ends_with('"'))
                || (cleaned.starts_with('\'') && cleaned.ends_with('\'')));
        if quoted {
            cleaned = cleaned[1..cleaned.len() - 1].trim().to_string();
        }

        cleaned = cleaned.replace("\\ ", " ");

        while cleaned.len() > 1 && (cleaned.ends_with('/') || cleaned.ends_with('\\')) {
            cleaned.pop();
        }

        if let Some(home) = dirs::home_dir() {
            if cleaned == "~" {
                cleaned = home.to_string_lossy().to_string();
            } else if let Some(rest) = cleaned
                .strip_prefix("~/")
                .or_else(|| cleaned.strip_prefix("~\\"))
            {
                cleaned = home.join(rest).to_string_lossy().to_string();
            }
        }

        cleaned
    }
}
