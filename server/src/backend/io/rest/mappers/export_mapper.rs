use crate::backend::domain::commands::export::{
    ExportDataResult, ExportToPathCommand, ExportToPathResult,
};
use shared::{ExportDataResponse, ExportToPathRequest, ExportToPathResponse};

pub struct ExportMapper;

impl ExportMapper {
    pub fn to_command(request: ExportToPathRequest) -> ExportToPathCommand {
        ExportToPathCommand {
            custom_path: request.custom_path,
        }
    }

    pub fn to_data_response(result: ExportDataResult) -> ExportDataResponse {
        ExportDataResponse {
            csv_content: result.csv_content,
            filename: result.filename,
            submission_count: result.submission_count,
        }
    }

    pub fn to_path_response(result: ExportToPathResult) -> ExportToPathResponse {
        ExportToPathResponse {
            success: result.success,
            message: result.message,
            file_path: result.file_path,
            submission_count: result.submission_count,
        }
    }
}
