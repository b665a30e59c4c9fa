pub mod report_handler;

pub use report_handler::{__path_upload_report, upload_report};
