pub mod intake_service;

pub use intake_service::ReportIntakeService;
