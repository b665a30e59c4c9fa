pub mod report;

pub use report::{FileDescriptor, NewResearchReport, ResearchReport};
