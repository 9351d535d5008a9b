// Services exposed to front ends
pub mod analysis_service;

pub use analysis_service::AnalysisService;
