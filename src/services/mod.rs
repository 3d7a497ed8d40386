pub mod ai_service;
pub mod quiz_service;
pub mod report_service;
pub mod scoring_service;
