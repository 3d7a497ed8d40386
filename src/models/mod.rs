pub mod attempt;
pub mod quiz;
pub mod report;
pub mod user;
