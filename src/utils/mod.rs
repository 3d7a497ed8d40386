pub mod ids;
pub mod json;
