use crate::error::{Error, Result};
use uuid::Uuid;

/// Request ids arrive as strings; anything that does not parse is a
/// 400-equivalent, mirroring upfront id validation at the API boundary.
pub fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| Error::BadRequest("Missing or invalid ids".to_string()))
}
