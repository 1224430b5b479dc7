//! Standard error messages shared by every API.

pub const DECODE_REQUEST: &str = "failed to decode request";
pub const INTERNAL_SERVER_ERROR: &str = "internal server error";
pub const NOT_FOUND_RESOURCE: &str = "resource not found";
pub const ID_REQUIRED: &str = "id is required";
