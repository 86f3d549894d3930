pub const API_NAME: &str = "[dealership-api]";

pub const STATUS_ACTIVE: &str = "active";
pub const BOOKING_STATUS_PENDING: &str = "pending";
pub const CONTACT_STATUS_NEW: &str = "new";

pub const TOKEN_TTL_HOURS: i64 = 24;
pub const MAX_UPLOAD_FILES: usize = 10;
pub const UPLOAD_FIELD_NAME: &str = "images";
