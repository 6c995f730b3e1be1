//! Response codes carried in every API envelope and recorded on audit transactions

pub const SUCCESS: &str = "100.000.000";

// State conflicts
pub const ALREADY_DELETED: &str = "100.000.001";
pub const ALREADY_ACTIVE: &str = "100.000.002";
pub const ALREADY_DISABLED: &str = "100.000.003";
pub const ALREADY_ARCHIVED: &str = "100.000.004";
pub const BOOK_UNAVAILABLE: &str = "100.000.005";
pub const ALREADY_RETURNED: &str = "100.000.006";
pub const MEMBER_NOT_ACTIVE: &str = "100.000.007";

// Lookups and persistence
pub const NOT_FOUND: &str = "200.001.002";
pub const NOT_FOUND_ON_FETCH: &str = "200.002.002";
pub const SAVE_FAILED: &str = "200.001.003";
pub const STATUS_CHANGE_FAILED: &str = "200.001.007";

pub const INVALID_ACTION: &str = "300.300.003";

// Authentication
pub const MISSING_AUTH: &str = "401.000.001";
pub const INVALID_TOKEN: &str = "401.000.002";

// Request problems
pub const UNHANDLED_FAILURE: &str = "500.000.100";
pub const MALFORMED_BODY: &str = "500.400.001";
pub const INVALID_NAME: &str = "500.400.003";
pub const INVALID_IDENTIFIER: &str = "500.400.004";
pub const INVALID_IDENTIFIER_ON_FETCH: &str = "500.004.004";
pub const INVALID_FIELD: &str = "500.400.005";

pub const LEDGER_FAILED: &str = "900.500.500";
pub const INTERNAL: &str = "999.999.999";
