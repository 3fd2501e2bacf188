// Error codes implementation
// Stable, client-facing error codes for ERCare Engine API responses

pub mod validation {
    pub const INVALID_INPUT: &str = "VALIDATION_1001";
    pub const INVALID_FORMAT: &str = "VALIDATION_1003";
    pub const INVALID_AGE_GROUP: &str = "VALIDATION_1004";
}

pub mod authentication {
    pub const INVALID_CREDENTIALS: &str = "AUTH_2001";
    pub const TOKEN_EXPIRED: &str = "AUTH_2002";
    pub const MISSING_CREDENTIALS: &str = "AUTH_2003";
}

pub mod resource {
    pub const NOT_FOUND: &str = "RESOURCE_5001";
}

pub mod system {
    pub const INTERNAL: &str = "SYSTEM_9001";
    pub const CONFIGURATION: &str = "SYSTEM_9002";
    pub const NETWORK: &str = "SYSTEM_9003";
}
