//! Field names of the user fixture, exactly as they appear in every output.
//!
//! Surrounding spaces and the trailing tab are part of the names. Downstream
//! tools are expected to cope with them; nothing in this crate trims them.

/// Full name
pub const NAME: &str = " Name ";
/// Phone number, free-form
pub const PHONE_NUMBER: &str = "Phone Number ";
/// E-mail address
pub const EMAIL: &str = "Email";
/// Street address
pub const STREET: &str = "Street";
/// City name
pub const CITY: &str = "    City ";
/// US state name
pub const STATE: &str = "State";
/// ZIP code
pub const ZIP_CODE: &str = "Zip Code ";
/// Nine-digit bank routing number, generated as text, Int64 in Parquet
pub const ROUTING_NUMBER: &str = "Routing Number   ";
/// Retail department
pub const DEPARTMENT: &str = "Department";
/// Company name (the trailing tab is intentional)
pub const COMPANY: &str = "Company\t";
/// Creation instant, millisecond timestamp in Parquet
pub const CREATED_AT: &str = "Created At ";
/// Profile photo URL
pub const PROFILE_PHOTO: &str = "Profile Photo";
/// Multi-sentence description; may contain commas, quotes and newlines
pub const DESCRIPTION: &str = "  Description";
/// Account activation flag
pub const ACTIVATED: &str = "Activated";

/// Declared field order of every generated record
pub const FIELD_ORDER: [&str; 14] = [
    NAME,
    PHONE_NUMBER,
    EMAIL,
    STREET,
    CITY,
    STATE,
    ZIP_CODE,
    ROUTING_NUMBER,
    DEPARTMENT,
    COMPANY,
    CREATED_AT,
    PROFILE_PHOTO,
    DESCRIPTION,
    ACTIVATED,
];
