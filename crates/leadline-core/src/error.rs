use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("phone must be 10-15 digits: {0}")]
    InvalidPhone(String),
    #[error("name must be at least 2 characters")]
    InvalidName,
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
    #[error("text too long: {0} characters")]
    NoteTooLong(usize),
    #[error("invalid lead status: {0}")]
    InvalidLeadStatus(String),
    #[error("invalid lead temperature: {0}")]
    InvalidLeadTemperature(String),
    #[error("invalid interaction kind label")]
    InvalidInteractionKindLabel,
    #[error("invalid property type: {0}")]
    InvalidPropertyType(String),
    #[error("invalid listing status: {0}")]
    InvalidListingStatus(String),
    #[error("invalid staff role: {0}")]
    InvalidStaffRole(String),
    #[error("page size must be between 1 and 100: {0}")]
    InvalidPageSize(i64),
    #[error("page offset must be non-negative: {0}")]
    InvalidPageOffset(i64),
    #[error("invalid soon days: {0}")]
    InvalidSoonDays(i64),
}
