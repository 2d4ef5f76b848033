//! Unified error codes
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 4xxx: Order / archive errors
//! - 6xxx: Menu errors
//! - 7xxx: Table errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Represented as u16 on the wire so the front end can switch on plain numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Request body or parameter rejected
    ValidationFailed = 2,

    // ==================== 1xxx: Auth ====================
    /// Credential header missing
    NotAuthenticated = 1001,
    /// Shared secret / admin token mismatch
    InvalidCredentials = 1002,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Item index out of range
    OrderItemNotFound = 4006,
    /// Order has no items
    OrderEmpty = 4007,
    /// Neither table number nor customer name given
    OrderDestinationMissing = 4008,
    /// Archive requested with no current orders
    NothingToArchive = 4101,
    /// Archive entry not found
    ArchiveNotFound = 4102,
    /// Export requested with no current orders
    NothingToExport = 4103,

    // ==================== 6xxx: Menu ====================
    /// Drink name is not on the menu
    MenuItemNotFound = 6001,
    /// Temperature not enabled for the drink
    TemperatureNotAvailable = 6002,
    /// Menu payload rejected
    MenuInvalid = 6003,
    /// Same drink listed twice
    MenuDuplicateItem = 6004,

    // ==================== 7xxx: Table ====================
    /// Table number outside 1..=N
    TableNumberInvalid = 7001,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Persistence failure
    DatabaseError = 9002,
    /// Stored record could not be decoded
    StorageCorrupted = 9403,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Default human-readable message
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",

            // Auth
            ErrorCode::NotAuthenticated => "Credential is required",
            ErrorCode::InvalidCredentials => "Invalid credential",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderItemNotFound => "Order item not found",
            ErrorCode::OrderEmpty => "Order must contain at least one item",
            ErrorCode::OrderDestinationMissing => "Table number or customer name is required",
            ErrorCode::NothingToArchive => "Nothing to archive",
            ErrorCode::ArchiveNotFound => "Archive not found",
            ErrorCode::NothingToExport => "Nothing to export",

            // Menu
            ErrorCode::MenuItemNotFound => "Drink is not on the menu",
            ErrorCode::TemperatureNotAvailable => "Temperature is not available for this drink",
            ErrorCode::MenuInvalid => "Invalid menu",
            ErrorCode::MenuDuplicateItem => "Drink is listed more than once",

            // Table
            ErrorCode::TableNumberInvalid => "Table number is out of range",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::StorageCorrupted => "Storage corrupted (record cannot be decoded)",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4006 => Ok(ErrorCode::OrderItemNotFound),
            4007 => Ok(ErrorCode::OrderEmpty),
            4008 => Ok(ErrorCode::OrderDestinationMissing),
            4101 => Ok(ErrorCode::NothingToArchive),
            4102 => Ok(ErrorCode::ArchiveNotFound),
            4103 => Ok(ErrorCode::NothingToExport),

            // Menu
            6001 => Ok(ErrorCode::MenuItemNotFound),
            6002 => Ok(ErrorCode::TemperatureNotAvailable),
            6003 => Ok(ErrorCode::MenuInvalid),
            6004 => Ok(ErrorCode::MenuDuplicateItem),

            // Table
            7001 => Ok(ErrorCode::TableNumberInvalid),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9403 => Ok(ErrorCode::StorageCorrupted),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
