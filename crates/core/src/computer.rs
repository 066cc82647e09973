//! Field rules for computer records.
//!
//! The record struct itself lives in the db crate (it derives `FromRow`);
//! these helpers operate on its raw fields so they can be shared by the API
//! layer and every store adapter.

use crate::error::CoreError;

/// Human-readable name of the primary key, used in error messages.
pub const MAC_ADDRESS_FIELD: &str = "MAC address";

/// Validate the fields of a computer that is about to be created.
///
/// MAC address, computer name and IP address must be non-empty. The owning
/// employee and description may be empty.
pub fn validate_new_computer(
    mac_addr: &str,
    computer_name: &str,
    ip_addr: &str,
) -> Result<(), CoreError> {
    require_non_empty("macAddr", mac_addr)?;
    validate_computer_fields(computer_name, ip_addr)
}

/// Validate the mutable fields of a computer (create and update).
pub fn validate_computer_fields(computer_name: &str, ip_addr: &str) -> Result<(), CoreError> {
    require_non_empty("computerName", computer_name)?;
    require_non_empty("ipAddr", ip_addr)
}

/// Check that an update body does not try to change the MAC address.
///
/// An empty body MAC means "use the one from the path".
pub fn ensure_mac_unchanged(path_mac: &str, body_mac: &str) -> Result<(), CoreError> {
    if !body_mac.is_empty() && body_mac != path_mac {
        return Err(CoreError::ImmutableField(MAC_ADDRESS_FIELD));
    }
    Ok(())
}

fn require_non_empty(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
