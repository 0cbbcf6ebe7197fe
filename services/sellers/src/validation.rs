//! Input validation utilities

use crate::models::SellerInput;

/// Maximum seller name length accepted by the creation route
pub const MAX_NEW_SELLER_NAME_CHARS: usize = 10;

/// Validate a seller-shaped record
///
/// Never fails in the panicking sense: `Ok(())` means the record carries no
/// error message.
pub fn validate_seller(seller: &SellerInput) -> Result<(), String> {
    match seller.name.as_deref() {
        Some(name) if !name.is_empty() => Ok(()),
        _ => Err("Seller name is required".to_string()),
    }
}

/// Validate the name given to a seller at creation time
pub fn validate_new_seller_name(name: &str) -> Result<(), String> {
    if name.chars().count() > MAX_NEW_SELLER_NAME_CHARS {
        return Err(format!(
            "Seller Name must be a maximum of {} characters!",
            MAX_NEW_SELLER_NAME_CHARS
        ));
    }

    Ok(())
}
