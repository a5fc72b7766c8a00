//! Input validation for inbound payloads
//!
//! One function per DTO. Every function checks all constraints and returns
//! the full set of violations so the caller can fix everything in one round
//! trip.

use regex::Regex;
use std::sync::OnceLock;

use crate::dto::{ClaimRequest, ItemRequest, RegisterRequest};
use crate::error::ValidationErrors;

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    })
}

/// Validate a registration payload
pub fn validate_register(req: &RegisterRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    // Length is measured in characters, not bytes
    let username_length = req.username.chars().count();
    if req.username.trim().is_empty() {
        errors.add("username", "Username is required");
    } else if username_length < 3 || username_length > 20 {
        errors.add("username", "Username must be between 3 and 20 characters");
    }

    if req.password.is_empty() {
        errors.add("password", "Password is required");
    } else if req.password.len() < 6 {
        errors.add("password", "Password must be at least 6 characters");
    }

    if req.email.trim().is_empty() {
        errors.add("email", "Email is required");
    } else if !email_regex().is_match(&req.email) {
        errors.add("email", "Please provide a valid email");
    }

    errors.into_result()
}

/// Validate an item creation or update payload
pub fn validate_item(req: &ItemRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if req.name.trim().is_empty() {
        errors.add("name", "Item name is required");
    }

    if req.status.is_none() {
        errors.add("status", "Item status is required");
    }

    errors.into_result()
}

/// Validate a claim payload; whether the item exists is the repository's
/// concern, not validation's
pub fn validate_claim(req: &ClaimRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if req.item_id.is_none() {
        errors.add("itemId", "Item ID is required");
    }

    if req.description.trim().is_empty() {
        errors.add("description", "Description is required");
    }

    if req.contact_info.trim().is_empty() {
        errors.add("contactInfo", "Contact information is required");
    }

    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemStatus, UserRole};

    fn register_request(username: &str, password: &str, email: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
            email: email.to_string(),
            first_name: None,
            last_name: None,
            phone_number: None,
            role: UserRole::User,
        }
    }

    fn item_request(name: &str, status: Option<ItemStatus>) -> ItemRequest {
        ItemRequest {
            name: name.to_string(),
            description: None,
            category: None,
            location: None,
            image_url: None,
            status,
            date_lost_found: None,
        }
    }

    fn claim_request(item_id: Option<i64>, description: &str, contact_info: &str) -> ClaimRequest {
        ClaimRequest {
            item_id,
            description: description.to_string(),
            contact_info: contact_info.to_string(),
        }
    }

    #[test]
    fn test_valid_register_passes() {
        let req = register_request("alice", "secret1", "alice@example.com");
        assert!(validate_register(&req).is_ok());
    }

    #[test]
    fn test_register_short_username() {
        let errors = validate_register(&register_request("ab", "secret1", "a@b.com")).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains("username"));
    }

    #[test]
    fn test_register_long_username() {
        let errors =
            validate_register(&register_request(&"x".repeat(21), "secret1", "a@b.com"))
                .unwrap_err();
        assert!(errors.contains("username"));
    }

    #[test]
    fn test_register_username_length_counts_characters_not_bytes() {
        // 10 characters but 30 bytes; must pass
        let req = register_request("忘れ物センター管理者", "secret1", "a@b.com");
        assert!(validate_register(&req).is_ok());

        // 2 characters but 6 bytes; must fail the minimum
        let errors =
            validate_register(&register_request("ねこ", "secret1", "a@b.com")).unwrap_err();
        assert!(errors.contains("username"));
    }

    #[test]
    fn test_register_username_boundaries_pass() {
        assert!(validate_register(&register_request("abc", "secret1", "a@b.com")).is_ok());
        assert!(
            validate_register(&register_request(&"x".repeat(20), "secret1", "a@b.com")).is_ok()
        );
    }

    #[test]
    fn test_register_short_password() {
        let errors = validate_register(&register_request("alice", "123", "a@b.com")).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains("password"));
    }

    #[test]
    fn test_register_invalid_email() {
        let errors =
            validate_register(&register_request("alice", "secret1", "not-an-email")).unwrap_err();
        assert!(errors.contains("email"));
    }

    #[test]
    fn test_register_collects_every_violation() {
        let errors = validate_register(&register_request("ab", "123", "")).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains("username"));
        assert!(errors.contains("password"));
        assert!(errors.contains("email"));
    }

    #[test]
    fn test_valid_item_passes() {
        assert!(validate_item(&item_request("iPhone 12", Some(ItemStatus::Lost))).is_ok());
    }

    #[test]
    fn test_item_blank_name_and_missing_status() {
        let errors = validate_item(&item_request("  ", None)).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.contains("name"));
        assert!(errors.contains("status"));
    }

    #[test]
    fn test_valid_claim_passes() {
        assert!(validate_claim(&claim_request(Some(1), "It is mine", "071-555-0100")).is_ok());
    }

    #[test]
    fn test_claim_missing_item_id() {
        let errors = validate_claim(&claim_request(None, "It is mine", "071-555-0100"))
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains("itemId"));
    }

    #[test]
    fn test_claim_collects_every_violation() {
        let errors = validate_claim(&claim_request(None, "", " ")).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains("itemId"));
        assert!(errors.contains("description"));
        assert!(errors.contains("contactInfo"));
    }
}
