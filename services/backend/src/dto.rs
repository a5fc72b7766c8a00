//! Request and response payloads for the backend API
//!
//! Wire names are camelCase to match the public API. Inbound payloads carry
//! `Option` fields where validation, not deserialization, reports a missing
//! value so the caller receives every violation at once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Item, ItemStatus, Request, RequestStatus, User, UserRole};

/// Request for user registration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    #[serde(default)]
    pub role: UserRole,
}

/// Request for creating or updating an item report
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequest {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub status: Option<ItemStatus>,
    pub date_lost_found: Option<DateTime<Utc>>,
}

/// Request for filing a claim against an item
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRequest {
    pub item_id: Option<i64>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub contact_info: String,
}

/// Response for user operations; never exposes the password hash
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            phone_number: user.phone_number,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Response for item operations, including owner display fields
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub status: ItemStatus,
    pub date_lost_found: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub owner_username: String,
    pub owner_id: i64,
}

impl ItemResponse {
    /// Build a response from an item and its owner's username
    pub fn from_item(item: Item, owner_username: impl Into<String>) -> Self {
        ItemResponse {
            id: item.id,
            name: item.name,
            description: item.description,
            category: item.category,
            location: item.location,
            image_url: item.image_url,
            status: item.status,
            date_lost_found: item.date_lost_found,
            created_at: item.created_at,
            owner_username: owner_username.into(),
            owner_id: item.user_id,
        }
    }
}

/// Response for claim request operations, including display fields
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestResponse {
    pub id: i64,
    pub description: String,
    pub contact_info: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub requester_username: String,
    pub item_name: String,
    pub item_id: i64,
}

impl RequestResponse {
    /// Build a response from a request plus its requester and item names
    pub fn from_request(
        request: Request,
        requester_username: impl Into<String>,
        item_name: impl Into<String>,
    ) -> Self {
        RequestResponse {
            id: request.id,
            description: request.description,
            contact_info: request.contact_info,
            status: request.status,
            created_at: request.created_at,
            requester_username: requester_username.into(),
            item_name: item_name.into(),
            item_id: request.item_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_role_defaults_to_user() {
        let payload = r#"{"username":"alice","password":"secret1","email":"alice@example.com"}"#;
        let req: RegisterRequest = serde_json::from_str(payload).unwrap();
        assert_eq!(req.role, UserRole::User);
        assert_eq!(req.first_name, None);
    }

    #[test]
    fn test_register_request_explicit_admin_role() {
        let payload = r#"{"username":"root","password":"secret1","email":"root@example.com","role":"ADMIN"}"#;
        let req: RegisterRequest = serde_json::from_str(payload).unwrap();
        assert_eq!(req.role, UserRole::Admin);
    }

    #[test]
    fn test_item_request_accepts_camel_case_fields() {
        let payload = r#"{"name":"iPhone 12","status":"LOST","imageUrl":"http://img/1.png","dateLostFound":"2026-08-01T10:00:00Z"}"#;
        let req: ItemRequest = serde_json::from_str(payload).unwrap();
        assert_eq!(req.status, Some(ItemStatus::Lost));
        assert_eq!(req.image_url.as_deref(), Some("http://img/1.png"));
        assert!(req.date_lost_found.is_some());
    }

    #[test]
    fn test_item_request_missing_status_deserializes() {
        // Missing status must survive deserialization so validation can
        // report it as a field error
        let req: ItemRequest = serde_json::from_str(r#"{"name":"Wallet"}"#).unwrap();
        assert_eq!(req.status, None);
    }

    #[test]
    fn test_item_request_rejects_unknown_status() {
        let result =
            serde_json::from_str::<ItemRequest>(r#"{"name":"Wallet","status":"MISSING"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_claim_request_missing_item_id_deserializes() {
        let payload = r#"{"description":"It is mine","contactInfo":"071-555-0100"}"#;
        let req: ClaimRequest = serde_json::from_str(payload).unwrap();
        assert_eq!(req.item_id, None);
        assert_eq!(req.contact_info, "071-555-0100");
    }

    #[test]
    fn test_user_response_omits_password() {
        let user = User {
            id: 1,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "$argon2id$...".to_string(),
            first_name: None,
            last_name: None,
            phone_number: None,
            role: UserRole::User,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["username"], "alice");
        assert_eq!(json["role"], "USER");
    }

    #[test]
    fn test_item_response_carries_owner_fields() {
        let item = Item {
            id: 7,
            name: "Wallet".to_string(),
            description: None,
            category: None,
            location: None,
            image_url: None,
            status: ItemStatus::Found,
            date_lost_found: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            user_id: 3,
        };

        let response = ItemResponse::from_item(item, "bob");
        assert_eq!(response.owner_id, 3);
        assert_eq!(response.owner_username, "bob");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["ownerUsername"], "bob");
        assert_eq!(json["status"], "FOUND");
    }
}
