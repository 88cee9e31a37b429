use serde::{Deserialize, Serialize};
use std::fmt;

use crate::db::models::UserRow;

/// The two kinds of principal sharing the users table. Immutable after
/// registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Candidate,
    Recruiter,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Candidate => "candidate",
            UserRole::Recruiter => "recruiter",
        }
    }

    pub fn parse(s: &str) -> Option<UserRole> {
        match s {
            "candidate" => Some(UserRole::Candidate),
            "recruiter" => Some(UserRole::Recruiter),
            _ => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User fields safe to return to clients. Built from a UserRow; the
/// password hash cannot appear here by construction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub image: String,
    pub user_type: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume: Option<String>,
}

impl From<&UserRow> for PublicUser {
    fn from(row: &UserRow) -> Self {
        PublicUser {
            id: row.id,
            name: row.name.clone(),
            email: row.email.clone(),
            image: row.image_url.clone(),
            // The CHECK constraint keeps role in the allowed set
            user_type: UserRole::parse(&row.role).unwrap_or(UserRole::Candidate),
            resume: row.resume_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_row(role: &str, resume: Option<&str>) -> UserRow {
        UserRow {
            id: 7,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "$argon2id$not-a-real-hash".to_string(),
            image_url: "https://media.test/ada.png".to_string(),
            role: role.to_string(),
            resume_url: resume.map(String::from),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn public_user_never_contains_the_password_hash() {
        let row = sample_row("candidate", Some("https://media.test/cv.pdf"));
        let json = serde_json::to_string(&PublicUser::from(&row)).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("password"));
    }

    #[test]
    fn public_user_uses_the_wire_field_names() {
        let row = sample_row("recruiter", None);
        let value: serde_json::Value =
            serde_json::to_value(PublicUser::from(&row)).unwrap();
        assert_eq!(value["userType"], "recruiter");
        // resume is omitted entirely when absent
        assert!(value.get("resume").is_none());
    }

    #[test]
    fn role_parsing_round_trips() {
        assert_eq!(UserRole::parse("candidate"), Some(UserRole::Candidate));
        assert_eq!(UserRole::parse("recruiter"), Some(UserRole::Recruiter));
        assert_eq!(UserRole::parse("admin"), None);
        assert_eq!(UserRole::Recruiter.as_str(), "recruiter");
    }
}
