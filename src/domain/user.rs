use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    User,
    Guide,
    LeadGuide,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub photo: String,
    pub role: Role,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: String, email: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email: email.to_lowercase(),
            photo: "default.jpg".to_string(),
            role: Role::User,
            active: true,
            created_at: Utc::now(),
        }
    }

    /// First name only, used when addressing the user in emails.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new("Eliana Garcia".to_string(), "Eliana@Example.com".to_string());

        assert_eq!(user.email, "eliana@example.com");
        assert_eq!(user.photo, "default.jpg");
        assert_eq!(user.role, Role::User);
        assert!(user.active);
    }

    #[test]
    fn test_first_name() {
        let user = User::new("Eliana Garcia".to_string(), "e@example.com".to_string());
        assert_eq!(user.first_name(), "Eliana");

        let mononym = User::new("Cher".to_string(), "c@example.com".to_string());
        assert_eq!(mononym.first_name(), "Cher");
    }

    #[test]
    fn test_role_serde_kebab_case() {
        assert_eq!(serde_json::to_string(&Role::LeadGuide).unwrap(), "\"lead-guide\"");
        let role: Role = serde_json::from_str("\"guide\"").unwrap();
        assert_eq!(role, Role::Guide);
    }
}
