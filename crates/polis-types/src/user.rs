use serde::{Deserialize, Serialize};

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifier of a user, assigned by the storage engine on first insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A persisted user account.
///
/// A `User` value only exists once the storage engine has assigned its id, so
/// there is no "unsaved" state to represent.
///
/// The password is kept exactly as the caller supplied it. Nothing in this
/// layer hashes it; `Debug` output redacts it so it does not leak into logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub password: String,
    /// Free-form privilege label, `"user"` unless the caller says otherwise.
    pub privilege: String,
}

impl User {
    /// Privilege assigned when the caller has no opinion.
    pub const DEFAULT_PRIVILEGE: &'static str = "user";
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("privilege", &self.privilege)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> User {
        User {
            id: UserId(7),
            email: "a@x.com".to_string(),
            password: "hunter2".to_string(),
            privilege: User::DEFAULT_PRIVILEGE.to_string(),
        }
    }

    #[test]
    fn test_user_id_parse_and_display() {
        let id: UserId = " 42 ".parse().unwrap();
        assert_eq!(id, UserId(42));
        assert_eq!(id.to_string(), "42");
        assert!("forty-two".parse::<UserId>().is_err());
    }

    #[test]
    fn test_debug_redacts_password() {
        let rendered = format!("{:?}", sample());
        assert!(rendered.contains("a@x.com"));
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_user_id_serializes_as_plain_integer() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["privilege"], "user");
    }
}
