// API payload types module

use serde::Serialize;

/// A record in the static user directory.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: &'static str,
    pub email: &'static str,
}

/// The fixed user directory. There is no write path, so the records
/// live in the binary.
pub const USERS: [User; 2] = [
    User {
        id: 1,
        name: "Nik",
        email: "nik@example.com",
    },
    User {
        id: 2,
        name: "Kev",
        email: "kev@example.com",
    },
];

/// Body of `GET /`
#[derive(Debug, Serialize)]
pub struct RootStatus {
    pub message: &'static str,
    pub status: &'static str,
}

/// Body of `GET /health`
#[derive(Debug, Serialize)]
pub struct HealthStatus<'a> {
    pub status: &'static str,
    pub environment: &'a str,
}

/// Body of `GET /test`
#[derive(Debug, Serialize)]
pub struct CorsEcho<'a> {
    pub message: &'static str,
    pub origins: &'a [String],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_directory_shape() {
        assert_eq!(USERS.len(), 2);
        for user in &USERS {
            assert!(user.id > 0);
            assert!(!user.name.is_empty());
            assert!(user.email.contains('@'));
        }
        assert_ne!(USERS[0].id, USERS[1].id);
    }

    #[test]
    fn test_user_serializes_with_expected_fields() {
        let value = serde_json::to_value(USERS[0]).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["name"], "Nik");
        assert_eq!(value["email"], "nik@example.com");
    }
}
