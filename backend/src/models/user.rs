/// Role carried in the caller's access token.
///
/// Unknown role strings are kept rather than rejected so that a valid token with
/// an unexpected role is refused with 403 instead of 401.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserRole {
    Student,
    Teacher,
    Admin,
    Other(String),
}

/// Roles allowed to list every announcement and to create, update or delete them.
pub const STAFF_ROLES: &[UserRole] = &[UserRole::Teacher, UserRole::Admin];

impl UserRole {
    pub fn is_staff(&self) -> bool {
        STAFF_ROLES.contains(self)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            UserRole::Student => "student",
            UserRole::Teacher => "teacher",
            UserRole::Admin => "admin",
            UserRole::Other(s) => s.as_str(),
        };
        write!(f, "{s}")
    }
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            "student" => UserRole::Student,
            "teacher" => UserRole::Teacher,
            "admin" => UserRole::Admin,
            other => UserRole::Other(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_roles() {
        assert!(UserRole::from("teacher").is_staff());
        assert!(UserRole::from("admin").is_staff());
        assert!(!UserRole::from("student").is_staff());
        assert!(!UserRole::from("parent").is_staff());
        assert!(!UserRole::from("Admin").is_staff());
    }

    #[test]
    fn display_keeps_unknown_role_text() {
        assert_eq!(UserRole::from("janitor").to_string(), "janitor");
        assert_eq!(UserRole::Teacher.to_string(), "teacher");
    }
}
