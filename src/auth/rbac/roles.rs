//! Role primitives
//!
//! Role names are a closed, case-sensitive set. Matching is exact string
//! comparison; there is no hierarchy here beyond what the entity guards
//! encode themselves.

/// Bypasses every ownership and membership check
pub const ADMIN: &str = "Admin";
/// Owns labs and jobs
pub const PROFESSOR: &str = "Professor";
/// Assists in labs they are associated with
pub const LAB_ASSISTANT: &str = "LabAssistant";
/// Browses and applies to open jobs
pub const STUDENT: &str = "Student";

/// The closed set of valid role names
pub const ROLE_NAMES: [&str; 4] = [ADMIN, PROFESSOR, LAB_ASSISTANT, STUDENT];

/// Exact-string membership test against the caller's role set
pub fn has_role(roles: &[String], role: &str) -> bool {
    roles.iter().any(|r| r == role)
}

/// True if any candidate role is present in the caller's role set
pub fn has_any_role(roles: &[String], candidates: &[&str]) -> bool {
    candidates.iter().any(|candidate| has_role(roles, candidate))
}

/// Whether a name is one of the four known roles
pub fn is_valid_role(role: &str) -> bool {
    ROLE_NAMES.contains(&role)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_has_role_exact_match() {
        let set = roles(&[PROFESSOR, STUDENT]);
        assert!(has_role(&set, PROFESSOR));
        assert!(has_role(&set, STUDENT));
        assert!(!has_role(&set, ADMIN));
    }

    #[test]
    fn test_has_role_is_case_sensitive() {
        let set = roles(&["professor", "ADMIN"]);
        assert!(!has_role(&set, PROFESSOR));
        assert!(!has_role(&set, ADMIN));
    }

    #[test]
    fn test_has_any_role() {
        let set = roles(&[LAB_ASSISTANT]);
        assert!(has_any_role(&set, &[PROFESSOR, LAB_ASSISTANT]));
        assert!(!has_any_role(&set, &[PROFESSOR, ADMIN]));
        assert!(!has_any_role(&set, &[]));
    }

    #[test]
    fn test_empty_role_set() {
        assert!(!has_role(&[], ADMIN));
        assert!(!has_any_role(&[], &[ADMIN, STUDENT]));
    }

    #[test]
    fn test_is_valid_role() {
        assert!(is_valid_role("Admin"));
        assert!(is_valid_role("LabAssistant"));
        assert!(!is_valid_role("admin"));
        assert!(!is_valid_role("Janitor"));
    }
}
