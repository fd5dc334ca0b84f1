//! Declarative permission table
//!
//! A static mapping from resource × role to the coarse actions that role may
//! take. This is a secondary, advisory surface: the entity guards in
//! [`guards`](super::guards) encode the finer-grained ownership logic this
//! table cannot express, and they win when the two disagree. Handlers consult
//! the table where no entity exists yet to guard (e.g. lab creation).

use super::roles::{ADMIN, LAB_ASSISTANT, PROFESSOR, STUDENT};

/// Resource kinds gated by the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Lab,
    User,
    Job,
}

/// Coarse actions a role may take on a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

const ALL_ACTIONS: &[Action] = &[Action::Create, Action::Read, Action::Update, Action::Delete];
const NONE: &[Action] = &[];

/// Actions a single role is allowed on a resource
pub fn allowed_actions(resource: Resource, role: &str) -> &'static [Action] {
    match (resource, role) {
        (_, r) if r == ADMIN => ALL_ACTIONS,

        (Resource::Lab, r) if r == PROFESSOR => &[Action::Create, Action::Read, Action::Update],
        (Resource::Lab, r) if r == LAB_ASSISTANT => &[Action::Read],
        (Resource::Lab, r) if r == STUDENT => NONE,

        (Resource::User, r) if r == PROFESSOR => &[Action::Read],
        (Resource::User, r) if r == LAB_ASSISTANT => &[Action::Read],
        (Resource::User, r) if r == STUDENT => NONE,

        (Resource::Job, r) if r == PROFESSOR => ALL_ACTIONS,
        (Resource::Job, r) if r == LAB_ASSISTANT => {
            &[Action::Create, Action::Read, Action::Update]
        }
        (Resource::Job, r) if r == STUDENT => &[Action::Read],

        _ => NONE,
    }
}

/// True iff any role in the caller's set has `action` listed for `resource`
pub fn has_permission(roles: &[String], resource: Resource, action: Action) -> bool {
    roles
        .iter()
        .any(|role| allowed_actions(resource, role).contains(&action))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_admin_allowed_everything() {
        let set = roles(&[ADMIN]);
        for resource in [Resource::Lab, Resource::User, Resource::Job] {
            for action in [Action::Create, Action::Read, Action::Update, Action::Delete] {
                assert!(has_permission(&set, resource, action));
            }
        }
    }

    #[test]
    fn test_professor_lab_actions() {
        let set = roles(&[PROFESSOR]);
        assert!(has_permission(&set, Resource::Lab, Action::Create));
        assert!(has_permission(&set, Resource::Lab, Action::Update));
        assert!(!has_permission(&set, Resource::Lab, Action::Delete));
    }

    #[test]
    fn test_lab_assistant_cannot_delete_jobs() {
        let set = roles(&[LAB_ASSISTANT]);
        assert!(has_permission(&set, Resource::Job, Action::Update));
        assert!(!has_permission(&set, Resource::Job, Action::Delete));
        assert!(!has_permission(&set, Resource::Lab, Action::Update));
    }

    #[test]
    fn test_student_read_only_jobs() {
        let set = roles(&[STUDENT]);
        assert!(has_permission(&set, Resource::Job, Action::Read));
        assert!(!has_permission(&set, Resource::Job, Action::Create));
        assert!(!has_permission(&set, Resource::Lab, Action::Read));
        assert!(!has_permission(&set, Resource::User, Action::Read));
    }

    #[test]
    fn test_any_role_in_set_grants() {
        let set = roles(&[STUDENT, PROFESSOR]);
        assert!(has_permission(&set, Resource::Lab, Action::Create));
    }

    #[test]
    fn test_unknown_role_grants_nothing() {
        let set = roles(&["Janitor"]);
        assert!(!has_permission(&set, Resource::Job, Action::Read));
    }
}
