//! Role-Based Access Control (RBAC) decision layer
//!
//! Everything here is pure and synchronous: guards take snapshots of
//! already-loaded documents plus the caller's subject id and role set, and
//! return a boolean. They never perform lookups, never hold state, and never
//! error; denial is always `false`.

mod guards;
mod normalize;
mod permissions;
mod roles;

pub use guards::{
    can_add_user_to_lab, can_apply_to_job, can_create_job, can_manage_job, can_modify_lab,
    can_remove_user_from_lab, can_view_job, can_view_lab,
};
pub use normalize::{MultiValued, normalize};
pub use permissions::{Action, Resource, allowed_actions, has_permission};
pub use roles::{
    ADMIN, LAB_ASSISTANT, PROFESSOR, ROLE_NAMES, STUDENT, has_any_role, has_role, is_valid_role,
};
