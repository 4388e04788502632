//! Default root selection.

use tracing::{debug, instrument};

use crate::domain::entities::{birth_order_key, FamilyMember, MemberId};

/// Pick the member with the earliest birth date.
///
/// Ties keep the first occurrence in input order. Undated members lose to
/// any dated one; when nobody is dated the first member is returned.
/// `None` means there is nothing to root a tree on.
#[instrument(level = "debug", skip_all, fields(members = members.len()))]
pub fn select_default_root(members: &[FamilyMember]) -> Option<MemberId> {
    // min_by_key keeps the first of equal minima
    let root = members.iter().min_by_key(|m| birth_order_key(m))?;
    debug!(root = %root.id, "Selected default root");
    Some(root.id.clone())
}
