//! Domain entities: core data structures

use std::borrow::Borrow;
use std::fmt;

use chrono::NaiveDate;

/// Stable identifier of a family member, unique within one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberId(String);

impl MemberId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for MemberId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MemberId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for MemberId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

/// Identity and biographical facts of one person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyMember {
    pub id: MemberId,
    pub first_name: String,
    pub last_name: String,
    /// Used for child ordering and default root selection; absent dates sort last
    pub birth_date: Option<NaiveDate>,
    pub death_date: Option<NaiveDate>,
    pub gender: Gender,
    pub notes: Option<String>,
}

impl FamilyMember {
    pub fn new(id: impl Into<MemberId>, first_name: &str, last_name: &str, gender: Gender) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            birth_date: None,
            death_date: None,
            gender,
            notes: None,
        }
    }

    pub fn born(mut self, date: NaiveDate) -> Self {
        self.birth_date = Some(date);
        self
    }

    pub fn died(mut self, date: NaiveDate) -> Self {
        self.death_date = Some(date);
        self
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }

    /// "First Last", without stray whitespace when either part is empty.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    pub fn is_deceased(&self) -> bool {
        self.death_date.is_some()
    }
}

impl fmt::Display for FamilyMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Closed set of edge types.
///
/// `A -Parent-> B`: A is a parent of B.
/// `A -Child-> B`: A is a child of B.
/// `A -Spouse-> B`: A is married to B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipType {
    Parent,
    Child,
    Spouse,
}

impl RelationshipType {
    pub(crate) fn slot(self) -> usize {
        match self {
            RelationshipType::Parent => 0,
            RelationshipType::Child => 1,
            RelationshipType::Spouse => 2,
        }
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationshipType::Parent => write!(f, "parent"),
            RelationshipType::Child => write!(f, "child"),
            RelationshipType::Spouse => write!(f, "spouse"),
        }
    }
}

/// Directed, typed edge between two members.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Relationship {
    pub from_member_id: MemberId,
    pub to_member_id: MemberId,
    pub relationship_type: RelationshipType,
}

impl Relationship {
    pub fn new(
        from: impl Into<MemberId>,
        to: impl Into<MemberId>,
        relationship_type: RelationshipType,
    ) -> Self {
        Self {
            from_member_id: from.into(),
            to_member_id: to.into(),
            relationship_type,
        }
    }

    pub fn parent(parent: impl Into<MemberId>, child: impl Into<MemberId>) -> Self {
        Self::new(parent, child, RelationshipType::Parent)
    }

    pub fn child(child: impl Into<MemberId>, parent: impl Into<MemberId>) -> Self {
        Self::new(child, parent, RelationshipType::Child)
    }

    pub fn spouse(from: impl Into<MemberId>, to: impl Into<MemberId>) -> Self {
        Self::new(from, to, RelationshipType::Spouse)
    }
}

/// One member as delivered by the data-loading layer, with its embedded edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRecord {
    pub member: FamilyMember,
    /// Edges where this member is the source
    pub relationships: Vec<Relationship>,
    /// Edges where this member is the target
    pub related_to: Vec<Relationship>,
}

impl MemberRecord {
    pub fn new(member: FamilyMember) -> Self {
        Self {
            member,
            relationships: Vec::new(),
            related_to: Vec::new(),
        }
    }
}

/// Sort key placing dated members first (ascending), undated members last.
///
/// Combine with a stable sort to keep input order among equal keys.
pub fn birth_order_key(member: &FamilyMember) -> (bool, Option<NaiveDate>) {
    (member.birth_date.is_none(), member.birth_date)
}
