//! Immutable family graph snapshot with an adjacency index.
//!
//! Built once per data snapshot; every lookup afterwards is a hash access
//! instead of a scan over each member's edge list.

use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use tracing::{debug, instrument, warn};

use crate::domain::entities::{
    birth_order_key, FamilyMember, MemberId, MemberRecord, Relationship, RelationshipType,
};

/// Edges touching one member, bucketed by type.
#[derive(Debug, Default)]
struct EdgeIndex {
    outgoing: [Vec<Relationship>; 3],
    incoming: [Vec<Relationship>; 3],
}

#[derive(Debug, Default)]
pub struct FamilyGraph {
    members: Vec<FamilyMember>,
    positions: HashMap<MemberId, usize>,
    edges: HashMap<MemberId, EdgeIndex>,
}

impl FamilyGraph {
    /// Build the graph from members and a flat edge list.
    ///
    /// Duplicate member ids keep the first occurrence. An edge reported more
    /// than once is indexed once, at its first position.
    #[instrument(level = "debug", skip_all)]
    pub fn new(members: Vec<FamilyMember>, edges: impl IntoIterator<Item = Relationship>) -> Self {
        let mut graph = Self::default();

        for member in members {
            if graph.positions.contains_key(&member.id) {
                warn!(id = %member.id, "Duplicate member id, keeping first occurrence");
                continue;
            }
            graph.positions.insert(member.id.clone(), graph.members.len());
            graph.members.push(member);
        }

        let mut seen: HashSet<Relationship> = HashSet::new();
        for edge in edges {
            if !seen.insert(edge.clone()) {
                continue;
            }
            let slot = edge.relationship_type.slot();
            graph
                .edges
                .entry(edge.to_member_id.clone())
                .or_default()
                .incoming[slot]
                .push(edge.clone());
            graph
                .edges
                .entry(edge.from_member_id.clone())
                .or_default()
                .outgoing[slot]
                .push(edge);
        }

        debug!(
            members = graph.members.len(),
            edges = seen.len(),
            "Family graph indexed"
        );
        graph
    }

    /// Build the graph from records that embed their own edges.
    pub fn from_records(records: Vec<MemberRecord>) -> Self {
        let mut members = Vec::with_capacity(records.len());
        let mut edges = Vec::new();
        for record in records {
            members.push(record.member);
            edges.extend(record.relationships);
            edges.extend(record.related_to);
        }
        Self::new(members, edges)
    }

    pub fn member(&self, id: &str) -> Option<&FamilyMember> {
        self.positions.get(id).map(|&pos| &self.members[pos])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    /// Members in input order.
    pub fn members(&self) -> &[FamilyMember] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Edges of the given type where `id` is the source, in input order.
    pub fn outgoing(&self, id: &str, relationship_type: RelationshipType) -> &[Relationship] {
        self.edges
            .get(id)
            .map(|idx| idx.outgoing[relationship_type.slot()].as_slice())
            .unwrap_or(&[])
    }

    /// Edges of the given type where `id` is the target, in input order.
    pub fn incoming(&self, id: &str, relationship_type: RelationshipType) -> &[Relationship] {
        self.edges
            .get(id)
            .map(|idx| idx.incoming[relationship_type.slot()].as_slice())
            .unwrap_or(&[])
    }

    /// First resolvable spouse.
    ///
    /// Outgoing spouse edges are consulted first; a one-directional edge
    /// pointing at `id` is used only when no outgoing edge resolves.
    pub fn spouse_of(&self, id: &str) -> Option<&FamilyMember> {
        let outgoing = self
            .outgoing(id, RelationshipType::Spouse)
            .iter()
            .map(|edge| &edge.to_member_id);
        let incoming = self
            .incoming(id, RelationshipType::Spouse)
            .iter()
            .map(|edge| &edge.from_member_id);

        outgoing
            .chain(incoming)
            .find_map(|spouse_id| self.resolve(id, spouse_id))
    }

    /// Children of `id`, oldest first, undated last in edge order.
    pub fn children_of(&self, id: &str) -> Vec<&FamilyMember> {
        let via_parent = self
            .outgoing(id, RelationshipType::Parent)
            .iter()
            .map(|edge| &edge.to_member_id);
        let via_child = self
            .incoming(id, RelationshipType::Child)
            .iter()
            .map(|edge| &edge.from_member_id);

        let mut children: Vec<&FamilyMember> = via_parent
            .chain(via_child)
            .unique()
            .filter_map(|child_id| self.resolve(id, child_id))
            .collect();
        children.sort_by_key(|m| birth_order_key(m));
        children
    }

    /// Parents of `id` in edge order.
    pub fn parents_of(&self, id: &str) -> Vec<&FamilyMember> {
        let via_parent = self
            .incoming(id, RelationshipType::Parent)
            .iter()
            .map(|edge| &edge.from_member_id);
        let via_child = self
            .outgoing(id, RelationshipType::Child)
            .iter()
            .map(|edge| &edge.to_member_id);

        via_parent
            .chain(via_child)
            .unique()
            .filter_map(|parent_id| self.resolve(id, parent_id))
            .collect()
    }

    fn resolve(&self, from: &str, target: &MemberId) -> Option<&FamilyMember> {
        let member = self.member(target.as_str());
        if member.is_none() {
            debug!(from, target = %target, "Skipping dangling relationship edge");
        }
        member
    }
}
