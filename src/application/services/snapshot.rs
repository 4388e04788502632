//! Snapshot loading service
//!
//! Turns the JSON member export of the data-loading layer into a
//! [`FamilyGraph`]. Each member embeds the edges where it is the source
//! (`relationships`) and where it is the target (`related_to`).

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{
    DomainError, FamilyGraph, FamilyMember, Gender, MemberId, MemberRecord, Relationship,
    RelationshipType,
};
use crate::infrastructure::traits::FileSystem;

/// Ids arrive either as strings or as database integers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for MemberId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => MemberId::new(s),
            RawId::Number(n) => MemberId::new(n.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RawRelationshipType {
    Parent,
    Child,
    Spouse,
}

impl From<RawRelationshipType> for RelationshipType {
    fn from(raw: RawRelationshipType) -> Self {
        match raw {
            RawRelationshipType::Parent => RelationshipType::Parent,
            RawRelationshipType::Child => RelationshipType::Child,
            RawRelationshipType::Spouse => RelationshipType::Spouse,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRelationship {
    from_member_id: RawId,
    to_member_id: RawId,
    #[serde(rename = "type")]
    relationship_type: RawRelationshipType,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMember {
    id: RawId,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    birth_date: Option<String>,
    #[serde(default)]
    death_date: Option<String>,
    #[serde(default)]
    gender: Option<String>,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    relationships: Vec<RawRelationship>,
    #[serde(default, rename = "related_to", alias = "relatedTo")]
    related_to: Vec<RawRelationship>,
}

/// Parse `YYYY-MM-DD` or an RFC 3339 timestamp (date part only).
///
/// Empty strings mean "unknown".
fn parse_date(member: &MemberId, value: Option<String>) -> ApplicationResult<Option<NaiveDate>> {
    let Some(value) = value else {
        return Ok(None);
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.date_naive()))
        .map(Some)
        .map_err(|_| {
            ApplicationError::from(DomainError::InvalidDate {
                member: member.to_string(),
                value: value.clone(),
            })
        })
}

fn parse_gender(member: &MemberId, value: Option<&str>) -> ApplicationResult<Gender> {
    let Some(value) = value else {
        return Err(ApplicationError::Snapshot {
            message: format!("member {}: missing field `gender`", member),
        });
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "male" => Ok(Gender::Male),
        "female" => Ok(Gender::Female),
        other => Err(ApplicationError::Snapshot {
            message: format!("member {}: unknown `gender` '{}'", member, other),
        }),
    }
}

fn convert_edges(raw: Vec<RawRelationship>) -> Vec<Relationship> {
    raw.into_iter()
        .map(|edge| {
            Relationship::new(
                edge.from_member_id,
                edge.to_member_id,
                edge.relationship_type.into(),
            )
        })
        .collect()
}

impl TryFrom<RawMember> for MemberRecord {
    type Error = ApplicationError;

    fn try_from(raw: RawMember) -> ApplicationResult<Self> {
        let id = MemberId::from(raw.id);
        let member = FamilyMember {
            birth_date: parse_date(&id, raw.birth_date)?,
            death_date: parse_date(&id, raw.death_date)?,
            gender: parse_gender(&id, raw.gender.as_deref())?,
            first_name: raw.first_name,
            last_name: raw.last_name,
            notes: raw.notes.filter(|n| !n.trim().is_empty()),
            id,
        };
        Ok(MemberRecord {
            member,
            relationships: convert_edges(raw.relationships),
            related_to: convert_edges(raw.related_to),
        })
    }
}

fn snapshot_err(message: impl Into<String>) -> ApplicationError {
    ApplicationError::Snapshot {
        message: message.into(),
    }
}

/// Id of a not yet deserialized member, for error messages.
fn describe_member(position: usize, value: &Value) -> String {
    match value.get("id") {
        Some(Value::String(id)) => format!("member {} (#{})", id, position + 1),
        Some(Value::Number(id)) => format!("member {} (#{})", id, position + 1),
        _ => format!("member #{}", position + 1),
    }
}

/// Parse snapshot JSON into member records, preserving input order.
///
/// The top level is either a bare member array or `{ "members": [...] }`.
/// Members are deserialized one by one so that errors name the offending
/// member and field.
pub fn parse_snapshot(content: &str) -> ApplicationResult<Vec<MemberRecord>> {
    let document: Value = serde_json::from_str(content).map_err(|e| snapshot_err(e.to_string()))?;
    let members = match document {
        Value::Array(members) => members,
        Value::Object(mut object) => match object.remove("members") {
            Some(Value::Array(members)) => members,
            Some(_) => return Err(snapshot_err("`members` must be an array")),
            None => return Err(snapshot_err("expected a member array or an object with `members`")),
        },
        _ => return Err(snapshot_err("expected a member array or an object with `members`")),
    };

    members
        .into_iter()
        .enumerate()
        .map(|(position, value)| {
            let context = describe_member(position, &value);
            let raw: RawMember = serde_json::from_value(value)
                .map_err(|e| snapshot_err(format!("{}: {}", context, e)))?;
            MemberRecord::try_from(raw)
        })
        .collect()
}

/// Service for reading graph snapshots from disk.
pub struct SnapshotService {
    fs: Arc<dyn FileSystem>,
}

impl SnapshotService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Read and index a snapshot file.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<FamilyGraph> {
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read snapshot", path)?;
        let records = parse_snapshot(&content)?;
        debug!("load: {} members from {}", records.len(), path.display());
        Ok(FamilyGraph::from_records(records))
    }
}
