//! Wire types for the Firestore REST v1 document API.
//!
//! Documents are decoded into these DTOs first and then mapped onto
//! [`AlumniRecord`] in one pass. Field values are decoded leniently: the
//! collection is schemaless, so unknown value kinds are ignored rather than
//! failing the whole listing.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::domain::{AlumniDetails, AlumniId, AlumniName, AlumniRecord};

pub(super) const CREATED_AT_FIELD: &str = "createdAt";
pub(super) const UPDATED_AT_FIELD: &str = "updatedAt";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct DocumentDto {
    pub(super) name: String,
    #[serde(default)]
    pub(super) fields: BTreeMap<String, Value>,
    pub(super) create_time: Option<DateTime<Utc>>,
    pub(super) update_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ListDocumentsDto {
    #[serde(default)]
    pub(super) documents: Vec<DocumentDto>,
    pub(super) next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RunQueryItemDto {
    pub(super) document: Option<DocumentDto>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CommitResponseDto {
    #[serde(default)]
    pub(super) write_results: Vec<WriteResultDto>,
    pub(super) commit_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct WriteResultDto {
    #[serde(default)]
    pub(super) transform_results: Vec<Value>,
    pub(super) update_time: Option<DateTime<Utc>>,
}

impl CommitResponseDto {
    /// Server timestamp written by the first transform of the first write.
    pub(super) fn request_time(&self) -> Option<DateTime<Utc>> {
        let first = self.write_results.first();
        first
            .and_then(|result| result.transform_results.first())
            .and_then(|value| match decode_value(value) {
                FieldValue::Timestamp(at) => Some(at),
                _ => None,
            })
            .or_else(|| first.and_then(|result| result.update_time))
            .or(self.commit_time)
    }
}

/// Decoded Firestore value, reduced to the kinds alumni records use.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum FieldValue {
    Text(String),
    List(Vec<String>),
    Timestamp(DateTime<Utc>),
    Null,
    Other,
}

pub(super) fn decode_value(value: &Value) -> FieldValue {
    let Some(object) = value.as_object() else {
        return FieldValue::Other;
    };
    if let Some(text) = object.get("stringValue").and_then(Value::as_str) {
        return FieldValue::Text(text.to_owned());
    }
    if let Some(integer) = object.get("integerValue") {
        return match integer {
            Value::String(raw) => FieldValue::Text(raw.clone()),
            Value::Number(number) => FieldValue::Text(number.to_string()),
            _ => FieldValue::Other,
        };
    }
    if let Some(raw) = object.get("timestampValue").and_then(Value::as_str) {
        return DateTime::parse_from_rfc3339(raw)
            .map(|at| FieldValue::Timestamp(at.with_timezone(&Utc)))
            .unwrap_or(FieldValue::Other);
    }
    if let Some(array) = object.get("arrayValue") {
        let items = array
            .get("values")
            .and_then(Value::as_array)
            .map(|values| {
                values
                    .iter()
                    .filter_map(|item| match decode_value(item) {
                        FieldValue::Text(text) => Some(text),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default();
        return FieldValue::List(items);
    }
    if object.contains_key("nullValue") {
        return FieldValue::Null;
    }
    FieldValue::Other
}

pub(super) fn encode_text(text: &str) -> Value {
    json!({ "stringValue": text })
}

pub(super) fn encode_list(items: &[String]) -> Value {
    let values: Vec<Value> = items.iter().map(|item| encode_text(item)).collect();
    json!({ "arrayValue": { "values": values } })
}

/// Encode the fields present in `details` into a Firestore field map.
pub(super) fn encode_details(details: &AlumniDetails, fields: &mut Map<String, Value>) {
    let text = [
        ("location", &details.location),
        ("company", &details.company),
        ("email", &details.email),
        ("linkedin", &details.linkedin),
        ("photo", &details.photo),
        ("bio", &details.bio),
        ("education", &details.education),
    ];
    for (key, value) in text {
        if let Some(value) = value {
            fields.insert(key.to_owned(), encode_text(value));
        }
    }
    let lists = [
        ("achievements", &details.achievements),
        ("interests", &details.interests),
        ("skills", &details.skills),
    ];
    for (key, value) in lists {
        if let Some(value) = value {
            fields.insert(key.to_owned(), encode_list(value));
        }
    }
}

impl DocumentDto {
    /// Map the document onto a record.
    ///
    /// Returns an error message when the document cannot form a record; the
    /// caller decides whether to skip it or fail.
    pub(super) fn into_record(self) -> Result<AlumniRecord, String> {
        let raw_id = self
            .name
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_owned();
        let id = AlumniId::new(raw_id)
            .map_err(|err| format!("document {} has an invalid id: {err}", self.name))?;
        let name = match self.text("name") {
            Some(name) => AlumniName::new(name)
                .map_err(|err| format!("document {} has an invalid name: {err}", self.name))?,
            None => return Err(format!("document {} has no name", self.name)),
        };
        let created_at = self
            .timestamp(CREATED_AT_FIELD)
            .or(self.create_time)
            .ok_or_else(|| format!("document {} has no creation time", self.name))?;
        let updated_at = self
            .timestamp(UPDATED_AT_FIELD)
            .or(self.update_time)
            .unwrap_or(created_at);

        Ok(AlumniRecord {
            id,
            name,
            batch: self.text("batch"),
            profession: self.text("profession"),
            details: AlumniDetails {
                location: self.text("location"),
                company: self.text("company"),
                email: self.text("email"),
                linkedin: self.text("linkedin"),
                photo: self.text("photo"),
                bio: self.text("bio"),
                education: self.text("education"),
                achievements: self.list("achievements"),
                interests: self.list("interests"),
                skills: self.list("skills"),
            },
            created_at,
            updated_at,
        })
    }

    fn decoded(&self, key: &str) -> FieldValue {
        self.fields
            .get(key)
            .map_or(FieldValue::Null, decode_value)
    }

    fn text(&self, key: &str) -> Option<String> {
        match self.decoded(key) {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    fn list(&self, key: &str) -> Option<Vec<String>> {
        match self.decoded(key) {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    fn timestamp(&self, key: &str) -> Option<DateTime<Utc>> {
        match self.decoded(key) {
            FieldValue::Timestamp(at) => Some(at),
            _ => None,
        }
    }
}
