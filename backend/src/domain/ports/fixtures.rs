//! Deterministic member data shared by the driving-port fixtures.

use chrono::{DateTime, TimeZone, Utc};

use crate::domain::{AlumniDetails, AlumniId, AlumniName, AlumniRecord, Error};

/// Identifier of the member every fixture port knows about.
pub const FIXTURE_MEMBER_ID: &str = "Xy7Qm2Lp9Rt4Vb8Nc1Dz";

const FIXTURE_NAME: &str = "Michael Chen";

fn fixture_timestamp() -> Result<DateTime<Utc>, Error> {
    Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0)
        .single()
        .ok_or_else(|| Error::internal("invalid fixture timestamp"))
}

/// Build the fixture member.
///
/// The values are constants; invalid data surfaces as an internal error so
/// automated checks catch accidental regressions.
pub(super) fn fixture_member() -> Result<AlumniRecord, Error> {
    let id = AlumniId::new(FIXTURE_MEMBER_ID)
        .map_err(|err| Error::internal(format!("invalid fixture member id: {err}")))?;
    let name = AlumniName::new(FIXTURE_NAME)
        .map_err(|err| Error::internal(format!("invalid fixture member name: {err}")))?;
    let timestamp = fixture_timestamp()?;
    Ok(AlumniRecord {
        id,
        name,
        batch: Some("2018".to_owned()),
        profession: Some("Software Engineer".to_owned()),
        details: AlumniDetails {
            location: Some("San Francisco, CA".to_owned()),
            company: Some("Google".to_owned()),
            skills: Some(vec!["Python".to_owned(), "Go".to_owned()]),
            ..AlumniDetails::default()
        },
        created_at: timestamp,
        updated_at: timestamp,
    })
}
