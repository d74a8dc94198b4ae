//! Seed dataset loading orchestration.
//!
//! Converts validated `alumni-seed` entries into drafts and inserts them one
//! at a time through the record store gateway. Seeding stops at the first
//! failure and reports how far it got.

use std::sync::Arc;

use alumni_seed::{SeedAlumnus, SeedDataset};
use thiserror::Error;
use tracing::info;

use crate::domain::ports::{AlumniRepository, AlumniRepositoryError};
use crate::domain::{AlumniDetails, AlumniDraft, AlumniId, AlumniName, AlumniValidationError};

/// Result of seeding a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedOutcome {
    /// Identifiers assigned to the inserted records, in dataset order.
    pub inserted: Vec<AlumniId>,
}

/// Errors raised while seeding.
#[derive(Debug, Error)]
pub enum AlumniSeedingError {
    /// An entry failed backend validation.
    #[error("seed entry {index} is invalid: {source}")]
    InvalidEntry {
        index: usize,
        #[source]
        source: AlumniValidationError,
    },
    /// The store rejected an insert after `inserted` records succeeded.
    #[error("seeding stopped after {inserted} records: {source}")]
    Persistence {
        inserted: usize,
        #[source]
        source: AlumniRepositoryError,
    },
}

/// Convert a dataset entry into a create draft.
pub fn draft_from_seed(entry: SeedAlumnus) -> Result<AlumniDraft, AlumniValidationError> {
    let name = AlumniName::new(entry.name)?;
    let details = AlumniDetails {
        location: entry.location,
        company: entry.company,
        email: entry.email,
        linkedin: entry.linkedin,
        photo: entry.photo,
        bio: entry.bio,
        education: entry.education,
        achievements: entry.achievements,
        interests: entry.interests,
        skills: entry.skills,
    };
    Ok(AlumniDraft::new(name, entry.batch, entry.profession)?.with_details(details))
}

/// Service that loads a seed dataset into the store.
#[derive(Clone)]
pub struct AlumniSeeder<R> {
    repository: Arc<R>,
}

impl<R> AlumniSeeder<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> AlumniSeeder<R>
where
    R: AlumniRepository,
{
    /// Insert every entry of `dataset`.
    ///
    /// All entries are converted before the first insert, so a bad entry
    /// never leaves a partially seeded collection behind.
    ///
    /// # Errors
    ///
    /// Returns [`AlumniSeedingError`] if an entry is invalid or an insert
    /// fails.
    pub async fn seed(&self, dataset: SeedDataset) -> Result<SeedOutcome, AlumniSeedingError> {
        let drafts = dataset
            .into_entries()
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                draft_from_seed(entry)
                    .map_err(|source| AlumniSeedingError::InvalidEntry { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut inserted = Vec::with_capacity(drafts.len());
        for draft in &drafts {
            let record = self.repository.create(draft).await.map_err(|source| {
                AlumniSeedingError::Persistence {
                    inserted: inserted.len(),
                    source,
                }
            })?;
            info!(id = %record.id, name = %record.name, "seeded alumni record");
            inserted.push(record.id);
        }
        info!(count = inserted.len(), "alumni seeding complete");
        Ok(SeedOutcome { inserted })
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for seeding orchestration.

    use super::*;
    use crate::domain::AlumniRecord;
    use crate::domain::ports::MockAlumniRepository;
    use chrono::Utc;
    use rstest::rstest;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const TWO_ENTRIES: &str = r#"{
        "version": 1,
        "alumni": [
            {"name": "Ann", "batch": "2015", "profession": "Doctor", "skills": ["Surgery"]},
            {"name": "Ben", "batch": "2016", "profession": "Engineer"}
        ]
    }"#;

    fn dataset() -> SeedDataset {
        SeedDataset::from_json(TWO_ENTRIES).expect("dataset should parse")
    }

    fn store_counter(repo: &mut MockAlumniRepository, fail_on: Option<usize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        repo.expect_create().returning(move |draft| {
            let call = calls.fetch_add(1, Ordering::SeqCst);
            if Some(call) == fail_on {
                return Err(AlumniRepositoryError::connection("refused"));
            }
            let id = AlumniId::new(format!("id{call}")).expect("id");
            Ok(AlumniRecord::from_draft(id, draft, Utc::now()))
        });
    }

    #[rstest]
    #[tokio::test]
    async fn seed_inserts_every_entry_in_order() {
        let mut repo = MockAlumniRepository::new();
        store_counter(&mut repo, None);

        let outcome = AlumniSeeder::new(Arc::new(repo))
            .seed(dataset())
            .await
            .expect("seed succeeds");

        let ids: Vec<_> = outcome.inserted.iter().map(AlumniId::to_string).collect();
        assert_eq!(ids, vec!["id0", "id1"]);
    }

    #[rstest]
    #[tokio::test]
    async fn seed_stops_at_the_first_failure() {
        let mut repo = MockAlumniRepository::new();
        store_counter(&mut repo, Some(1));

        let err = AlumniSeeder::new(Arc::new(repo))
            .seed(dataset())
            .await
            .expect_err("second insert fails");

        assert!(matches!(
            err,
            AlumniSeedingError::Persistence { inserted: 1, .. }
        ));
    }

    #[rstest]
    fn bundled_entries_convert_to_drafts() {
        let bundled = SeedDataset::bundled().expect("bundled dataset");
        for entry in bundled.into_entries() {
            let draft = draft_from_seed(entry).expect("valid draft");
            assert!(draft.validate().is_ok());
        }
    }

    #[rstest]
    fn conversion_keeps_sequence_order() {
        let entry = dataset().into_entries().remove(0);
        let draft = draft_from_seed(entry).expect("draft");
        assert_eq!(draft.details.skills, Some(vec!["Surgery".to_owned()]));
    }
}
