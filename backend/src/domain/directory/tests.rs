//! Tests for the directory engine, view state, and controller.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::generation::{ApplyOutcome, DiscardReason};
use crate::domain::ports::{AlumniRepositoryError, MockAlumniRepository};
use crate::domain::{AlumniDetails, AlumniId, AlumniName, AlumniRecord, Error};

fn epoch() -> DateTime<Utc> {
    Utc.timestamp_opt(0, 0).single().expect("valid epoch")
}

fn record(id: &str, name: &str, batch: Option<&str>, profession: Option<&str>) -> AlumniRecord {
    AlumniRecord {
        id: AlumniId::new(id).expect("id"),
        name: AlumniName::new(name).expect("name"),
        batch: batch.map(str::to_owned),
        profession: profession.map(str::to_owned),
        details: AlumniDetails::default(),
        created_at: epoch(),
        updated_at: epoch(),
    }
}

#[fixture]
fn seeded() -> Vec<AlumniRecord> {
    vec![
        record("a1", "David Kim", Some("2017"), Some("Financial Analyst")),
        record("a2", "Dr. Sarah Johnson", Some("2015"), Some("Medical Doctor")),
        record("a3", "Emily Rodriguez", Some("2016"), Some("Marketing Manager")),
        record("a4", "James Wilson", Some("2019"), Some("Data Scientist")),
        record("a5", "Lisa Thompson", Some("2014"), Some("Lawyer")),
        record("a6", "Michael Chen", Some("2018"), Some("Software Engineer")),
    ]
}

#[rstest]
fn unconstrained_filter_is_identity(seeded: Vec<AlumniRecord>) {
    let filter = DirectoryFilter::cleared();
    assert!(filter.is_unconstrained());
    assert_eq!(apply_filters(&seeded, &filter), seeded);
}

#[rstest]
#[case(DirectoryFilter::new("a", "", ""))]
#[case(DirectoryFilter::new("", "2015", ""))]
#[case(DirectoryFilter::new("i", "", "Lawyer"))]
#[case(DirectoryFilter::new("zzz", "", ""))]
fn filtering_is_idempotent(seeded: Vec<AlumniRecord>, #[case] filter: DirectoryFilter) {
    let once = apply_filters(&seeded, &filter);
    let twice = apply_filters(&once, &filter);
    assert_eq!(once, twice);
}

#[rstest]
fn results_are_an_ordered_subsequence(seeded: Vec<AlumniRecord>) {
    let filter = DirectoryFilter::new("e", "", "");
    let result = apply_filters(&seeded, &filter);

    let mut cursor = seeded.iter();
    for member in &result {
        assert!(
            cursor.any(|candidate| candidate == member),
            "result must follow input order"
        );
    }
}

#[rstest]
#[case("sarah")]
#[case("SARAH")]
#[case("Sarah J")]
fn search_is_case_insensitive(seeded: Vec<AlumniRecord>, #[case] term: &str) {
    let result = apply_filters(&seeded, &DirectoryFilter::new(term, "", ""));
    let names: Vec<_> = result.iter().map(|r| r.name.as_ref()).collect();
    assert_eq!(names, vec!["Dr. Sarah Johnson"]);
}

#[rstest]
fn whitespace_search_is_a_real_constraint(seeded: Vec<AlumniRecord>) {
    let filter = DirectoryFilter::new("  ", "", "");
    assert!(!filter.is_unconstrained());
    assert!(apply_filters(&seeded, &filter).is_empty());
}

#[rstest]
fn constraints_combine_conjunctively() {
    let records = vec![
        record("1", "Ann", Some("2015"), Some("Doctor")),
        record("2", "Ben", Some("2015"), Some("Engineer")),
    ];
    let result = apply_filters(&records, &DirectoryFilter::new("", "2015", "Doctor"));
    let names: Vec<_> = result.iter().map(|r| r.name.as_ref()).collect();
    assert_eq!(names, vec!["Ann"]);
}

#[rstest]
fn categorical_matches_are_exact(seeded: Vec<AlumniRecord>) {
    let result = apply_filters(&seeded, &DirectoryFilter::new("", "", "software engineer"));
    assert!(result.is_empty());
}

#[rstest]
fn profession_filter_keeps_the_full_record(seeded: Vec<AlumniRecord>) {
    let result = apply_filters(&seeded, &DirectoryFilter::new("", "", "Software Engineer"));
    assert_eq!(result, vec![seeded[5].clone()]);
}

#[rstest]
fn empty_collection_yields_nothing() {
    let filter = DirectoryFilter::new("x", "2015", "Doctor");
    assert!(apply_filters(&[], &filter).is_empty());
    assert!(derive_batch_options(&[]).is_empty());
    assert!(derive_profession_options(&[]).is_empty());
}

#[rstest]
fn options_are_sorted_and_distinct() {
    let records = vec![
        record("1", "Ann", Some("2016"), Some("Doctor")),
        record("2", "Ben", Some("2014"), Some("Engineer")),
        record("3", "Cat", Some("2016"), Some("Doctor")),
    ];
    assert_eq!(derive_batch_options(&records), vec!["2014", "2016"]);
    assert_eq!(derive_profession_options(&records), vec!["Doctor", "Engineer"]);
}

#[rstest]
fn absent_values_are_excluded_from_options() {
    let records = vec![
        record("1", "Ann", None, Some("Doctor")),
        record("2", "Ben", Some("2014"), None),
    ];
    let options = FilterOptions::derive(&records);
    assert_eq!(options.batches, vec!["2014"]);
    assert_eq!(options.professions, vec!["Doctor"]);
}

#[rstest]
fn absent_values_never_match_a_selection() {
    let records = vec![record("1", "Ann", None, None)];
    assert!(apply_filters(&records, &DirectoryFilter::new("", "2014", "")).is_empty());
    assert_eq!(apply_filters(&records, &DirectoryFilter::cleared()).len(), 1);
}

#[rstest]
fn listing_derives_options_from_the_base(seeded: Vec<AlumniRecord>) {
    let listing = DirectoryListing::assemble(&seeded, DirectoryFilter::new("", "2015", ""));
    assert_eq!(listing.total, 6);
    assert_eq!(listing.matched(), 1);
    assert_eq!(listing.options.batches.len(), 6);
    assert_eq!(listing.outcome(), ListingOutcome::Results);
}

#[rstest]
fn listing_reports_no_matches(seeded: Vec<AlumniRecord>) {
    let listing = DirectoryListing::assemble(&seeded, DirectoryFilter::new("nobody", "", ""));
    assert_eq!(listing.outcome(), ListingOutcome::NoMatches);
    assert_eq!(listing.total, 6);
}

#[rstest]
fn view_starts_loading() {
    assert_eq!(DirectoryView::default().presentation(), DirectoryPresentation::Loading);
}

#[rstest]
fn view_applies_latest_and_discards_superseded(seeded: Vec<AlumniRecord>) {
    let mut view = DirectoryView::default();
    let stale = view.begin_load();
    let fresh = view.begin_load();

    let fresh_records = seeded[..2].to_vec();
    assert_eq!(view.complete_load(fresh, Ok(fresh_records.clone())), ApplyOutcome::Applied);
    assert_eq!(
        view.complete_load(stale, Ok(seeded.clone())),
        ApplyOutcome::Discarded(DiscardReason::Superseded)
    );
    assert_eq!(view.records(), Some(fresh_records.as_slice()));
}

#[rstest]
fn stale_success_cannot_overwrite_fresh_failure(seeded: Vec<AlumniRecord>) {
    let mut view = DirectoryView::default();
    let stale = view.begin_load();
    let fresh = view.begin_load();

    view.complete_load(fresh, Err(Error::service_unavailable("store unreachable")));
    view.complete_load(stale, Ok(seeded));

    assert_eq!(
        view.presentation(),
        DirectoryPresentation::Unavailable {
            message: "store unreachable".into()
        }
    );
}

#[rstest]
fn retry_after_failure_shows_loading(seeded: Vec<AlumniRecord>) {
    let mut view = DirectoryView::default();
    let failed = view.begin_load();
    view.complete_load(failed, Err(Error::internal("boom")));
    assert_eq!(
        view.presentation(),
        DirectoryPresentation::Failed {
            message: "boom".into()
        }
    );

    let retry = view.begin_load();
    assert_eq!(view.presentation(), DirectoryPresentation::Loading);

    assert_eq!(view.complete_load(retry, Ok(seeded)), ApplyOutcome::Applied);
    assert!(matches!(view.presentation(), DirectoryPresentation::Results(_)));
}

#[rstest]
fn reload_keeps_the_loaded_snapshot_visible(seeded: Vec<AlumniRecord>) {
    let mut view = DirectoryView::default();
    let first = view.begin_load();
    view.complete_load(first, Ok(seeded.clone()));

    let _reload = view.begin_load();
    assert_eq!(view.records(), Some(seeded.as_slice()));
    assert!(matches!(view.presentation(), DirectoryPresentation::Results(_)));
}

#[rstest]
fn torn_down_view_discards_results(seeded: Vec<AlumniRecord>) {
    let mut view = DirectoryView::default();
    let ticket = view.begin_load();
    view.tear_down();

    assert_eq!(
        view.complete_load(ticket, Ok(seeded)),
        ApplyOutcome::Discarded(DiscardReason::TornDown)
    );
    assert_eq!(view.presentation(), DirectoryPresentation::Loading);
}

#[rstest]
fn filter_changes_recompute_from_base(seeded: Vec<AlumniRecord>) {
    let mut view = DirectoryView::default();
    let ticket = view.begin_load();
    view.complete_load(ticket, Ok(seeded));

    view.set_filter(DirectoryFilter::new("", "", "Lawyer"));
    let DirectoryPresentation::Results(narrow) = view.presentation() else {
        panic!("expected results");
    };
    assert_eq!(narrow.matched(), 1);

    view.set_filter(DirectoryFilter::new("nobody", "", ""));
    assert!(matches!(view.presentation(), DirectoryPresentation::NoMatches(_)));

    view.clear_filters();
    let DirectoryPresentation::Results(all) = view.presentation() else {
        panic!("expected results");
    };
    assert_eq!(all.matched(), 6);
}

#[rstest]
#[case(Error::service_unavailable("down"), true)]
#[case(Error::internal("boom"), false)]
fn failures_map_to_distinct_states(#[case] error: Error, #[case] unavailable: bool) {
    let mut view = DirectoryView::default();
    let ticket = view.begin_load();
    view.complete_load(ticket, Err(error));

    let presentation = view.presentation();
    if unavailable {
        assert!(matches!(presentation, DirectoryPresentation::Unavailable { .. }));
    } else {
        assert!(matches!(presentation, DirectoryPresentation::Failed { .. }));
    }
}

fn repository_returning(records: Vec<AlumniRecord>, calls: usize) -> Arc<MockAlumniRepository> {
    let mut repository = MockAlumniRepository::new();
    repository
        .expect_list_all()
        .times(calls)
        .returning(move || Ok(records.clone()));
    Arc::new(repository)
}

#[rstest]
#[tokio::test]
async fn controller_applies_a_single_refresh(seeded: Vec<AlumniRecord>) {
    let mut controller =
        DirectoryController::new(repository_returning(seeded, 1), DirectoryFilter::cleared());

    controller.refresh();
    assert_eq!(controller.process_next().await, Some(ApplyOutcome::Applied));
    assert_eq!(controller.process_next().await, None);

    let DirectoryPresentation::Results(listing) = controller.presentation() else {
        panic!("expected results");
    };
    assert_eq!(listing.total, 6);
}

#[rstest]
#[tokio::test]
async fn controller_keeps_only_the_latest_refresh(seeded: Vec<AlumniRecord>) {
    let mut controller =
        DirectoryController::new(repository_returning(seeded, 2), DirectoryFilter::cleared());

    let first = controller.refresh();
    let second = controller.refresh();
    assert!(second > first);
    assert_eq!(controller.in_flight(), 2);

    let outcomes = controller.settle().await;
    assert_eq!(outcomes.len(), 2);
    assert_eq!(
        outcomes.iter().filter(|o| **o == ApplyOutcome::Applied).count(),
        1
    );
    assert!(outcomes.contains(&ApplyOutcome::Discarded(DiscardReason::Superseded)));
}

#[rstest]
#[tokio::test]
async fn controller_discards_after_tear_down(seeded: Vec<AlumniRecord>) {
    let mut controller =
        DirectoryController::new(repository_returning(seeded, 1), DirectoryFilter::cleared());

    controller.refresh();
    controller.tear_down();

    assert_eq!(
        controller.settle().await,
        vec![ApplyOutcome::Discarded(DiscardReason::TornDown)]
    );
    assert_eq!(controller.presentation(), DirectoryPresentation::Loading);
}

#[rstest]
#[case(AlumniRepositoryError::connection("refused"), true)]
#[case(AlumniRepositoryError::query("permission denied"), false)]
#[tokio::test]
async fn controller_surfaces_store_faults(
    #[case] failure: AlumniRepositoryError,
    #[case] unavailable: bool,
) {
    let mut repository = MockAlumniRepository::new();
    repository
        .expect_list_all()
        .times(1)
        .returning(move || Err(failure.clone()));
    let mut controller = DirectoryController::new(Arc::new(repository), DirectoryFilter::cleared());

    controller.refresh();
    controller.settle().await;

    let presentation = controller.presentation();
    if unavailable {
        assert!(matches!(presentation, DirectoryPresentation::Unavailable { .. }));
    } else {
        assert!(matches!(presentation, DirectoryPresentation::Failed { .. }));
    }
}

#[rstest]
#[tokio::test]
async fn controller_settles_when_a_fetch_task_panics() {
    let mut repository = MockAlumniRepository::new();
    repository
        .expect_list_all()
        .times(1)
        .returning(|| panic!("adapter exploded"));
    let mut controller = DirectoryController::new(Arc::new(repository), DirectoryFilter::cleared());

    controller.refresh();
    let outcomes = tokio::time::timeout(Duration::from_secs(2), controller.settle())
        .await
        .expect("settle finishes after a task panic");

    assert_eq!(outcomes, vec![ApplyOutcome::Applied]);
    assert_eq!(controller.in_flight(), 0);
    assert_eq!(
        controller.presentation(),
        DirectoryPresentation::Failed {
            message: "directory fetch task failed".into()
        }
    );
}
