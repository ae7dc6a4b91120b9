//! End-to-end flows over the local backend: the form produces records, the
//! service persists them, and the filter/projection layers read them back.

use std::sync::Arc;

use chrono::NaiveTime;
use courtside::domain::filter::{name_index, FilterCriteria};
use courtside::domain::form::{PlayerForm, SlotDraft, ValidationError};
use courtside::domain::player::{SkillLevel, Weekday};
use courtside::services::RosterService;
use courtside::storage::local::LocalStore;
use courtside::ui::cards::project;

async fn service() -> RosterService {
    let store = LocalStore::open_in_memory().await.unwrap();
    RosterService::new(Arc::new(store))
}

fn form(surname: &str, first_name: &str, level: SkillLevel) -> PlayerForm {
    let mut form = PlayerForm::default();
    form.open_new();
    form.surname = surname.to_string();
    form.first_name = first_name.to_string();
    form.phone = "333 1234567".to_string();
    form.level = Some(level);
    form.empathy = 3;
    form
}

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

#[tokio::test]
async fn submitted_record_round_trips_with_assigned_id() {
    let service = service().await;

    let mut form = form("Rossi", "Mario", SkillLevel::Advanced);
    form.slots.push(SlotDraft {
        day: Some(Weekday::Tuesday),
        start: "18:00".to_string(),
        end: "20:00".to_string(),
    });

    let submitted = form.build_player().unwrap();
    let saved = service.save(submitted.clone()).await.unwrap();
    assert!(!saved.id.is_empty());

    let stored = service.load_all().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, saved.id);
    assert_eq!(stored[0].surname, submitted.surname);
    assert_eq!(stored[0].availability, submitted.availability);
}

#[tokio::test]
async fn unchanged_resubmit_only_touches_updated_at() {
    let service = service().await;
    let saved = service
        .save(form("Rossi", "Mario", SkillLevel::Advanced).build_player().unwrap())
        .await
        .unwrap();

    // Re-open the stored record and submit it untouched.
    let mut edit = PlayerForm::default();
    edit.open_edit(&saved);
    let resubmitted = service.save(edit.build_player().unwrap()).await.unwrap();

    let mut expected = saved.clone();
    expected.updated_at = resubmitted.updated_at;
    assert_eq!(resubmitted, expected);
}

#[tokio::test]
async fn deleted_id_is_unreachable_and_redelete_is_noop() {
    let service = service().await;
    let saved = service
        .save(form("Rossi", "Mario", SkillLevel::Advanced).build_player().unwrap())
        .await
        .unwrap();

    service.delete(&saved.id).await.unwrap();

    let stored = service.load_all().await.unwrap();
    let cards = project(&stored, &name_index(&stored));
    assert!(cards.iter().all(|c| c.id != saved.id));

    // Deleting an absent id must not error.
    service.delete(&saved.id).await.unwrap();
}

#[tokio::test]
async fn level_weekday_and_time_window_scenario() {
    let service = service().await;

    let mut rossi = form("Rossi", "Mario", SkillLevel::Advanced);
    rossi.slots.push(SlotDraft {
        day: Some(Weekday::Tuesday),
        start: "18:00".to_string(),
        end: "20:00".to_string(),
    });
    service.save(rossi.build_player().unwrap()).await.unwrap();
    service
        .save(form("Bianchi", "Luca", SkillLevel::Beginner).build_player().unwrap())
        .await
        .unwrap();

    let stored = service.load_all().await.unwrap();
    let names = name_index(&stored);
    let surnames = |criteria: &FilterCriteria| -> Vec<String> {
        criteria
            .apply(&stored, &names)
            .into_iter()
            .map(|p| p.surname)
            .collect()
    };

    let mut by_level = FilterCriteria::default();
    by_level.toggle_level(SkillLevel::Advanced);
    assert_eq!(surnames(&by_level), vec!["Rossi"]);

    // Weekday filters need at least one matching slot; Bianchi has none.
    let mut by_day = FilterCriteria::default();
    by_day.toggle_day(Weekday::Tuesday);
    assert_eq!(surnames(&by_day), vec!["Rossi"]);

    // Rossi's slot ends before the window does, so it does not contain it;
    // Bianchi passes through with no slots at all.
    let by_window = FilterCriteria {
        time_start: Some(t(19, 0)),
        time_end: Some(t(21, 0)),
        ..Default::default()
    };
    assert_eq!(surnames(&by_window), vec!["Bianchi"]);
}

#[tokio::test]
async fn rejected_empathy_leaves_store_and_form_untouched() {
    let service = service().await;

    let mut attempt = form("Rossi", "Mario", SkillLevel::Advanced);
    attempt.empathy = 0;
    assert_eq!(attempt.build_player(), Err(ValidationError::EmpathyOutOfRange));

    // No persistence call happened; the modal is still open with its data.
    assert!(service.load_all().await.unwrap().is_empty());
    assert!(attempt.is_open());
    assert_eq!(attempt.surname, "Rossi");
}
