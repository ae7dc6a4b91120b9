use chrono::{DateTime, NaiveTime, Utc};
use thiserror::Error;

use crate::domain::player::{AvailabilitySlot, Player, SkillLevel, Weekday};

/// Transient state of the create/edit modal. The modal markup is a pure
/// renderer of this struct; nothing here touches a backend. Scratch state is
/// discarded wholesale on cancel/close and only turns into a `Player` through
/// `build_player`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerForm {
    pub mode: FormMode,
    pub surname: String,
    pub first_name: String,
    pub phone: String,
    pub level: Option<SkillLevel>,
    pub empathy: u8,
    pub slots: Vec<SlotDraft>,
    pub preferred_ids: Vec<String>,
    pub unwanted_ids: Vec<String>,
    /// Latched while a save is in flight so a double-click cannot race two
    /// writes for the same record.
    pub submitting: bool,
    created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum FormMode {
    #[default]
    Closed,
    Creating,
    Editing(String),
}

/// One availability row as typed. Fields stay raw strings until submit; rows
/// with any empty or unparseable field are silently dropped from the payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotDraft {
    pub day: Option<Weekday>,
    pub start: String,
    pub end: String,
}

impl SlotDraft {
    fn build(&self) -> Option<AvailabilitySlot> {
        Some(AvailabilitySlot {
            day: self.day?,
            start_time: NaiveTime::parse_from_str(&self.start, "%H:%M").ok()?,
            end_time: NaiveTime::parse_from_str(&self.end, "%H:%M").ok()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Surname is required")]
    MissingSurname,
    #[error("First name is required")]
    MissingFirstName,
    #[error("Phone number is required")]
    MissingPhone,
    #[error("Choose a skill level")]
    MissingLevel,
    #[error("Select an empathy rating (1-5 stars)")]
    EmpathyOutOfRange,
}

impl PlayerForm {
    pub fn is_open(&self) -> bool {
        self.mode != FormMode::Closed
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Editing(_))
    }

    /// Opens the modal with every transient field at its default.
    pub fn open_new(&mut self) {
        *self = PlayerForm {
            mode: FormMode::Creating,
            ..PlayerForm::default()
        };
    }

    /// Opens the modal hydrated from a stored record: one slot row per stored
    /// slot, scratch preference lists copied from the record.
    pub fn open_edit(&mut self, player: &Player) {
        *self = PlayerForm {
            mode: FormMode::Editing(player.id.clone()),
            surname: player.surname.clone(),
            first_name: player.first_name.clone(),
            phone: player.phone.clone(),
            level: Some(player.level),
            empathy: player.empathy,
            slots: player
                .availability
                .iter()
                .map(|slot| SlotDraft {
                    day: Some(slot.day),
                    start: slot.start_time.format("%H:%M").to_string(),
                    end: slot.end_time.format("%H:%M").to_string(),
                })
                .collect(),
            preferred_ids: player.preferred_player_ids.clone(),
            unwanted_ids: player.unwanted_player_ids.clone(),
            submitting: false,
            created_at: Some(player.created_at),
        };
    }

    /// Discards all scratch state. Safe from any state, with no persistence
    /// side effects.
    pub fn close(&mut self) {
        *self = PlayerForm::default();
    }

    pub fn add_slot(&mut self) {
        self.slots.push(SlotDraft::default());
    }

    pub fn remove_slot(&mut self, index: usize) {
        if index < self.slots.len() {
            self.slots.remove(index);
        }
    }

    pub fn add_preferred(&mut self, id: String) {
        if !id.is_empty() && !self.preferred_ids.contains(&id) {
            self.preferred_ids.push(id);
        }
    }

    pub fn add_unwanted(&mut self, id: String) {
        if !id.is_empty() && !self.unwanted_ids.contains(&id) {
            self.unwanted_ids.push(id);
        }
    }

    pub fn remove_preferred(&mut self, id: &str) {
        self.preferred_ids.retain(|p| p != id);
    }

    pub fn remove_unwanted(&mut self, id: &str) {
        self.unwanted_ids.retain(|p| p != id);
    }

    /// Candidates for both preference dropdowns: the roster minus the player
    /// being edited, minus ids already on either list. This add-time
    /// exclusion is the only mutual-exclusivity enforcement; records edited
    /// out-of-band may still violate it and the rest of the system tolerates
    /// that.
    pub fn partner_candidates<'a>(&self, roster: &'a [Player]) -> Vec<&'a Player> {
        let editing_id = match &self.mode {
            FormMode::Editing(id) => Some(id.as_str()),
            _ => None,
        };
        roster
            .iter()
            .filter(|p| Some(p.id.as_str()) != editing_id)
            .filter(|p| !self.preferred_ids.contains(&p.id) && !self.unwanted_ids.contains(&p.id))
            .collect()
    }

    /// Latches the submit guard. Returns false when a save is already in
    /// flight and the caller must drop this submission.
    pub fn begin_submit(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        self.submitting = true;
        true
    }

    /// On success the modal closes and all scratch state is dropped; on
    /// failure it stays open with the entered data intact so the user can
    /// retry the same submission.
    pub fn finish_submit(&mut self, saved: bool) {
        if saved {
            self.close();
        } else {
            self.submitting = false;
        }
    }

    /// Validates the scratch state and produces the record to hand to the
    /// persistence backend. The form itself is left untouched.
    pub fn build_player(&self) -> Result<Player, ValidationError> {
        let surname = self.surname.trim();
        if surname.is_empty() {
            return Err(ValidationError::MissingSurname);
        }
        let first_name = self.first_name.trim();
        if first_name.is_empty() {
            return Err(ValidationError::MissingFirstName);
        }
        let phone = self.phone.trim();
        if phone.is_empty() {
            return Err(ValidationError::MissingPhone);
        }
        let level = self.level.ok_or(ValidationError::MissingLevel)?;
        if !(1..=5).contains(&self.empathy) {
            return Err(ValidationError::EmpathyOutOfRange);
        }

        let id = match &self.mode {
            FormMode::Editing(id) => id.clone(),
            _ => String::new(),
        };
        let now = Utc::now();

        Ok(Player {
            id,
            surname: surname.to_string(),
            first_name: first_name.to_string(),
            phone: phone.to_string(),
            level,
            empathy: self.empathy,
            availability: self.slots.iter().filter_map(SlotDraft::build).collect(),
            preferred_player_ids: self.preferred_ids.clone(),
            unwanted_player_ids: self.unwanted_ids.clone(),
            created_at: self.created_at.unwrap_or(now),
            updated_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn sample_player() -> Player {
        let now = Utc::now();
        Player {
            id: "p1".to_string(),
            surname: "Rossi".to_string(),
            first_name: "Mario".to_string(),
            phone: "333 1234567".to_string(),
            level: SkillLevel::Advanced,
            empathy: 4,
            availability: vec![AvailabilitySlot {
                day: Weekday::Tuesday,
                start_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
            }],
            preferred_player_ids: vec!["p2".to_string()],
            unwanted_player_ids: vec!["p3".to_string()],
            created_at: now,
            updated_at: now,
        }
    }

    fn filled_form() -> PlayerForm {
        let mut form = PlayerForm::default();
        form.open_new();
        form.surname = "Rossi".to_string();
        form.first_name = "Mario".to_string();
        form.phone = "333 1234567".to_string();
        form.level = Some(SkillLevel::Advanced);
        form.empathy = 4;
        form
    }

    #[test]
    fn test_open_new_resets_everything() {
        let mut form = PlayerForm::default();
        form.open_edit(&sample_player());
        form.open_new();

        assert_eq!(form.mode, FormMode::Creating);
        assert!(form.surname.is_empty());
        assert!(form.slots.is_empty());
        assert!(form.preferred_ids.is_empty());
        assert_eq!(form.empathy, 0);
    }

    #[test]
    fn test_open_edit_hydrates_every_field() {
        let player = sample_player();
        let mut form = PlayerForm::default();
        form.open_edit(&player);

        assert_eq!(form.mode, FormMode::Editing("p1".to_string()));
        assert_eq!(form.surname, "Rossi");
        assert_eq!(form.level, Some(SkillLevel::Advanced));
        assert_eq!(form.empathy, 4);
        assert_eq!(form.slots.len(), 1);
        assert_eq!(form.slots[0].start, "18:00");
        assert_eq!(form.slots[0].end, "20:00");
        assert_eq!(form.preferred_ids, vec!["p2"]);
        assert_eq!(form.unwanted_ids, vec!["p3"]);
    }

    #[test]
    fn test_close_discards_scratch_state() {
        let mut form = filled_form();
        form.add_slot();
        form.close();

        assert_eq!(form, PlayerForm::default());
        assert!(!form.is_open());
    }

    #[test]
    fn test_build_player_requires_trimmed_fields() {
        let mut form = filled_form();
        form.surname = "   ".to_string();
        assert_eq!(form.build_player(), Err(ValidationError::MissingSurname));

        let mut form = filled_form();
        form.first_name = String::new();
        assert_eq!(form.build_player(), Err(ValidationError::MissingFirstName));

        let mut form = filled_form();
        form.phone = " ".to_string();
        assert_eq!(form.build_player(), Err(ValidationError::MissingPhone));

        let mut form = filled_form();
        form.level = None;
        assert_eq!(form.build_player(), Err(ValidationError::MissingLevel));
    }

    #[test]
    fn test_build_player_rejects_empathy_outside_range() {
        let mut form = filled_form();
        form.empathy = 0;
        assert_eq!(form.build_player(), Err(ValidationError::EmpathyOutOfRange));

        form.empathy = 6;
        assert_eq!(form.build_player(), Err(ValidationError::EmpathyOutOfRange));

        // The form itself is untouched by a failed validation.
        assert!(form.is_open());
        assert_eq!(form.surname, "Rossi");
    }

    #[test]
    fn test_incomplete_slot_rows_are_dropped_silently() {
        let mut form = filled_form();
        form.slots = vec![
            SlotDraft {
                day: Some(Weekday::Monday),
                start: "10:00".to_string(),
                end: "12:00".to_string(),
            },
            SlotDraft {
                day: None,
                start: "10:00".to_string(),
                end: "12:00".to_string(),
            },
            SlotDraft {
                day: Some(Weekday::Friday),
                start: String::new(),
                end: "12:00".to_string(),
            },
        ];

        let player = form.build_player().unwrap();
        assert_eq!(player.availability.len(), 1);
        assert_eq!(player.availability[0].day, Weekday::Monday);
    }

    #[test]
    fn test_creating_builds_with_empty_id_and_editing_keeps_id() {
        let form = filled_form();
        let created = form.build_player().unwrap();
        assert!(created.id.is_empty());

        let original = sample_player();
        let mut form = PlayerForm::default();
        form.open_edit(&original);
        let edited = form.build_player().unwrap();
        assert_eq!(edited.id, "p1");
        assert_eq!(edited.created_at, original.created_at);
        assert!(edited.updated_at >= original.updated_at);
    }

    #[test]
    fn test_unchanged_edit_roundtrips_except_updated_at() {
        let original = sample_player();
        let mut form = PlayerForm::default();
        form.open_edit(&original);

        let rebuilt = form.build_player().unwrap();
        let mut expected = original.clone();
        expected.updated_at = rebuilt.updated_at;
        assert_eq!(rebuilt, expected);
    }

    #[test]
    fn test_partner_candidates_exclude_self_and_both_lists() {
        let mut roster = vec![sample_player()];
        for id in ["p2", "p3", "p4"] {
            let mut p = sample_player();
            p.id = id.to_string();
            roster.push(p);
        }

        let mut form = PlayerForm::default();
        form.open_edit(&roster[0]); // edits p1; p2 preferred, p3 unwanted

        let candidates: Vec<&str> = form
            .partner_candidates(&roster)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(candidates, vec!["p4"]);
    }

    #[test]
    fn test_submit_latch_blocks_double_submit() {
        let mut form = filled_form();
        assert!(form.begin_submit());
        assert!(!form.begin_submit());

        // A failed save unlatches and keeps the modal open.
        form.finish_submit(false);
        assert!(form.is_open());
        assert_eq!(form.surname, "Rossi");
        assert!(form.begin_submit());

        // A successful save closes the modal.
        form.finish_submit(true);
        assert!(!form.is_open());
    }

    #[test]
    fn test_preference_lists_dedupe_and_ignore_empty_ids() {
        let mut form = filled_form();
        form.add_preferred("p2".to_string());
        form.add_preferred("p2".to_string());
        form.add_preferred(String::new());
        assert_eq!(form.preferred_ids, vec!["p2"]);

        form.add_unwanted("p3".to_string());
        form.remove_unwanted("p3");
        assert!(form.unwanted_ids.is_empty());

        form.remove_preferred("p2");
        assert!(form.preferred_ids.is_empty());
    }
}
