use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// A roster entry. `id` is assigned by the persistence backend: the realtime
/// store key in realtime mode, a local UUID otherwise. An empty `id` marks a
/// record that has not been persisted yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    #[serde(default)]
    pub id: String,
    pub surname: String,
    pub first_name: String,
    pub phone: String,
    pub level: SkillLevel,
    #[serde(default)]
    pub empathy: u8,
    #[serde(default)]
    pub availability: Vec<AvailabilitySlot>,
    #[serde(default)]
    pub preferred_player_ids: Vec<String>,
    #[serde(default)]
    pub unwanted_player_ids: Vec<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Player {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.surname, self.first_name)
    }
}

/// One weekly availability window. Times are serialized as "HH:MM" strings on
/// the wire; slots need not be chronologically ordered and may overlap.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySlot {
    pub day: Weekday,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
}

impl AvailabilitySlot {
    /// True when `[start, end]` of this slot fully contains the given window.
    /// An unset bound is treated as open.
    pub fn contains_window(&self, start: Option<NaiveTime>, end: Option<NaiveTime>) -> bool {
        start.map_or(true, |s| self.start_time <= s) && end.map_or(true, |e| self.end_time >= e)
    }

    pub fn hours(&self) -> String {
        format!(
            "{}-{}",
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M")
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    pub fn short(&self) -> &'static str {
        match self {
            Weekday::Monday => "Mon",
            Weekday::Tuesday => "Tue",
            Weekday::Wednesday => "Wed",
            Weekday::Thursday => "Thu",
            Weekday::Friday => "Fri",
            Weekday::Saturday => "Sat",
            Weekday::Sunday => "Sun",
        }
    }

    pub fn from_value(value: &str) -> Option<Weekday> {
        Weekday::ALL.iter().copied().find(|d| d.value() == value)
    }

    pub fn value(&self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    Competitive,
}

impl SkillLevel {
    pub const ALL: [SkillLevel; 4] = [
        SkillLevel::Beginner,
        SkillLevel::Intermediate,
        SkillLevel::Advanced,
        SkillLevel::Competitive,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
            SkillLevel::Competitive => "Competitive",
        }
    }

    /// Badge background used on the player cards.
    pub fn badge_color(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "#22c55e",
            SkillLevel::Intermediate => "#3b82f6",
            SkillLevel::Advanced => "#f59e0b",
            SkillLevel::Competitive => "#dc2626",
        }
    }

    pub fn from_value(value: &str) -> Option<SkillLevel> {
        SkillLevel::ALL.iter().copied().find(|l| l.value() == value)
    }

    pub fn value(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
            SkillLevel::Competitive => "competitive",
        }
    }
}

/// Uniform order guarantee for both persistence modes: surname
/// (case-insensitive), then first name.
pub fn sort_roster(players: &mut [Player]) {
    players.sort_by(|a, b| {
        (a.surname.to_lowercase(), a.first_name.to_lowercase())
            .cmp(&(b.surname.to_lowercase(), b.first_name.to_lowercase()))
    });
}

/// "HH:MM" wire format for slot times.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn player(surname: &str, first_name: &str) -> Player {
        let now = Utc::now();
        Player {
            id: String::new(),
            surname: surname.to_string(),
            first_name: first_name.to_string(),
            phone: "333 1234567".to_string(),
            level: SkillLevel::Intermediate,
            empathy: 3,
            availability: Vec::new(),
            preferred_player_ids: Vec::new(),
            unwanted_player_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_slot_serializes_times_as_hhmm() {
        let slot = AvailabilitySlot {
            day: Weekday::Tuesday,
            start_time: t(18, 0),
            end_time: t(20, 30),
        };

        let json = serde_json::to_value(&slot).unwrap();
        assert_eq!(json["day"], "tuesday");
        assert_eq!(json["startTime"], "18:00");
        assert_eq!(json["endTime"], "20:30");

        let back: AvailabilitySlot = serde_json::from_value(json).unwrap();
        assert_eq!(back, slot);
    }

    #[test]
    fn test_player_wire_field_names() {
        let mut p = player("Rossi", "Mario");
        p.preferred_player_ids.push("abc".to_string());

        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["firstName"], "Mario");
        assert_eq!(json["level"], "intermediate");
        assert_eq!(json["preferredPlayerIds"][0], "abc");
        assert!(json["createdAt"].is_string());
    }

    #[test]
    fn test_player_deserializes_without_optional_fields() {
        // A realtime child value carries neither id nor the list fields.
        let p: Player = serde_json::from_value(serde_json::json!({
            "surname": "Bianchi",
            "firstName": "Luca",
            "phone": "333 0000000",
            "level": "beginner",
        }))
        .unwrap();

        assert!(p.id.is_empty());
        assert_eq!(p.empathy, 0);
        assert!(p.availability.is_empty());
        assert!(p.preferred_player_ids.is_empty());
    }

    #[test]
    fn test_contains_window() {
        let slot = AvailabilitySlot {
            day: Weekday::Tuesday,
            start_time: t(18, 0),
            end_time: t(20, 0),
        };

        assert!(slot.contains_window(Some(t(18, 30)), Some(t(19, 30))));
        assert!(slot.contains_window(Some(t(18, 0)), Some(t(20, 0))));
        // Window ends after the slot does.
        assert!(!slot.contains_window(Some(t(19, 0)), Some(t(21, 0))));
        // Open bounds.
        assert!(slot.contains_window(None, Some(t(19, 0))));
        assert!(slot.contains_window(Some(t(19, 0)), None));
        assert!(slot.contains_window(None, None));
    }

    #[test]
    fn test_sort_roster_is_case_insensitive_and_stable_on_surname_ties() {
        let mut roster = vec![
            player("rossi", "Zeno"),
            player("Bianchi", "Luca"),
            player("Rossi", "Anna"),
        ];
        sort_roster(&mut roster);

        let names: Vec<String> = roster.iter().map(Player::full_name).collect();
        assert_eq!(names, vec!["Bianchi Luca", "Rossi Anna", "rossi Zeno"]);
    }
}
