use chrono::NaiveTime;
use std::collections::{HashMap, HashSet};

use crate::domain::player::{Player, SkillLevel, Weekday};

/// The sidebar criteria. All active predicates are ANDed; default criteria
/// match every record. Filtering is a full rescan over the roster on every
/// change, there is no index to maintain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Case-insensitive substring match over "surname firstName".
    pub search: String,
    pub levels: HashSet<SkillLevel>,
    pub days: HashSet<Weekday>,
    /// Minimum empathy rating, 0 = off.
    pub min_empathy: u8,
    /// Case-insensitive substring match over resolved preferred/unwanted
    /// partner names.
    pub partner_search: String,
    pub time_start: Option<NaiveTime>,
    pub time_end: Option<NaiveTime>,
}

impl FilterCriteria {
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty()
            || !self.levels.is_empty()
            || !self.days.is_empty()
            || self.min_empathy > 0
            || !self.partner_search.trim().is_empty()
            || self.time_start.is_some()
            || self.time_end.is_some()
    }

    pub fn reset(&mut self) {
        *self = FilterCriteria::default();
    }

    pub fn toggle_level(&mut self, level: SkillLevel) {
        if !self.levels.remove(&level) {
            self.levels.insert(level);
        }
    }

    pub fn toggle_day(&mut self, day: Weekday) {
        if !self.days.remove(&day) {
            self.days.insert(day);
        }
    }

    /// Clicking the star that is already the floor switches the filter off.
    pub fn toggle_min_empathy(&mut self, value: u8) {
        self.min_empathy = if self.min_empathy == value { 0 } else { value };
    }

    /// Applies all active predicates, preserving roster order. `names` is the
    /// id-to-name lookup used to resolve preference lists.
    pub fn apply(&self, players: &[Player], names: &HashMap<String, String>) -> Vec<Player> {
        players
            .iter()
            .filter(|p| self.matches(p, names))
            .cloned()
            .collect()
    }

    pub fn matches(&self, player: &Player, names: &HashMap<String, String>) -> bool {
        self.matches_search(player)
            && self.matches_level(player)
            && self.matches_empathy(player)
            && self.matches_days(player)
            && self.matches_partners(player, names)
            && self.matches_time_window(player)
    }

    fn matches_search(&self, player: &Player) -> bool {
        let needle = self.search.trim().to_lowercase();
        needle.is_empty() || player.full_name().to_lowercase().contains(&needle)
    }

    fn matches_level(&self, player: &Player) -> bool {
        self.levels.is_empty() || self.levels.contains(&player.level)
    }

    fn matches_empathy(&self, player: &Player) -> bool {
        self.min_empathy == 0 || player.empathy >= self.min_empathy
    }

    /// An active weekday filter requires at least one slot on a selected day;
    /// players without any slots do not pass it.
    fn matches_days(&self, player: &Player) -> bool {
        self.days.is_empty()
            || player
                .availability
                .iter()
                .any(|slot| self.days.contains(&slot.day))
    }

    fn matches_partners(&self, player: &Player, names: &HashMap<String, String>) -> bool {
        let needle = self.partner_search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        player
            .preferred_player_ids
            .iter()
            .chain(player.unwanted_player_ids.iter())
            .filter_map(|id| names.get(id))
            .any(|name| name.to_lowercase().contains(&needle))
    }

    /// A record passes when any slot fully contains the requested window.
    /// Records with no availability at all are treated as unconstrained and
    /// pass; that is deliberate, not an oversight.
    fn matches_time_window(&self, player: &Player) -> bool {
        if self.time_start.is_none() && self.time_end.is_none() {
            return true;
        }
        if player.availability.is_empty() {
            return true;
        }
        player
            .availability
            .iter()
            .any(|slot| slot.contains_window(self.time_start, self.time_end))
    }
}

/// Id-to-full-name lookup for the whole roster.
pub fn name_index(players: &[Player]) -> HashMap<String, String> {
    players
        .iter()
        .map(|p| (p.id.clone(), p.full_name()))
        .collect()
}
