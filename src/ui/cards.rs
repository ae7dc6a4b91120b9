use std::collections::HashMap;

use crate::domain::player::Player;

pub const MAX_STARS: u8 = 5;

/// Display-ready projection of one player. Built fresh on every render; the
/// card markup interpolates these fields and nothing else.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerCard {
    pub id: String,
    pub full_name: String,
    pub phone: String,
    pub tel_href: String,
    pub level_label: &'static str,
    pub level_color: &'static str,
    /// Filled stars out of `MAX_STARS`.
    pub stars: u8,
    pub chips: Vec<AvailabilityChip>,
    pub preferred: Vec<String>,
    pub unwanted: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityChip {
    pub day: &'static str,
    pub hours: String,
}

/// Projects the effective list into cards, preserving its order. Preference
/// ids are resolved to names through `names`; dangling ids render nothing.
pub fn project(players: &[Player], names: &HashMap<String, String>) -> Vec<PlayerCard> {
    players.iter().map(|p| card(p, names)).collect()
}

fn card(player: &Player, names: &HashMap<String, String>) -> PlayerCard {
    let resolve = |ids: &[String]| -> Vec<String> {
        ids.iter().filter_map(|id| names.get(id).cloned()).collect()
    };

    PlayerCard {
        id: player.id.clone(),
        full_name: player.full_name(),
        phone: player.phone.clone(),
        tel_href: format!("tel:{}", player.phone),
        level_label: player.level.label(),
        level_color: player.level.badge_color(),
        stars: player.empathy.min(MAX_STARS),
        chips: player
            .availability
            .iter()
            .map(|slot| AvailabilityChip {
                day: slot.day.short(),
                hours: slot.hours(),
            })
            .collect(),
        preferred: resolve(&player.preferred_player_ids),
        unwanted: resolve(&player.unwanted_player_ids),
    }
}
