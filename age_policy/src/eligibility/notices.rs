//! Confirmation text shown to tournament directors.

use crate::model::{Player, PlayerAgeGroup};

/// Confirmation shown before a temporary age override is applied.
pub fn override_warning_message(player_name: &str, original: PlayerAgeGroup, proposed: PlayerAgeGroup) -> String {
    format!(
        "Warning: You are about to temporarily change {player_name}'s age setting from {original} to {proposed} \
         for this tournament only. Age verification remains the responsibility of the venue and the participants, \
         who must follow local laws and venue rules. Confirm to apply the temporary age setting for this player \
         for this tournament, or cancel to leave it unchanged."
    )
}

/// Confirmation shown before players are dropped for age reasons.
///
/// Returns `None` when nobody would be removed.
pub fn player_removal_warning(players: &[Player]) -> Option<String> {
    if players.is_empty() {
        return None;
    }
    let names = players.iter().map(Player::display_name).collect::<Vec<_>>().join(", ");
    Some(format!(
        "The following players will be removed from the tournament due to age restrictions: {names}. \
         To re-add them, update the age restrictions of the venue or tables, or temporarily override \
         each player's age setting. Are you sure you want to remove these players?"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_warning_names_player_and_groups() {
        let msg = override_warning_message("Sam Minor", PlayerAgeGroup::Under18, PlayerAgeGroup::Ages21Plus);
        assert!(msg.starts_with("Warning: You are about to temporarily change Sam Minor's age setting from <18 to 21+"));
    }

    #[test]
    fn test_removal_warning_lists_players_in_order() {
        let players = [
            Player::new("p1", PlayerAgeGroup::Under18).with_name("Sam", "Minor"),
            Player::new("p2", PlayerAgeGroup::Ages18To20),
        ];
        let msg = player_removal_warning(&players).unwrap();
        assert!(msg.contains("due to age restrictions: Sam Minor, p2."));
        assert!(player_removal_warning(&[]).is_none());
    }
}
