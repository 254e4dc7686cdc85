//! Priority-ordered car preference resolution.
//!
//! Each player names up to four acceptable cars in order. The first one that is
//! currently installed wins; otherwise the game's default car is kept. Players
//! are resolved independently, so two players may end up with the same car.

use crate::models::{AvailableSet, CarConfig, ParticipantSlot, PreferenceList, Resolution};
use crate::models::preferences::{is_sentinel, normalize_car_name};

/// Resolve one preference list against the available cars.
///
/// Entries are normalized before comparison; blank and sentinel entries are
/// skipped.
///
/// # Arguments
/// * `preferences` - Ranked choices, best first
/// * `available` - Installed car identifiers
///
/// # Returns
/// The first choice present in `available`, always a member of it, or
/// [`Resolution::NoOverride`] when none match
pub fn resolve(preferences: &PreferenceList, available: &AvailableSet) -> Resolution {
    for entry in preferences.entries() {
        let car = normalize_car_name(entry);
        if is_sentinel(&car) {
            continue;
        }

        if available.contains(&car) {
            return Resolution::Car(car);
        }

        tracing::debug!("Preferred car '{}' is not installed, trying next choice", car);
    }

    Resolution::NoOverride
}

impl CarConfig {
    /// Resolve the configured choices for a player number.
    ///
    /// Unknown player numbers resolve to [`Resolution::NoOverride`]. `used` is
    /// accepted for existing call sites and is ignored: cars are not exclusive
    /// between players.
    pub fn car_for_player(
        &self,
        player_number: u8,
        _used: &AvailableSet,
        available: &AvailableSet,
    ) -> Resolution {
        let Some(slot) = ParticipantSlot::new(player_number) else {
            tracing::warn!("Ignoring car lookup for unknown player {}", player_number);
            return Resolution::NoOverride;
        };

        let resolution = resolve(&self.preference_list(slot), available);
        match &resolution {
            Resolution::Car(car) => tracing::debug!("{}: resolved car override '{}'", slot, car),
            Resolution::NoOverride => {
                tracing::debug!("{}: no car override configured or available", slot)
            }
        }
        resolution
    }

    /// Resolve every player in slot order
    pub fn resolve_all(&self, available: &AvailableSet) -> Vec<(ParticipantSlot, Resolution)> {
        let used = AvailableSet::new();
        ParticipantSlot::ALL
            .iter()
            .map(|&slot| (slot, self.car_for_player(slot.number(), &used, available)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChoiceArity;
    use proptest::prelude::*;

    fn available(names: &[&str]) -> AvailableSet {
        names.iter().collect()
    }

    #[test]
    fn test_first_available_choice_wins() {
        let prefs = PreferenceList::new(["missing", "bluecar", "redcar"]).unwrap();
        let result = resolve(&prefs, &available(&["redcar", "bluecar"]));
        assert_eq!(result, Resolution::Car("bluecar".to_string()));
    }

    #[test]
    fn test_case_insensitive_resolution() {
        let prefs = PreferenceList::new(["RedCar"]).unwrap();
        let result = resolve(&prefs, &available(&["redcar"]));
        assert_eq!(result.car(), Some("redcar"));
    }

    #[test]
    fn test_sentinels_and_blanks_are_skipped() {
        let prefs = PreferenceList::new(["null", "", "  NONE ", "redcar"]).unwrap();
        let result = resolve(&prefs, &available(&["redcar", "null"]));
        assert_eq!(result.car(), Some("redcar"));
    }

    #[test]
    fn test_empty_available_set() {
        let prefs = PreferenceList::new(["redcar"]).unwrap();
        assert_eq!(resolve(&prefs, &AvailableSet::new()), Resolution::NoOverride);
    }

    #[test]
    fn test_unknown_player_has_no_override() {
        let config = CarConfig::default();
        let cars = available(&["redcar"]);
        assert_eq!(
            config.car_for_player(0, &AvailableSet::new(), &cars),
            Resolution::NoOverride
        );
        assert_eq!(
            config.car_for_player(5, &AvailableSet::new(), &cars),
            Resolution::NoOverride
        );
    }

    #[test]
    fn test_players_may_share_a_car() {
        let mut config = CarConfig::default();
        config.player1.first_choice = "redcar".to_string();
        config.player2.first_choice = "redcar".to_string();

        let results = config.resolve_all(&available(&["redcar"]));
        assert_eq!(results[0].1.car(), Some("redcar"));
        assert_eq!(results[1].1.car(), Some("redcar"));
        assert_eq!(results[2].1, Resolution::NoOverride);
    }

    #[test]
    fn test_used_set_is_ignored() {
        let mut config = CarConfig::default();
        config.player1.first_choice = "redcar".to_string();
        let used = available(&["redcar"]);

        let result = config.car_for_player(1, &used, &available(&["redcar"]));
        assert_eq!(result.car(), Some("redcar"));
    }

    #[test]
    fn test_single_mode_ignores_lower_ranks() {
        let mut config = CarConfig::default();
        config.preferences.mode = ChoiceArity::Single;
        config.player1.first_choice = "missing".to_string();
        config.player1.second_choice = "redcar".to_string();

        let result = config.car_for_player(1, &AvailableSet::new(), &available(&["redcar"]));
        assert_eq!(result, Resolution::NoOverride);
    }

    fn car_name() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("null".to_string()),
            Just(String::new()),
            "[a-zA-Z]{1,6}",
        ]
    }

    proptest! {
        #[test]
        fn prop_all_sentinels_never_override(
            len in 1usize..=4,
            cars in proptest::collection::vec("[a-z]{1,6}", 0..6),
        ) {
            let prefs = PreferenceList::unset(len).unwrap();
            let set: AvailableSet = cars.iter().collect();
            prop_assert_eq!(resolve(&prefs, &set), Resolution::NoOverride);
        }

        #[test]
        fn prop_result_is_first_member(
            entries in proptest::collection::vec(car_name(), 1..=4),
            cars in proptest::collection::vec("[a-z]{1,6}", 0..6),
        ) {
            let prefs = PreferenceList::new(&entries).unwrap();
            let set: AvailableSet = cars.iter().collect();
            let expected = prefs
                .choices()
                .find(|c| set.contains(c))
                .map(str::to_string);

            let result = resolve(&prefs, &set);
            prop_assert_eq!(result.car().map(str::to_string), expected);
            if let Some(car) = result.car() {
                prop_assert!(set.contains(car));
            }
            prop_assert_eq!(resolve(&prefs, &set), result);
        }
    }
}
