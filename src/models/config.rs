use crate::models::preferences::{
    MAX_CHOICES, ParticipantSlot, PreferenceError, PreferenceList, SENTINEL, SENTINEL_DISPLAY,
    normalize_car_name,
};
use serde::{Deserialize, Serialize};

/// Car configuration from CustomCars.yaml
///
/// Holds the informational car list, update checker and model browser
/// settings, and the ranked car choices for each of the four players.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarConfig {
    #[serde(rename = "Available Cars", default)]
    pub available_cars: AvailableCarsSection,

    #[serde(rename = "Update Checker", default)]
    pub update_checker: UpdateCheckerSettings,

    #[serde(rename = "Model Browser", default)]
    pub model_browser: ModelBrowserSettings,

    #[serde(rename = "Preferences", default)]
    pub preferences: PreferenceSettings,

    #[serde(rename = "Player 1", default)]
    pub player1: PlayerChoices,

    #[serde(rename = "Player 2", default)]
    pub player2: PlayerChoices,

    #[serde(rename = "Player 3", default)]
    pub player3: PlayerChoices,

    #[serde(rename = "Player 4", default)]
    pub player4: PlayerChoices,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableCarsSection {
    /// Comma separated lowercase car names, or "none". Rewritten on every scan.
    #[serde(rename = "CarList", default = "default_car_list")]
    pub car_list: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCheckerSettings {
    #[serde(rename = "CheckForUpdates", default = "default_true")]
    pub check_for_updates: bool,

    #[serde(rename = "SilenceUpdateNotifications", default)]
    pub silence_update_notifications: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelBrowserSettings {
    #[serde(rename = "OpenBrowserKey", default = "default_browser_key")]
    pub open_browser_key: String,

    #[serde(rename = "OpenCarConfigKey", default = "default_car_config_key")]
    pub open_car_config_key: String,

    #[serde(rename = "AutoCheckForNewModels", default = "default_true")]
    pub auto_check_for_new_models: bool,
}

/// How many ranked choices each player gets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChoiceArity {
    Single,
    #[default]
    Four,
}

impl ChoiceArity {
    pub fn choice_count(self) -> usize {
        match self {
            ChoiceArity::Single => 1,
            ChoiceArity::Four => MAX_CHOICES,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceSettings {
    #[serde(rename = "Mode", default)]
    pub mode: ChoiceArity,
}

/// Ranked car choices for one player. "null" means no preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerChoices {
    #[serde(rename = "FirstChoice", default = "default_choice")]
    pub first_choice: String,

    #[serde(rename = "SecondChoice", default = "default_choice")]
    pub second_choice: String,

    #[serde(rename = "ThirdChoice", default = "default_choice")]
    pub third_choice: String,

    #[serde(rename = "FourthChoice", default = "default_choice")]
    pub fourth_choice: String,
}

impl PlayerChoices {
    fn ranks(&self) -> [&String; MAX_CHOICES] {
        [
            &self.first_choice,
            &self.second_choice,
            &self.third_choice,
            &self.fourth_choice,
        ]
    }

    fn rank_mut(&mut self, rank: usize) -> Option<&mut String> {
        match rank {
            0 => Some(&mut self.first_choice),
            1 => Some(&mut self.second_choice),
            2 => Some(&mut self.third_choice),
            3 => Some(&mut self.fourth_choice),
            _ => None,
        }
    }
}

impl Default for PlayerChoices {
    fn default() -> Self {
        Self {
            first_choice: default_choice(),
            second_choice: default_choice(),
            third_choice: default_choice(),
            fourth_choice: default_choice(),
        }
    }
}

impl Default for AvailableCarsSection {
    fn default() -> Self {
        Self {
            car_list: default_car_list(),
        }
    }
}

impl Default for UpdateCheckerSettings {
    fn default() -> Self {
        Self {
            check_for_updates: true,
            silence_update_notifications: false,
        }
    }
}

impl Default for ModelBrowserSettings {
    fn default() -> Self {
        Self {
            open_browser_key: default_browser_key(),
            open_car_config_key: default_car_config_key(),
            auto_check_for_new_models: true,
        }
    }
}

impl Default for CarConfig {
    fn default() -> Self {
        Self {
            available_cars: AvailableCarsSection::default(),
            update_checker: UpdateCheckerSettings::default(),
            model_browser: ModelBrowserSettings::default(),
            preferences: PreferenceSettings::default(),
            player1: PlayerChoices::default(),
            player2: PlayerChoices::default(),
            player3: PlayerChoices::default(),
            player4: PlayerChoices::default(),
        }
    }
}

fn default_choice() -> String {
    SENTINEL.to_string()
}

fn default_car_list() -> String {
    SENTINEL_DISPLAY.to_string()
}

fn default_true() -> bool {
    true
}

fn default_browser_key() -> String {
    "F6".to_string()
}

fn default_car_config_key() -> String {
    "F8".to_string()
}

impl CarConfig {
    /// Get the stored choices for a player
    pub fn player(&self, slot: ParticipantSlot) -> &PlayerChoices {
        match slot.number() {
            1 => &self.player1,
            2 => &self.player2,
            3 => &self.player3,
            _ => &self.player4,
        }
    }

    fn player_mut(&mut self, slot: ParticipantSlot) -> &mut PlayerChoices {
        match slot.number() {
            1 => &mut self.player1,
            2 => &mut self.player2,
            3 => &mut self.player3,
            _ => &mut self.player4,
        }
    }

    /// Build the preference list for a player, sized by the configured mode
    pub fn preference_list(&self, slot: ParticipantSlot) -> PreferenceList {
        let arity = self.preferences.mode.choice_count();
        let entries = self.player(slot).ranks().into_iter().take(arity);
        PreferenceList::new(entries).expect("choice arity is always 1 or 4")
    }

    /// Store a choice for a player.
    ///
    /// # Arguments
    /// * `slot` - Player whose choices change
    /// * `rank` - Zero-based rank, 0 is the first choice
    /// * `value` - Car name; "none" and blank are saved as "null"
    ///
    /// # Returns
    /// `RankOutOfRange` when `rank` is past the last choice of the configured mode
    pub fn set_choice(
        &mut self,
        slot: ParticipantSlot,
        rank: usize,
        value: &str,
    ) -> Result<(), PreferenceError> {
        let len = self.preferences.mode.choice_count();
        if rank >= len {
            return Err(PreferenceError::RankOutOfRange { rank, len });
        }

        let normalized = normalize_car_name(value);
        let stored = if normalized.is_empty() || normalized == SENTINEL_DISPLAY {
            SENTINEL.to_string()
        } else {
            normalized
        };

        if let Some(entry) = self.player_mut(slot).rank_mut(rank) {
            *entry = stored;
        }
        Ok(())
    }

    /// Choice as shown in menus: the sentinel is displayed as "none"
    pub fn display_choice(&self, slot: ParticipantSlot, rank: usize) -> Option<String> {
        let value = self.player(slot).ranks().get(rank)?.trim().to_lowercase();
        if value.is_empty() || value == SENTINEL {
            Some(SENTINEL_DISPLAY.to_string())
        } else {
            Some(value)
        }
    }

    /// Rewrite the informational car list from a fresh inventory.
    ///
    /// # Arguments
    /// * `names` - Installed car identifiers, in any order or case
    pub fn update_available_cars_list<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names: Vec<String> = names
            .into_iter()
            .map(|n| n.as_ref().to_lowercase())
            .collect();

        if names.is_empty() {
            self.available_cars.car_list = default_car_list();
            return;
        }

        names.sort();
        self.available_cars.car_list = names.join(", ");
    }

    /// Update checks run only when enabled and not silenced
    pub fn should_check_for_updates(&self) -> bool {
        self.update_checker.check_for_updates && !self.update_checker.silence_update_notifications
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(n: u8) -> ParticipantSlot {
        ParticipantSlot::new(n).unwrap()
    }

    #[test]
    fn test_car_config_defaults() {
        let config = CarConfig::default();
        assert_eq!(config.available_cars.car_list, "none");
        assert_eq!(config.preferences.mode, ChoiceArity::Four);
        assert_eq!(config.player3.fourth_choice, "null");
        assert!(config.should_check_for_updates());
        assert_eq!(config.model_browser.open_browser_key, "F6");
    }

    #[test]
    fn test_preference_list_follows_mode() {
        let mut config = CarConfig::default();
        assert_eq!(config.preference_list(slot(1)).len(), 4);

        config.preferences.mode = ChoiceArity::Single;
        assert_eq!(config.preference_list(slot(1)).len(), 1);
    }

    #[test]
    fn test_set_choice_stores_sentinel_for_none() {
        let mut config = CarConfig::default();
        config.set_choice(slot(2), 1, "Cybertruck").unwrap();
        assert_eq!(config.player2.second_choice, "cybertruck");

        config.set_choice(slot(2), 1, "None").unwrap();
        assert_eq!(config.player2.second_choice, "null");
        assert_eq!(config.display_choice(slot(2), 1), Some("none".to_string()));
    }

    #[test]
    fn test_set_choice_respects_single_mode() {
        let mut config = CarConfig::default();
        config.preferences.mode = ChoiceArity::Single;
        assert!(config.set_choice(slot(1), 1, "redcar").is_err());
        assert!(config.set_choice(slot(1), 0, "redcar").is_ok());
    }

    #[test]
    fn test_update_available_cars_list() {
        let mut config = CarConfig::default();
        config.update_available_cars_list(["Zoom", "Alpha"]);
        assert_eq!(config.available_cars.car_list, "alpha, zoom");

        config.update_available_cars_list(Vec::<String>::new());
        assert_eq!(config.available_cars.car_list, "none");
    }

    #[test]
    fn test_silenced_updates_are_not_checked() {
        let mut config = CarConfig::default();
        config.update_checker.silence_update_notifications = true;
        assert!(!config.should_check_for_updates());
    }
}
