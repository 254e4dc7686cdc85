use indexmap::IndexSet;
use std::fmt;
use thiserror::Error;

/// Stored value meaning "no preference at this rank".
pub const SENTINEL: &str = "null";

/// Alias for [`SENTINEL`] shown in menus and accepted on input.
pub const SENTINEL_DISPLAY: &str = "none";

/// Maximum number of ranked choices per participant.
pub const MAX_CHOICES: usize = 4;

/// Errors raised when building or editing a preference list
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreferenceError {
    #[error("Preference list must hold 1 to 4 entries, got {0}")]
    InvalidLength(usize),

    #[error("Rank {rank} is out of range for a list of {len} entries")]
    RankOutOfRange { rank: usize, len: usize },
}

/// Lowercases and trims a car identifier.
pub fn normalize_car_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// True when a normalized entry carries no preference.
pub fn is_sentinel(entry: &str) -> bool {
    entry.is_empty() || entry == SENTINEL || entry == SENTINEL_DISPLAY
}

/// One of the four fixed player positions (1..=4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticipantSlot(u8);

impl ParticipantSlot {
    pub const ALL: [ParticipantSlot; 4] = [
        ParticipantSlot(1),
        ParticipantSlot(2),
        ParticipantSlot(3),
        ParticipantSlot(4),
    ];

    /// Returns `None` for anything outside 1..=4.
    pub fn new(number: u8) -> Option<Self> {
        (1..=4).contains(&number).then_some(Self(number))
    }

    pub fn number(self) -> u8 {
        self.0
    }
}

impl fmt::Display for ParticipantSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Ordered car choices for one participant, highest priority first.
///
/// Entries are normalized on the way in. The length is fixed at construction
/// and individual ranks can be replaced with [`PreferenceList::set`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceList {
    entries: Vec<String>,
}

impl PreferenceList {
    pub fn new<I, S>(entries: I) -> Result<Self, PreferenceError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries: Vec<String> = entries
            .into_iter()
            .map(|e| normalize_car_name(e.as_ref()))
            .collect();

        if entries.is_empty() || entries.len() > MAX_CHOICES {
            return Err(PreferenceError::InvalidLength(entries.len()));
        }

        Ok(Self { entries })
    }

    /// A list of `len` sentinel entries
    pub fn unset(len: usize) -> Result<Self, PreferenceError> {
        Self::new(std::iter::repeat_n(SENTINEL, len))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Replace the entry at a zero-based rank.
    pub fn set(&mut self, rank: usize, value: &str) -> Result<(), PreferenceError> {
        let len = self.entries.len();
        let slot = self
            .entries
            .get_mut(rank)
            .ok_or(PreferenceError::RankOutOfRange { rank, len })?;
        *slot = normalize_car_name(value);
        Ok(())
    }

    /// Entries that actually name a car, in priority order
    pub fn choices(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .map(String::as_str)
            .filter(|e| !is_sentinel(e))
    }
}

/// Car identifiers that can currently be resolved to.
///
/// Keeps discovery order; every member is lowercase and trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailableSet {
    cars: IndexSet<String>,
}

impl AvailableSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a car, returning false if it was already present or blank.
    pub fn insert(&mut self, name: &str) -> bool {
        let name = normalize_car_name(name);
        if name.is_empty() {
            return false;
        }
        self.cars.insert(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cars.contains(name)
    }

    pub fn len(&self) -> usize {
        self.cars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.cars.iter().map(String::as_str)
    }

    /// Members in alphabetical order, as shown to players
    pub fn sorted(&self) -> Vec<&str> {
        let mut cars: Vec<&str> = self.iter().collect();
        cars.sort_unstable();
        cars
    }
}

impl<S: AsRef<str>> FromIterator<S> for AvailableSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for name in iter {
            set.insert(name.as_ref());
        }
        set
    }
}

/// Outcome of resolving one participant's preferences
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A car present in the available set at resolution time
    Car(String),
    /// Keep the game's default car
    NoOverride,
}

impl Resolution {
    pub fn car(&self) -> Option<&str> {
        match self {
            Resolution::Car(name) => Some(name),
            Resolution::NoOverride => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_slot_bounds() {
        assert!(ParticipantSlot::new(0).is_none());
        assert!(ParticipantSlot::new(5).is_none());
        assert_eq!(ParticipantSlot::new(3).unwrap().number(), 3);
        assert_eq!(ParticipantSlot::new(1).unwrap().to_string(), "Player 1");
    }

    #[test]
    fn test_preference_list_normalizes() {
        let list = PreferenceList::new(["  RedCar ", "NULL"]).unwrap();
        assert_eq!(list.entries(), &["redcar".to_string(), "null".to_string()]);
        assert_eq!(list.choices().collect::<Vec<_>>(), vec!["redcar"]);
    }

    #[test]
    fn test_preference_list_length_limits() {
        let empty: [&str; 0] = [];
        assert_eq!(
            PreferenceList::new(empty),
            Err(PreferenceError::InvalidLength(0))
        );
        assert_eq!(
            PreferenceList::new(["a", "b", "c", "d", "e"]),
            Err(PreferenceError::InvalidLength(5))
        );
    }

    #[test]
    fn test_set_rank() {
        let mut list = PreferenceList::unset(4).unwrap();
        list.set(2, "Cybertruck").unwrap();
        assert_eq!(list.entries()[2], "cybertruck");
        assert!(matches!(
            list.set(4, "x"),
            Err(PreferenceError::RankOutOfRange { rank: 4, len: 4 })
        ));
    }

    #[test]
    fn test_available_set_dedupes_and_sorts() {
        let set: AvailableSet = ["Zeta", "alpha", "ZETA", "  "].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains("zeta"));
        assert_eq!(set.sorted(), vec!["alpha", "zeta"]);
    }
}
