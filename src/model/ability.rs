use std::fmt::Display;

/// One ability of a champion, as delivered by the static data API.
///
/// `description` is always present. `tooltip` is the more detailed variant
/// and, when present, is the one eligible for placeholder substitution.
/// `effect_values` is indexed by the digit in `{{ eN }}` tokens; the API
/// ships a null at position 0 so the indices line up, which parses to an
/// empty string here. `variables` supplies values for `{{ XY }}` tokens.
#[derive(Debug, Clone)]
pub struct AbilityRecord {
    pub name: String,
    pub description: String,
    pub tooltip: Option<String>,
    pub effect_values: Vec<String>,
    pub variables: Option<Vec<AbilityVariable>>,
    pub image_full: String,
}

/// A scaling variable attached to an ability, keyed by a two-character
/// identifier such as "a1" or "f2".
#[derive(Debug, Clone)]
pub struct AbilityVariable {
    pub key: String,
    pub coefficients: Vec<f64>,
}

/// The five ability slots of a champion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbilitySlot {
    Passive,
    Q,
    W,
    E,
    R,
}

impl AbilitySlot {
    pub const ALL: [AbilitySlot; 5] = [
        AbilitySlot::Passive,
        AbilitySlot::Q,
        AbilitySlot::W,
        AbilitySlot::E,
        AbilitySlot::R,
    ];

    /// Index into a champion's spell list, None for the passive.
    pub fn spell_index(&self) -> Option<usize> {
        match self {
            AbilitySlot::Passive => None,
            AbilitySlot::Q => Some(0),
            AbilitySlot::W => Some(1),
            AbilitySlot::E => Some(2),
            AbilitySlot::R => Some(3),
        }
    }

    pub fn next(&self) -> AbilitySlot {
        match self {
            AbilitySlot::Passive => AbilitySlot::Q,
            AbilitySlot::Q => AbilitySlot::W,
            AbilitySlot::W => AbilitySlot::E,
            AbilitySlot::E => AbilitySlot::R,
            AbilitySlot::R => AbilitySlot::Passive,
        }
    }

    pub fn previous(&self) -> AbilitySlot {
        match self {
            AbilitySlot::Passive => AbilitySlot::R,
            AbilitySlot::Q => AbilitySlot::Passive,
            AbilitySlot::W => AbilitySlot::Q,
            AbilitySlot::E => AbilitySlot::W,
            AbilitySlot::R => AbilitySlot::E,
        }
    }
}

impl Display for AbilitySlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AbilitySlot::Passive => write!(f, "Passive"),
            AbilitySlot::Q => write!(f, "Q"),
            AbilitySlot::W => write!(f, "W"),
            AbilitySlot::E => write!(f, "E"),
            AbilitySlot::R => write!(f, "R"),
        }
    }
}
