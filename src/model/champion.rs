use super::{ability::AbilityRecord, ids::ChampionKey};

#[derive(Debug)]
pub struct AllChampionData {
    pub index: Vec<ChampionSummary>,
    pub details: std::collections::HashMap<ChampionKey, ChampionDetail>,
}

/// Entry in the alphabetically sorted champion index.
#[derive(Debug, Clone)]
pub struct ChampionSummary {
    pub key: ChampionKey,
    pub id: i32,
    pub name: String,
    pub title: String,
    pub image_full: String,
}

/// Full data for a single champion, including all five abilities.
#[derive(Debug, Clone)]
pub struct ChampionDetail {
    pub key: ChampionKey,
    pub name: String,
    pub title: String,
    pub lore: String,
    pub passive: AbilityRecord,
    pub spells: Vec<AbilityRecord>,
}
