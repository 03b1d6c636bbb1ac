use std::fmt::Display;

/// Unique key identifying a champion in the static data API, e.g. "Aatrox"
/// or "MonkeyKing". Doubles as the file stem for portrait and splash URLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChampionKey(String);

impl ChampionKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ChampionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ChampionKey {
    fn from(value: String) -> Self {
        ChampionKey(value)
    }
}

impl From<&str> for ChampionKey {
    fn from(value: &str) -> Self {
        ChampionKey(value.to_string())
    }
}
