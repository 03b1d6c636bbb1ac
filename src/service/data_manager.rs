use once_cell::sync::OnceCell;

use crate::model::{
    champion::{AllChampionData, ChampionDetail, ChampionSummary},
    ids::ChampionKey,
};

use super::gameapi::{
    client::{ApiClient, ApiConfig, ClientInitError, ClientRequestType, RequestError},
    parsing::{champion::parse_champion_data, realm::parse_realm, ParsingError},
};

/// Owns the API client and caches the parsed champion data for the lifetime
/// of one session. All champion details come from a single document, so one
/// request fills both the index and the per-champion lookups.
pub struct DataManager {
    client: ApiClient,
    champion_cache: OnceCell<AllChampionData>,
}

impl DataManager {
    pub fn new(config: ApiConfig, load_local_json: bool, write_json: bool) -> Result<Self, DataManagerInitError> {
        let mut client = ApiClient::new(config, load_local_json, write_json)?;
        DataManager::retrieve_realm(&mut client)?;

        Ok(Self {
            client,
            champion_cache: OnceCell::new(),
        })
    }

    /// Alphabetically sorted champion index.
    pub fn get_champions(&self) -> DataRetrievalResult<&Vec<ChampionSummary>> {
        self.champion_data().map(|data| &data.index)
    }

    pub fn get_champion_detail(&self, key: &ChampionKey) -> DataRetrievalResult<&ChampionDetail> {
        self.champion_data()?
            .details
            .get(key)
            .ok_or_else(|| DataRetrievalError::UnknownChampion(key.clone()))
    }

    pub fn portrait_url(&self, champ: &ChampionSummary) -> DataRetrievalResult<String> {
        Ok(self.client.portrait_url(&champ.image_full)?)
    }

    pub fn splash_url(&self, key: &ChampionKey) -> DataRetrievalResult<String> {
        Ok(self.client.splash_url(key)?)
    }

    pub fn spell_icon_url(&self, image_full: &str) -> DataRetrievalResult<String> {
        Ok(self.client.spell_icon_url(image_full)?)
    }

    pub fn passive_icon_url(&self, image_full: &str) -> DataRetrievalResult<String> {
        Ok(self.client.passive_icon_url(image_full)?)
    }

    pub fn refresh(&mut self) -> DataRetrievalResult<()> {
        self.client.refresh();
        DataManager::retrieve_realm(&mut self.client)?;
        self.champion_cache = OnceCell::new();
        Ok(())
    }

    fn champion_data(&self) -> DataRetrievalResult<&AllChampionData> {
        self.champion_cache.get_or_try_init(|| {
            let champs_json = self.client.request(ClientRequestType::Champions, true)?;
            let champ_data = parse_champion_data(&champs_json)?;
            Ok(champ_data)
        })
    }

    fn retrieve_realm(client: &mut ApiClient) -> DataRetrievalResult<()> {
        let realm_json = client.request(ClientRequestType::Realm, false)?;
        let realm = parse_realm(&realm_json)?;
        client.set_realm(realm);
        Ok(())
    }
}

pub type DataRetrievalResult<T> = Result<T, DataRetrievalError>;

#[derive(Debug)]
pub enum DataManagerInitError {
    ClientFailed(ClientInitError),
    RealmNotFound(DataRetrievalError),
}

impl std::fmt::Display for DataManagerInitError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            DataManagerInitError::ClientFailed(err) => write!(f, "Client init failed: {}", err),
            DataManagerInitError::RealmNotFound(err) => write!(f, "Realm data not found: {}", err),
        }
    }
}

impl From<ClientInitError> for DataManagerInitError {
    fn from(error: ClientInitError) -> Self {
        Self::ClientFailed(error)
    }
}

impl From<DataRetrievalError> for DataManagerInitError {
    fn from(error: DataRetrievalError) -> Self {
        Self::RealmNotFound(error)
    }
}

#[derive(Debug)]
pub enum DataRetrievalError {
    ClientFailed(RequestError),
    ParsingFailed(ParsingError),
    UnknownChampion(ChampionKey),
}

impl std::fmt::Display for DataRetrievalError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            DataRetrievalError::ClientFailed(err) => write!(f, "Request failed: {}", err),
            DataRetrievalError::ParsingFailed(err) => write!(f, "Parsing failed: {}", err),
            DataRetrievalError::UnknownChampion(key) => write!(f, "Unknown champion key '{}'", key),
        }
    }
}

impl From<RequestError> for DataRetrievalError {
    fn from(error: RequestError) -> Self {
        Self::ClientFailed(error)
    }
}

impl From<ParsingError> for DataRetrievalError {
    fn from(error: ParsingError) -> Self {
        Self::ParsingFailed(error)
    }
}
