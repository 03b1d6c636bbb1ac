use std::{
    cell::RefCell,
    collections::{hash_map::Entry, HashMap},
    fmt,
    fs::{create_dir, File},
    io::{self, Read, Write},
    rc::Rc,
    time::Duration,
};

use json::JsonValue;
use reqwest::blocking::Client;

use super::parsing::realm::Realm;
use crate::model::ids::ChampionKey;

/// Where and how to reach the static data API. Passed in explicitly; there
/// is no baked-in endpoint or key.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base of the realms endpoint, e.g. "https://ddragon.leagueoflegends.com".
    pub base_url: String,
    /// Realm code selecting the data region, e.g. "euw".
    pub realm: String,
    /// Locale for champion text, e.g. "en_US".
    pub locale: String,
    /// Optional credential, appended as an api_key query parameter.
    pub api_key: Option<String>,
}

pub struct ApiClient {
    config: ApiConfig,
    write_json: bool,
    load_local_json: bool,
    client: Client,
    cache: RefCell<HashMap<ClientRequestType, Rc<JsonValue>>>,
    realm: Option<Realm>,
}

impl ApiClient {
    pub fn new(config: ApiConfig, read_json_files: bool, write_json: bool) -> Result<Self, ClientInitError> {
        let client = Client::builder().timeout(Duration::from_secs(90)).build()?;
        let cache = RefCell::from(HashMap::new());
        Ok(Self {
            config,
            write_json,
            load_local_json: read_json_files,
            client,
            cache,
            realm: None,
        })
    }

    pub fn request(&self, request_type: ClientRequestType, cache: bool) -> Result<Rc<JsonValue>, RequestError> {
        if self.load_local_json {
            let mut file = File::open(format!("data/{:?}.json", request_type))?;
            let mut buf = String::new();
            file.read_to_string(&mut buf)?;
            let json = json::parse(buf.as_str())?;
            return Ok(Rc::new(json));
        }

        match self.cache.borrow_mut().entry(request_type) {
            Entry::Occupied(oe) => Ok(oe.get().clone()),
            Entry::Vacant(ve) => {
                let url = match request_type {
                    ClientRequestType::Realm => {
                        format!("{}/realms/{}.json", self.config.base_url, self.config.realm)
                    }
                    ClientRequestType::Champions => match &self.realm {
                        Some(realm) => format!(
                            "{}/{}/data/{}/championFull.json",
                            realm.cdn, realm.version, self.config.locale
                        ),
                        None => return Err(RequestError::RealmNeeded),
                    },
                };
                let url = self.with_api_key(url);

                // Send request
                let response = self.client.get(url).send()?;
                if !response.status().is_success() {
                    return Err(RequestError::InvalidResponse(request_type, Box::new(response)));
                }

                // Return json
                let text = response.text()?;
                let json = json::parse(text.as_str())?;

                if self.write_json {
                    let _ = create_dir("data");
                    if let Ok(mut file) = File::create(format!("data/{:?}.json", request_type)) {
                        let _ = file.write_all(json.pretty(2).as_bytes());
                    }
                }

                let rc_json = Rc::new(json);
                if cache {
                    ve.insert(rc_json.clone());
                }
                Ok(rc_json)
            }
        }
    }

    pub fn set_realm(&mut self, realm: Realm) {
        self.realm = Some(realm);
    }

    pub fn refresh(&mut self) {
        self.cache.borrow_mut().clear();
        self.realm = None;
    }

    fn with_api_key(&self, url: String) -> String {
        match &self.config.api_key {
            Some(key) => format!("{}?api_key={}", url, key),
            None => url,
        }
    }

    /// Versioned portrait image for the champion grid.
    pub fn portrait_url(&self, image_full: &str) -> Result<String, RequestError> {
        let realm = self.realm.as_ref().ok_or(RequestError::RealmNeeded)?;
        Ok(format!("{}/{}/img/champion/{}", realm.cdn, realm.version, image_full))
    }

    /// Splash art lives on an unversioned path, keyed by champion and skin.
    pub fn splash_url(&self, key: &ChampionKey) -> Result<String, RequestError> {
        let realm = self.realm.as_ref().ok_or(RequestError::RealmNeeded)?;
        Ok(format!("{}/img/champion/splash/{}_0.jpg", realm.cdn, key))
    }

    pub fn spell_icon_url(&self, image_full: &str) -> Result<String, RequestError> {
        let realm = self.realm.as_ref().ok_or(RequestError::RealmNeeded)?;
        Ok(format!("{}/{}/img/spell/{}", realm.cdn, realm.version, image_full))
    }

    pub fn passive_icon_url(&self, image_full: &str) -> Result<String, RequestError> {
        let realm = self.realm.as_ref().ok_or(RequestError::RealmNeeded)?;
        Ok(format!("{}/{}/img/passive/{}", realm.cdn, realm.version, image_full))
    }
}

#[derive(Debug, PartialEq, Hash, Eq, Clone, Copy)]
pub enum ClientRequestType {
    Realm,
    Champions,
}

#[derive(Debug)]
pub enum ClientInitError {
    ClientError(reqwest::Error),
}

impl fmt::Display for ClientInitError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ClientInitError::ClientError(err) => write!(f, "Client error: {}", err),
        }
    }
}

impl From<reqwest::Error> for ClientInitError {
    fn from(error: reqwest::Error) -> Self {
        Self::ClientError(error)
    }
}

#[derive(Debug)]
pub enum RequestError {
    ClientFailed(reqwest::Error),
    RealmNeeded,
    InvalidResponse(ClientRequestType, Box<reqwest::blocking::Response>),
    ParsingFailed(json::Error),
    LocalFileError(io::Error),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RequestError::ClientFailed(err) => write!(f, "Client error: {}", err),
            RequestError::RealmNeeded => write!(f, "Realm information is needed for this request."),
            RequestError::InvalidResponse(req_type, response) => write!(
                f,
                "The server returned an invalid response for request {:?}: {:?}",
                req_type, response
            ),
            RequestError::ParsingFailed(err) => write!(f, "Parsing error: {}", err),
            RequestError::LocalFileError(err) => write!(f, "Local file error: {}", err),
        }
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(error: reqwest::Error) -> Self {
        RequestError::ClientFailed(error)
    }
}

impl From<json::Error> for RequestError {
    fn from(error: json::Error) -> Self {
        RequestError::ParsingFailed(error)
    }
}

impl From<io::Error> for RequestError {
    fn from(error: io::Error) -> Self {
        RequestError::LocalFileError(error)
    }
}
