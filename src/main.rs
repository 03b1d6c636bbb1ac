use std::io::stdin;

use clap::Parser;
use ui::repl;

use crate::service::{data_manager::DataManager, gameapi::client::ApiConfig};

mod model;
mod service;
mod ui;

/// League of Legends champion and ability browser
#[derive(Parser, Debug)]
#[command(name = "champview")]
#[command(version, about, long_about = None)]
struct Args {
    /// Base URL of the static data API
    #[arg(long = "api-base", default_value = "https://ddragon.leagueoflegends.com")]
    api_base: String,

    /// Realm code selecting the data region
    #[arg(long = "realm", default_value = "euw")]
    realm: String,

    /// Locale for champion text
    #[arg(long = "locale", default_value = "en_US")]
    locale: String,

    /// Optional API credential, appended to every request
    #[arg(long = "api-key", env = "RIOT_API_KEY")]
    api_key: Option<String>,

    /// Load data from local JSON files instead of fetching from the API
    #[arg(short = 'l', long = "load-local")]
    load_local_json_files: bool,

    /// Store API responses to JSON files for debugging/testing
    #[arg(short = 's', long = "store-responses")]
    store_responses: bool,
}

fn main() {
    let args = Args::parse();

    let config = ApiConfig {
        base_url: args.api_base,
        realm: args.realm,
        locale: args.locale,
        api_key: args.api_key,
    };

    match DataManager::new(config, args.load_local_json_files, args.store_responses) {
        Ok(manager) => match repl::run(manager) {
            Ok(_) => return,
            Err(error) => println!("Error occured while running REPL:\n{}\n", error),
        },
        Err(error) => println!("Error occured while initializing:\n{}\n", error),
    };

    let mut s = String::new();
    println!("Press Enter to exit");
    let _ = stdin().read_line(&mut s);
}
