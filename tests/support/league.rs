//! A two-team draft league served by a scripted transport.
//!
//! Draft element `n` is the main-game player `n + 500`; both bootstraps name
//! them identically so the mapping resolves every element by name. Entry
//! 101 owns elements 1-15, entry 102 owns 16-30 and 31-40 are free agents.

use std::sync::Arc;

use draftwise::adapter::outbound::draft::client::DraftClient;
use draftwise::adapter::outbound::draft::settings::ApiConfig;
use draftwise::application::cache::{CacheSettings, TtlCache};
use draftwise::application::fetcher::{ResilientFetcher, RetryPolicy};
use draftwise::application::league::LeagueService;
use draftwise::domain::formation::Formation;
use draftwise::domain::player::PlayerIndex;
use draftwise::domain::position::Position;
use draftwise::port::clock::Sleeper;
use draftwise::testkit::domain::player;
use draftwise::testkit::http::ScriptedTransport;
use draftwise::testkit::store::CountingStore;
use draftwise::testkit::time::{ManualClock, RecordingSleeper};
use serde_json::{json, Value};

pub const LEAGUE: u32 = 42;
pub const FIRST_ENTRY: u32 = 101;
pub const SECOND_ENTRY: u32 = 102;
pub const ELEMENTS: u32 = 40;

pub fn fantasy_id(element: u32) -> u32 {
    element + 500
}

/// Two goalkeepers, five defenders, five midfielders and three forwards per
/// block of fifteen.
pub fn element_position(element: u32) -> Position {
    match (element - 1) % 15 {
        0..=1 => Position::Goalkeeper,
        2..=6 => Position::Defender,
        7..=11 => Position::Midfielder,
        _ => Position::Forward,
    }
}

fn predicted(element: u32) -> f64 {
    f64::from((element * 7) % 13) + 0.5
}

pub fn roster_of(entry: u32) -> Vec<u32> {
    match entry {
        FIRST_ENTRY => (1..=15).collect(),
        SECOND_ENTRY => (16..=30).collect(),
        _ => Vec::new(),
    }
}

/// The dataset, keyed by main-game id.
pub fn players() -> PlayerIndex {
    PlayerIndex::new((1..=ELEMENTS).map(|element| {
        let mut p = player(fantasy_id(element), element_position(element), predicted(element));
        p.web_name = format!("Surname{element}");
        p
    }))
}

fn element_json(id: u32, element: u32) -> Value {
    json!({
        "id": id,
        "first_name": format!("Given{element}"),
        "second_name": format!("Surname{element}"),
        "web_name": format!("Surname{element}"),
        "element_type": element_position(element).element_type(),
    })
}

pub fn details_json(current_event: Option<u32>) -> Value {
    json!({
        "league": {"id": LEAGUE, "name": "Office League", "current_event": current_event},
        "league_entries": [
            {"id": 1, "entry_id": FIRST_ENTRY, "entry_name": "Alpha", "player_first_name": "Ann", "player_last_name": "Lee"},
            {"id": 2, "entry_id": SECOND_ENTRY, "entry_name": "Bravo", "player_first_name": "Bo", "player_last_name": "Ng"},
            {"id": 3, "entry_id": null, "entry_name": "Open place"}
        ]
    })
}

pub fn standings_json() -> Value {
    json!({
        "standings": [
            {"league_entry": 2, "rank": 1, "total": 131},
            {"league_entry": 1, "rank": 2, "total": 117}
        ]
    })
}

pub fn picks_json(elements: &[u32]) -> Value {
    let picks: Vec<Value> = elements
        .iter()
        .zip(1u32..)
        .map(|(element, slot)| json!({"element": element, "position": slot, "is_captain": false}))
        .collect();
    json!({ "picks": picks, "subs": [] })
}

pub fn draft_bootstrap_json() -> Value {
    let elements: Vec<Value> = (1..=ELEMENTS).map(|e| element_json(e, e)).collect();
    json!({ "elements": elements, "events": {"current": 1} })
}

pub fn fantasy_bootstrap_json(events: Value) -> Value {
    let elements: Vec<Value> = (1..=ELEMENTS).map(|e| element_json(fantasy_id(e), e)).collect();
    json!({ "elements": elements, "events": events })
}

pub fn details_path() -> String {
    format!("/league/{LEAGUE}/details")
}

pub fn standings_path() -> String {
    format!("/league/{LEAGUE}/standings")
}

pub fn picks_path(entry: u32, event: u32) -> String {
    format!("/entry/{entry}/event/{event}")
}

pub const DRAFT_BOOTSTRAP: &str = "draft.premierleague.com/api/bootstrap-static";
pub const FANTASY_BOOTSTRAP: &str = "fantasy.premierleague.com/api/bootstrap-static/";

/// Route every league endpoint. Routes added before this call win, so tests
/// register failures first.
pub fn install(transport: &ScriptedTransport, reported_event: Option<u32>, picks_event: u32, events: Value) {
    transport
        .route(&details_path(), 200, &details_json(reported_event))
        .route(&standings_path(), 200, &standings_json())
        .route(DRAFT_BOOTSTRAP, 200, &draft_bootstrap_json())
        .route(FANTASY_BOOTSTRAP, 200, &fantasy_bootstrap_json(events));
    for entry in [FIRST_ENTRY, SECOND_ENTRY] {
        transport.route(&picks_path(entry, picks_event), 200, &picks_json(&roster_of(entry)));
    }
}

pub struct Fixture {
    pub api: ApiConfig,
    pub transport: ScriptedTransport,
    pub sleeper: Arc<RecordingSleeper>,
    pub store: CountingStore,
    pub cache: Arc<TtlCache>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_api(ApiConfig::default())
    }

    pub fn with_api(api: ApiConfig) -> Self {
        let store = CountingStore::unbounded();
        let cache = Arc::new(TtlCache::with_clock(
            store.clone(),
            Arc::new(ManualClock::new(1_000_000)),
            CacheSettings::default(),
        ));
        Self {
            api,
            transport: ScriptedTransport::new(),
            sleeper: Arc::new(RecordingSleeper::new()),
            store,
            cache,
        }
    }

    pub fn fetcher(&self) -> ResilientFetcher {
        let sleeper: Arc<dyn Sleeper> = self.sleeper.clone();
        ResilientFetcher::with_sleeper(
            Arc::new(self.transport.clone()),
            Arc::clone(&self.cache),
            sleeper,
            RetryPolicy::default(),
        )
    }

    pub fn client(&self) -> DraftClient {
        DraftClient::new(self.fetcher(), self.api.clone())
    }

    pub fn service(&self) -> LeagueService {
        LeagueService::new(Arc::new(self.client()), players(), Formation::default())
    }

    pub fn requests_to(&self, fragment: &str) -> usize {
        self.transport
            .requests()
            .iter()
            .filter(|url| url.contains(fragment))
            .count()
    }
}
