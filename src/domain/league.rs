//! League-level records: entries, standings, bootstrap elements and events.

use serde::{Deserialize, Serialize};

use super::id::{EntryId, LeagueEntryId};
use super::position::Position;

/// A team in a draft league.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueEntry {
    /// League-local id, referenced by standings.
    pub id: LeagueEntryId,
    /// Global entry id, used to fetch picks.
    pub entry_id: EntryId,
    #[serde(rename = "entry_name", default)]
    pub name: String,
    #[serde(default)]
    pub manager: String,
}

/// League metadata with its entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeagueDetails {
    pub name: String,
    pub entries: Vec<LeagueEntry>,
    /// Event the league reports as current, when it does.
    pub current_event: Option<u32>,
}

/// One row of the league table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub league_entry: LeagueEntryId,
    #[serde(default)]
    pub rank: u32,
    #[serde(default)]
    pub total: i64,
}

/// The identifying fields of a bootstrap player element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementName {
    pub id: u32,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub second_name: String,
    #[serde(default)]
    pub web_name: String,
    #[serde(default)]
    pub element_type: Option<Position>,
}

impl ElementName {
    /// Lowercase full name with accents and punctuation removed.
    #[must_use]
    pub fn normalized(&self) -> String {
        normalize_name(&format!("{} {}", self.first_name, self.second_name))
    }

    /// Second names equal, or one containing the other, ignoring case. A
    /// blank name on either side never matches.
    #[must_use]
    pub fn second_name_matches(&self, other: &Self) -> bool {
        let a = self.second_name.trim().to_lowercase();
        let b = other.second_name.trim().to_lowercase();
        if a.is_empty() || b.is_empty() {
            return false;
        }
        a == b || a.contains(&b) || b.contains(&a)
    }
}

/// Lowercase, keep ASCII letters, digits and whitespace, collapse runs of
/// whitespace.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    let kept: String = name
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            'a'..='z' | '0'..='9' => Some(c),
            c if c.is_whitespace() => Some(' '),
            c => fold_accent(c),
        })
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn fold_accent(c: char) -> Option<char> {
    let folded = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'č' => 'c',
        'ď' | 'đ' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => 'e',
        'ğ' => 'g',
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' | 'ı' => 'i',
        'ł' | 'ľ' => 'l',
        'ñ' | 'ń' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => 'o',
        'ř' => 'r',
        'ś' | 'š' | 'ş' | 'ș' => 's',
        'ť' | 'ț' | 'ţ' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' => 'u',
        'ý' | 'ÿ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        _ => return None,
    };
    Some(folded)
}

/// A gameweek from the bootstrap event list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameEvent {
    pub id: u32,
    pub is_current: bool,
    pub is_next: bool,
    pub finished: bool,
    pub finished_provisional: bool,
}

/// The event to show: the current one, else the next, else the latest
/// finished, else 1.
#[must_use]
pub fn current_event(events: &[GameEvent]) -> u32 {
    events
        .iter()
        .find(|e| e.is_current)
        .or_else(|| events.iter().find(|e| e.is_next))
        .map(|e| e.id)
        .or_else(|| {
            events
                .iter()
                .filter(|e| e.finished || e.finished_provisional)
                .map(|e| e.id)
                .max()
        })
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: u32) -> GameEvent {
        GameEvent {
            id,
            ..GameEvent::default()
        }
    }

    #[test]
    fn current_event_prefers_current_then_next() {
        let mut events = vec![event(1), event(2), event(3)];
        events[2].is_next = true;
        assert_eq!(current_event(&events), 3);

        events[1].is_current = true;
        assert_eq!(current_event(&events), 2);
    }

    #[test]
    fn current_event_falls_back_to_latest_finished() {
        let mut events = vec![event(1), event(2), event(3)];
        events[0].finished = true;
        events[1].finished_provisional = true;
        assert_eq!(current_event(&events), 2);
        assert_eq!(current_event(&[]), 1);
    }

    #[test]
    fn normalizes_accents_and_punctuation() {
        assert_eq!(normalize_name("Martin  Ødegaard"), "martin odegaard");
        assert_eq!(normalize_name("João Pedro Junqueira de Jesus"), "joao pedro junqueira de jesus");
        assert_eq!(normalize_name("O'Reilly-Smith"), "oreillysmith");
    }

    #[test]
    fn second_names_match_by_containment() {
        let a = ElementName {
            id: 1,
            first_name: "Dominic".into(),
            second_name: "Calvert-Lewin".into(),
            web_name: "Calvert-Lewin".into(),
            element_type: Some(Position::Forward),
        };
        let b = ElementName {
            second_name: "calvert".into(),
            ..a.clone()
        };
        assert!(a.second_name_matches(&b));
    }

    #[test]
    fn blank_second_names_never_match() {
        let named = ElementName {
            id: 4,
            second_name: "Saka".into(),
            ..ElementName::default()
        };
        let blank = ElementName {
            id: 4,
            second_name: "  ".into(),
            ..ElementName::default()
        };
        assert!(!named.second_name_matches(&blank));
        assert!(!blank.second_name_matches(&named));
        assert!(!blank.second_name_matches(&blank));
    }

    #[test]
    fn deserializes_entry_fields() {
        let json = r#"{"id": 7, "entry_id": 1234, "entry_name": "Hammers", "extra": true}"#;
        let entry: LeagueEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id, LeagueEntryId::new(7));
        assert_eq!(entry.entry_id, EntryId::new(1234));
        assert_eq!(entry.name, "Hammers");
        assert_eq!(entry.manager, "");
    }
}
