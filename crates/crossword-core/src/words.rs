use crate::error::PoolError;
use crate::types::{WordEntry, GRID_SIZE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Shortest answer accepted into a pool
pub const MIN_WORD_LEN: usize = 2;

/// Built-in themed word list: (answer, clue, category)
const BUILTIN_WORDS: &[(&str, &str, &str)] = &[
    // Space
    ("PLANET", "Body that orbits a star", "Space"),
    ("COMET", "Icy visitor with a glowing tail", "Space"),
    ("ORBIT", "Curved path around a planet", "Space"),
    ("GALAXY", "Milky Way, for one", "Space"),
    ("NEBULA", "Cloud of gas where stars are born", "Space"),
    ("ASTEROID", "Rocky body between Mars and Jupiter", "Space"),
    ("METEOR", "Shooting star", "Space"),
    ("ROCKET", "Launch vehicle", "Space"),
    ("SATURN", "Ringed sixth planet", "Space"),
    ("ECLIPSE", "When the Moon hides the Sun", "Space"),
    ("LUNAR", "Relating to the Moon", "Space"),
    ("TELESCOPE", "Stargazer's instrument", "Space"),
    ("GRAVITY", "Force that keeps us grounded", "Space"),
    ("STAR", "Sun, for example", "Space"),
    // Ocean
    ("CORAL", "Reef builder", "Ocean"),
    ("TIDE", "Rise and fall of the sea", "Ocean"),
    ("WHALE", "Largest animal on Earth", "Ocean"),
    ("OYSTER", "Pearl maker", "Ocean"),
    ("LAGOON", "Shallow water cut off by a reef", "Ocean"),
    ("DOLPHIN", "Playful marine mammal", "Ocean"),
    ("ANCHOR", "It keeps a ship in place", "Ocean"),
    ("HARBOR", "Safe place for boats", "Ocean"),
    ("SALT", "What makes seawater briny", "Ocean"),
    ("SQUID", "Ten-armed swimmer", "Ocean"),
    ("ISLAND", "Land surrounded by water", "Ocean"),
    ("CURRENT", "Flow within the sea", "Ocean"),
    ("SEAWEED", "Kelp, for one", "Ocean"),
    ("WAVE", "Surfer's ride", "Ocean"),
    // Music
    ("MELODY", "Tune", "Music"),
    ("RHYTHM", "Beat pattern", "Music"),
    ("PIANO", "Instrument with 88 keys", "Music"),
    ("GUITAR", "Six-stringed instrument", "Music"),
    ("TEMPO", "Speed of a piece", "Music"),
    ("CHORD", "Three or more notes together", "Music"),
    ("OPERA", "Sung drama", "Music"),
    ("VIOLIN", "Fiddle", "Music"),
    ("TRUMPET", "Brass instrument with valves", "Music"),
    ("ENCORE", "Extra song after the show", "Music"),
    ("LYRICS", "Words of a song", "Music"),
    ("CHOIR", "Group of singers", "Music"),
    ("DRUM", "Percussion instrument", "Music"),
    ("NOTE", "Single musical sound", "Music"),
    // Nature
    ("FOREST", "Land covered by trees", "Nature"),
    ("RIVER", "Flowing body of water", "Nature"),
    ("MEADOW", "Grassy field", "Nature"),
    ("CANYON", "Deep gorge", "Nature"),
    ("GLACIER", "Slow river of ice", "Nature"),
    ("VOLCANO", "Mountain that may erupt", "Nature"),
    ("DESERT", "Dry, sandy region", "Nature"),
    ("TUNDRA", "Treeless arctic plain", "Nature"),
    ("WILLOW", "Weeping tree", "Nature"),
    ("ACORN", "Oak seed", "Nature"),
    ("MAPLE", "Tree with syrupy sap", "Nature"),
    ("STREAM", "Small river", "Nature"),
    ("PEBBLE", "Small smooth stone", "Nature"),
    ("FERN", "Plant with fronds", "Nature"),
    // Food
    ("BREAD", "Baker's loaf", "Food"),
    ("CHEESE", "Cheddar or brie", "Food"),
    ("PASTA", "Spaghetti or penne", "Food"),
    ("TOMATO", "Red fruit often mistaken for a vegetable", "Food"),
    ("LEMON", "Sour yellow citrus", "Food"),
    ("HONEY", "Sweet product of bees", "Food"),
    ("OLIVE", "Fruit pressed for oil", "Food"),
    ("PEPPER", "Salt's partner", "Food"),
    ("NOODLE", "Ramen strand", "Food"),
    ("BUTTER", "Spread churned from cream", "Food"),
    ("CARROT", "Orange root vegetable", "Food"),
    ("MANGO", "Tropical stone fruit", "Food"),
    ("GARLIC", "Pungent bulb", "Food"),
    ("RICE", "Staple grain", "Food"),
];

/// Built-in solution words hidden in the grid
const BUILTIN_SOLUTION_WORDS: &[&str] = &[
    "STAR", "OCEAN", "MUSIC", "EARTH", "TRAIL", "SOLAR", "CORNER", "PLANET", "MELON", "STONE",
    "RAINBOW", "LANTERN",
];

/// A validated word pool together with its solution-word list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordPool {
    #[serde(rename = "words")]
    entries: Vec<WordEntry>,
    solution_words: Vec<String>,
}

impl WordPool {
    /// Build a pool, normalising answers to uppercase and validating them
    pub fn new(entries: Vec<WordEntry>, solution_words: Vec<String>) -> Result<Self, PoolError> {
        if entries.is_empty() {
            return Err(PoolError::EmptyPool);
        }
        if solution_words.is_empty() {
            return Err(PoolError::NoSolutionWords);
        }

        let entries = entries
            .into_iter()
            .map(|mut e| {
                e.word = normalize(&e.word)?;
                Ok(e)
            })
            .collect::<Result<Vec<_>, PoolError>>()?;
        let solution_words = solution_words
            .iter()
            .map(|w| normalize(w))
            .collect::<Result<Vec<_>, PoolError>>()?;

        Ok(Self {
            entries,
            solution_words,
        })
    }

    /// The pool shipped with the crate
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_WORDS
                .iter()
                .map(|&(word, clue, category)| WordEntry::new(word, clue, category))
                .collect(),
            solution_words: BUILTIN_SOLUTION_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Parse a pool from JSON of the form
    /// `{"words": [{"word", "clue", "category"}], "solution_words": [..]}`
    pub fn from_json(json: &str) -> Result<Self, PoolError> {
        let raw: WordPool = serde_json::from_str(json)?;
        Self::new(raw.entries, raw.solution_words)
    }

    /// Load a JSON pool from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PoolError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn solution_words(&self) -> &[String] {
        &self.solution_words
    }

    /// Distinct categories, sorted
    pub fn categories(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self.entries.iter().map(|e| e.category.as_str()).collect();
        set.into_iter().collect()
    }

    /// A pool restricted to one category (case-insensitive)
    pub fn filter_category(&self, category: &str) -> Result<Self, PoolError> {
        let entries: Vec<WordEntry> = self
            .entries
            .iter()
            .filter(|e| e.category.eq_ignore_ascii_case(category))
            .cloned()
            .collect();
        if entries.is_empty() {
            return Err(PoolError::UnknownCategory(category.to_string()));
        }
        Ok(Self {
            entries,
            solution_words: self.solution_words.clone(),
        })
    }
}

impl Default for WordPool {
    fn default() -> Self {
        Self::builtin()
    }
}

fn normalize(word: &str) -> Result<String, PoolError> {
    let word = word.trim().to_ascii_uppercase();
    let invalid = |reason| PoolError::InvalidWord {
        word: word.clone(),
        reason,
    };

    if !word.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(invalid("only the letters A-Z are allowed"));
    }
    if word.len() < MIN_WORD_LEN {
        return Err(invalid("too short"));
    }
    if word.len() > GRID_SIZE {
        return Err(invalid("longer than the grid"));
    }
    Ok(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_pool_is_valid() {
        let pool = WordPool::builtin();
        let rebuilt = WordPool::new(pool.entries().to_vec(), pool.solution_words().to_vec()).unwrap();
        assert_eq!(rebuilt, pool);
        assert_eq!(pool.categories(), vec!["Food", "Music", "Nature", "Ocean", "Space"]);
    }

    #[test]
    fn test_from_json_normalises_words() {
        let json = r#"{
            "words": [
                {"word": "comet", "clue": "Icy visitor", "category": "Space"},
                {"word": "Orbit", "clue": "Path", "category": "Space"}
            ],
            "solution_words": ["star"]
        }"#;
        let pool = WordPool::from_json(json).unwrap();
        assert_eq!(pool.entries()[0].word, "COMET");
        assert_eq!(pool.entries()[1].word, "ORBIT");
        assert_eq!(pool.solution_words(), &["STAR".to_string()]);
    }

    #[test]
    fn test_category_defaults_to_empty() {
        let json = r#"{"words": [{"word": "moon", "clue": "Satellite"}], "solution_words": ["mo"]}"#;
        let pool = WordPool::from_json(json).unwrap();
        assert_eq!(pool.entries()[0].category, "");
    }

    #[test]
    fn test_invalid_pools_rejected() {
        assert!(matches!(
            WordPool::new(vec![], vec!["STAR".into()]),
            Err(PoolError::EmptyPool)
        ));
        assert!(matches!(
            WordPool::new(vec![WordEntry::new("moon", "", "")], vec![]),
            Err(PoolError::NoSolutionWords)
        ));
        assert!(matches!(
            WordPool::new(vec![WordEntry::new("sea-side", "", "")], vec!["SEA".into()]),
            Err(PoolError::InvalidWord { .. })
        ));
        assert!(matches!(
            WordPool::new(
                vec![WordEntry::new("incomprehensibilities", "", "")],
                vec!["SEA".into()]
            ),
            Err(PoolError::InvalidWord { .. })
        ));
        assert!(matches!(WordPool::from_json("not json"), Err(PoolError::Json(_))));
    }

    #[test]
    fn test_filter_category() {
        let pool = WordPool::builtin();
        let ocean = pool.filter_category("ocean").unwrap();
        assert!(ocean.entries().iter().all(|e| e.category == "Ocean"));
        assert!(matches!(
            pool.filter_category("Sports"),
            Err(PoolError::UnknownCategory(_))
        ));
    }
}
