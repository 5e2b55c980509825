use std::collections::{HashMap, HashSet};

use crate::gameplay::note::{ActiveNote, Rating};

/// A vocabulary word earned by hitting its note.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectedWord {
    pub word: String,
    pub pitch: String,
    pub quality: Rating,
    pub collected_at_ms: f64,
}

/// Hit-quality tally for one word across the session.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WordStats {
    pub perfect: u32,
    pub good: u32,
    pub ok: u32,
}

impl WordStats {
    /// 0..1, weighting perfect 3, good 2, ok 1.
    pub fn average_quality(&self) -> f32 {
        let total = self.perfect + self.good + self.ok;
        if total == 0 {
            return 0.0;
        }
        (self.perfect * 3 + self.good * 2 + self.ok) as f32 / (total * 3) as f32
    }
}

/// Records vocabulary words collected by successful hits. A word is
/// collected once per session (first hit wins); later hits on the
/// same word still feed its quality stats.
#[derive(Default)]
pub struct WordTracker {
    collected: Vec<CollectedWord>,
    seen: HashSet<String>,
    stats: HashMap<String, WordStats>,
}

impl WordTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the collection when this hit earned a new word.
    pub fn process_hit(&mut self, note: &ActiveNote, rating: Rating) -> Option<CollectedWord> {
        if !rating.is_hit() || !note.has_word() {
            return None;
        }
        let word = note.word.clone()?;

        let stats = self.stats.entry(word.clone()).or_default();
        match rating {
            Rating::Perfect => stats.perfect += 1,
            Rating::Good => stats.good += 1,
            Rating::Ok => stats.ok += 1,
            Rating::Miss => {}
        }

        if !self.seen.insert(word.clone()) {
            return None;
        }
        let collected = CollectedWord {
            word,
            pitch: note.pitch.clone(),
            quality: rating,
            collected_at_ms: note.hit_time_ms.unwrap_or(note.target_time_ms),
        };
        self.collected.push(collected.clone());
        Some(collected)
    }

    pub fn collected(&self) -> &[CollectedWord] {
        &self.collected
    }

    pub fn stats_for(&self, word: &str) -> Option<WordStats> {
        self.stats.get(word).copied()
    }

    pub fn words(&self) -> Vec<String> {
        self.collected.iter().map(|c| c.word.clone()).collect()
    }
}
