//! Typing effect: reveal a phrase one character at a time, hold, erase it,
//! hold, move on to the next phrase.
//!
//! The whole behavior is one transition function, [`Typewriter::advance`],
//! over an explicit [`Direction`]. The caller owns the clock and re-arms a
//! timer with the delay each transition returns.

use crate::api::config::TypewriterConfig;
use crate::api::error::{Result, SessionError};

/// Which way the cursor is moving through the current phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Growing,
    Shrinking,
}

/// Result of one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Milliseconds until the next transition should run.
    pub delay_ms: u32,
    /// Whether the displayed text changed.
    pub changed: bool,
}

/// Phrase cycler state.
#[derive(Debug, Clone)]
pub struct Typewriter {
    phrases: Vec<String>,
    phrase_index: usize,
    char_index: usize,
    direction: Direction,
    type_ms: u32,
    delete_ms: u32,
    pause_full_ms: u32,
    pause_empty_ms: u32,
}

impl Typewriter {
    /// Start at the first phrase with nothing shown. Fails on an empty phrase list.
    pub fn new(config: &TypewriterConfig) -> Result<Self> {
        if config.phrases.is_empty() {
            return Err(SessionError::EmptyPhrases);
        }
        Ok(Self {
            phrases: config.phrases.clone(),
            phrase_index: 0,
            char_index: 0,
            direction: Direction::Growing,
            type_ms: config.type_ms,
            delete_ms: config.delete_ms,
            pause_full_ms: config.pause_full_ms,
            pause_empty_ms: config.pause_empty_ms,
        })
    }

    /// Delay before the first transition after start.
    pub fn initial_delay_ms(&self) -> u32 {
        self.type_ms
    }

    pub fn phrase_index(&self) -> usize {
        self.phrase_index
    }

    pub fn char_index(&self) -> usize {
        self.char_index
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn phrase_count(&self) -> usize {
        self.phrases.len()
    }

    /// The phrase currently being typed or erased.
    pub fn current_phrase(&self) -> &str {
        &self.phrases[self.phrase_index]
    }

    /// The visible prefix: the first `char_index` characters of the current phrase.
    pub fn text(&self) -> &str {
        let phrase = self.current_phrase();
        match phrase.char_indices().nth(self.char_index) {
            Some((byte, _)) => &phrase[..byte],
            None => phrase,
        }
    }

    fn phrase_len(&self) -> usize {
        self.current_phrase().chars().count()
    }

    /// Run one transition of the state machine.
    pub fn advance(&mut self) -> Tick {
        let len = self.phrase_len();
        match self.direction {
            Direction::Growing if self.char_index < len => {
                self.char_index += 1;
                Tick { delay_ms: self.type_ms, changed: true }
            }
            Direction::Growing => {
                self.direction = Direction::Shrinking;
                Tick { delay_ms: self.pause_full_ms, changed: false }
            }
            Direction::Shrinking if self.char_index > 0 => {
                self.char_index -= 1;
                Tick { delay_ms: self.delete_ms, changed: true }
            }
            Direction::Shrinking => {
                self.direction = Direction::Growing;
                self.phrase_index = (self.phrase_index + 1) % self.phrases.len();
                Tick { delay_ms: self.pause_empty_ms, changed: false }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(phrases: &[&str]) -> TypewriterConfig {
        TypewriterConfig {
            phrases: phrases.iter().map(|p| p.to_string()).collect(),
            ..Default::default()
        }
    }

    /// Displayed text after every transition, plus the delay that followed it.
    fn run(tw: &mut Typewriter, n: usize) -> Vec<(String, u32)> {
        (0..n)
            .map(|_| {
                let tick = tw.advance();
                (tw.text().to_string(), tick.delay_ms)
            })
            .collect()
    }

    #[test]
    fn empty_phrase_list_fails_fast() {
        assert!(matches!(Typewriter::new(&config(&[])), Err(SessionError::EmptyPhrases)));
    }

    #[test]
    fn hi_go_scenario() {
        let mut tw = Typewriter::new(&config(&["Hi", "Go"])).unwrap();
        assert_eq!(tw.text(), "");
        assert_eq!(tw.initial_delay_ms(), 80);

        let steps = run(&mut tw, 9);
        let expected: Vec<(String, u32)> = [
            ("H", 80),
            ("Hi", 80),
            ("Hi", 3000), // hold full
            ("H", 30),
            ("", 30),
            ("", 500), // hold empty, next phrase
            ("G", 80),
            ("Go", 80),
            ("Go", 3000),
        ]
        .iter()
        .map(|(s, d)| (s.to_string(), *d))
        .collect();
        assert_eq!(steps, expected);
        assert_eq!(tw.phrase_index(), 1);
        assert_eq!(tw.direction(), Direction::Shrinking);
    }

    #[test]
    fn text_length_tracks_char_index() {
        let mut tw = Typewriter::new(&config(&["Cloud Architect", "AI/ML Engineer"])).unwrap();
        for _ in 0..500 {
            let tick = tw.advance();
            assert_eq!(tw.text().chars().count(), tw.char_index());
            assert!(tw.char_index() <= tw.current_phrase().chars().count());
            assert_eq!(tick.changed, tick.delay_ms == 80 || tick.delay_ms == 30);
        }
    }

    #[test]
    fn one_full_cycle_moves_to_next_phrase() {
        let mut tw = Typewriter::new(&config(&["abc", "de", "f"])).unwrap();
        // 3 reveals, hold, 3 erases, hold
        for _ in 0..8 {
            tw.advance();
        }
        assert_eq!(tw.phrase_index(), 1);
        assert_eq!(tw.char_index(), 0);
        assert_eq!(tw.direction(), Direction::Growing);
    }

    #[test]
    fn cycling_all_phrases_returns_to_first() {
        let phrases = ["abc", "de", "f"];
        let mut tw = Typewriter::new(&config(&phrases)).unwrap();
        let transitions: usize = phrases.iter().map(|p| 2 * p.len() + 2).sum();
        for _ in 0..transitions {
            tw.advance();
        }
        assert_eq!(tw.phrase_index(), 0);
        assert_eq!(tw.char_index(), 0);
        assert_eq!(tw.direction(), Direction::Growing);
    }

    #[test]
    fn empty_phrase_is_skipped_after_pauses() {
        let mut tw = Typewriter::new(&config(&["", "x"])).unwrap();
        assert_eq!(tw.advance(), Tick { delay_ms: 3000, changed: false });
        assert_eq!(tw.advance(), Tick { delay_ms: 500, changed: false });
        assert_eq!(tw.phrase_index(), 1);
        tw.advance();
        assert_eq!(tw.text(), "x");
    }

    #[test]
    fn multibyte_phrases_slice_on_char_boundaries() {
        let mut tw = Typewriter::new(&config(&["héllo ✨"])).unwrap();
        let mut seen = Vec::new();
        for _ in 0..7 {
            tw.advance();
            seen.push(tw.text().to_string());
        }
        assert_eq!(seen[1], "hé");
        assert_eq!(seen[6], "héllo ✨");
    }
}
