//! Typewriter text animation
//!
//! A timed state machine. It never sleeps or reads a clock: after every change
//! it exposes at most one `Pending` step with a delay, and the host calls
//! `advance()` when that delay has elapsed. Rescheduling bumps `generation()`
//! so the host can tell a stale timer from a live one.

pub mod cursor;

pub use cursor::{CursorBlink, blink_opacity};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::settings::TypewriterSettings;

/// What the animator is waiting to do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Typing,
    PausingBeforeDelete,
    Deleting,
    PausingBeforeAdvance,
    /// Nothing scheduled (stopped, hidden, or finished)
    Idle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Append the next character
    Reveal,
    /// Switch to deleting
    StartDeleting,
    /// Remove the last character
    Erase,
    /// Clear and move to the next sentence
    Advance,
}

/// The one scheduled step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pending {
    pub step: Step,
    pub delay_ms: f64,
}

/// A finished sentence, in its original (unreversed) form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceComplete {
    pub sentence: String,
    pub index: usize,
}

pub struct Typewriter {
    settings: TypewriterSettings,
    sentences: Vec<String>,
    /// Current sentence as typed (reversed in reverse mode)
    current: Vec<char>,
    displayed: String,
    char_index: usize,
    text_index: usize,
    deleting: bool,
    running: bool,
    visible: bool,
    /// Completion already reported for this pass of the sentence
    reported: bool,
    phase: Phase,
    pending: Option<Pending>,
    generation: u64,
    completions: Vec<SentenceComplete>,
    rng: Pcg32,
}

impl Typewriter {
    pub fn new(settings: TypewriterSettings, seed: u64) -> Self {
        let gated = settings.start_on_visible;
        let mut typewriter = Self {
            sentences: settings.text.to_vec(),
            settings,
            current: Vec::new(),
            displayed: String::new(),
            char_index: 0,
            text_index: 0,
            deleting: false,
            running: !gated,
            visible: !gated,
            reported: false,
            phase: Phase::Idle,
            pending: None,
            generation: 0,
            completions: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        };
        typewriter.load_current();
        typewriter.settle();
        typewriter
    }

    pub fn settings(&self) -> &TypewriterSettings {
        &self.settings
    }

    pub fn displayed(&self) -> &str {
        &self.displayed
    }

    pub fn text_index(&self) -> usize {
        self.text_index
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn pending(&self) -> Option<Pending> {
        self.pending
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Take the sentences finished since the last call
    pub fn drain_completions(&mut self) -> Vec<SentenceComplete> {
        std::mem::take(&mut self.completions)
    }

    /// Color for the current sentence, cycling through `text_colors`
    pub fn color(&self) -> Option<&str> {
        let colors = &self.settings.text_colors;
        if colors.is_empty() {
            return None;
        }
        Some(colors[self.text_index % colors.len()].as_str())
    }

    /// Whether the cursor should be hidden right now
    pub fn cursor_hidden(&self) -> bool {
        self.settings.show_cursor
            && self.settings.hide_cursor_while_typing
            && (self.char_index < self.current.len() || self.deleting)
    }

    pub fn start(&mut self) {
        self.set_running(true);
    }

    pub fn stop(&mut self) {
        self.set_running(false);
    }

    /// Stop and discard all progress, back to the first sentence
    pub fn reset(&mut self) {
        self.running = false;
        self.displayed.clear();
        self.char_index = 0;
        self.deleting = false;
        self.text_index = 0;
        self.reported = false;
        self.load_current();
        self.settle();
    }

    /// Feed an intersection change. Returns whether the host should keep
    /// observing.
    pub fn on_visibility(&mut self, intersecting: bool) -> bool {
        if intersecting {
            if !self.visible || !self.running {
                self.visible = true;
                self.running = true;
                self.settle();
            }
            return !self.settings.start_once;
        }
        if self.settings.pause_on_hidden {
            self.set_running(false);
        }
        true
    }

    /// Perform the pending step. Returns false if nothing was scheduled.
    pub fn advance(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };
        match pending.step {
            Step::Reveal => {
                if let Some(&c) = self.current.get(self.char_index) {
                    self.displayed.push(c);
                }
                self.char_index += 1;
            }
            Step::StartDeleting => self.deleting = true,
            Step::Erase => {
                self.displayed.pop();
            }
            Step::Advance => {
                self.deleting = false;
                self.char_index = 0;
                self.displayed.clear();
                self.text_index = (self.text_index + 1) % self.sentences.len();
                self.reported = false;
                self.load_current();
            }
        }
        self.settle();
        true
    }

    fn set_running(&mut self, running: bool) {
        if self.running != running {
            self.running = running;
            self.settle();
        }
    }

    fn load_current(&mut self) {
        let sentence = self.sentences.get(self.text_index).map(String::as_str).unwrap_or("");
        self.current = if self.settings.reverse_mode {
            sentence.chars().rev().collect()
        } else {
            sentence.chars().collect()
        };
    }

    fn char_delay(&mut self) -> f64 {
        match self.settings.variable_speed {
            Some(range) => range.min + self.rng.random::<f64>() * (range.max - range.min),
            None => self.settings.typing_speed,
        }
    }

    fn schedule(&mut self, step: Step, delay_ms: f64, phase: Phase) {
        self.pending = Some(Pending {
            step,
            delay_ms: delay_ms.max(0.0),
        });
        self.phase = phase;
    }

    fn finish(&mut self) {
        self.running = false;
        self.phase = Phase::Idle;
        log::debug!("typewriter finished at sentence {}", self.text_index);
    }

    fn report_completion(&mut self) {
        if self.reported {
            return;
        }
        self.reported = true;
        self.completions.push(SentenceComplete {
            sentence: self.sentences[self.text_index].clone(),
            index: self.text_index,
        });
    }

    /// Recompute the next step from the current progress
    fn settle(&mut self) {
        self.pending = None;
        self.phase = Phase::Idle;
        self.generation += 1;

        if self.sentences.is_empty() || !self.running || !self.visible {
            return;
        }
        let pause = self.settings.pause_duration;

        if self.deleting {
            if !self.displayed.is_empty() {
                self.schedule(Step::Erase, self.settings.deleting_speed, Phase::Deleting);
                return;
            }
            let last = self.text_index + 1 == self.sentences.len();
            self.report_completion();
            if last && !self.settings.looping {
                self.finish();
            } else {
                self.schedule(Step::Advance, pause, Phase::PausingBeforeAdvance);
            }
            return;
        }

        if self.char_index < self.current.len() {
            let mut delay = self.char_delay();
            if self.char_index == 0 && self.displayed.is_empty() {
                delay += self.settings.initial_delay;
            }
            self.schedule(Step::Reveal, delay, Phase::Typing);
        } else if self.sentences.len() > 1 {
            self.schedule(Step::StartDeleting, pause, Phase::PausingBeforeDelete);
        } else if !self.settings.looping {
            self.report_completion();
            self.finish();
        } else {
            self.report_completion();
            self.schedule(Step::Advance, pause, Phase::PausingBeforeAdvance);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{SpeedRange, TextSource};

    fn settings(text: &[&str], looping: bool) -> TypewriterSettings {
        TypewriterSettings {
            looping,
            ..TypewriterSettings::with_text(text.iter().copied())
        }
    }

    /// Advance until nothing is pending or `max` steps ran
    fn run(tw: &mut Typewriter, max: usize) -> usize {
        let mut steps = 0;
        while steps < max && tw.advance() {
            steps += 1;
        }
        steps
    }

    #[test]
    fn test_single_sentence_no_loop() {
        let mut tw = Typewriter::new(settings(&["AB"], false), 1);
        assert_eq!(
            tw.pending(),
            Some(Pending {
                step: Step::Reveal,
                delay_ms: 50.0
            })
        );

        assert!(tw.advance());
        assert_eq!(tw.displayed(), "A");
        assert!(tw.drain_completions().is_empty());

        assert!(tw.advance());
        assert_eq!(tw.displayed(), "AB");
        assert_eq!(
            tw.drain_completions(),
            vec![SentenceComplete {
                sentence: "AB".to_string(),
                index: 0
            }]
        );
        assert!(!tw.is_running());
        assert_eq!(tw.pending(), None);
        assert_eq!(tw.phase(), Phase::Idle);
        assert!(!tw.advance());
    }

    #[test]
    fn test_restart_after_finish_does_not_report_twice() {
        let mut tw = Typewriter::new(settings(&["AB"], false), 1);
        run(&mut tw, 10);
        assert_eq!(tw.drain_completions().len(), 1);

        tw.start();
        assert!(!tw.is_running());
        assert!(tw.drain_completions().is_empty());
    }

    #[test]
    fn test_reverse_mode_types_backwards() {
        let s = TypewriterSettings {
            reverse_mode: true,
            ..settings(&["AB"], false)
        };
        let mut tw = Typewriter::new(s, 1);
        run(&mut tw, 10);
        assert_eq!(tw.displayed(), "BA");
        // Completion reports the sentence as written
        assert_eq!(tw.drain_completions()[0].sentence, "AB");
    }

    #[test]
    fn test_multi_sentence_cycle() {
        let mut tw = Typewriter::new(settings(&["hi", "yo"], true), 1);
        run(&mut tw, 2);
        assert_eq!(tw.displayed(), "hi");
        assert_eq!(tw.phase(), Phase::PausingBeforeDelete);
        assert_eq!(tw.pending().map(|p| p.delay_ms), Some(2000.0));

        tw.advance();
        assert_eq!(tw.phase(), Phase::Deleting);
        assert_eq!(tw.pending().map(|p| p.delay_ms), Some(30.0));
        run(&mut tw, 2);
        assert_eq!(tw.displayed(), "");
        assert_eq!(tw.phase(), Phase::PausingBeforeAdvance);
        assert_eq!(
            tw.drain_completions(),
            vec![SentenceComplete {
                sentence: "hi".to_string(),
                index: 0
            }]
        );

        tw.advance();
        assert_eq!(tw.text_index(), 1);
        run(&mut tw, 2);
        assert_eq!(tw.displayed(), "yo");

        // Delete "yo" and wrap back to the first sentence
        run(&mut tw, 4);
        assert_eq!(tw.text_index(), 0);
        assert_eq!(tw.drain_completions()[0].index, 1);
    }

    #[test]
    fn test_multi_sentence_without_loop_stops_after_last() {
        let mut tw = Typewriter::new(settings(&["a", "b"], false), 1);
        let steps = run(&mut tw, 100);
        assert!(steps < 100);
        assert!(!tw.is_running());
        assert_eq!(tw.text_index(), 1);
        assert_eq!(tw.displayed(), "");
        let indexes: Vec<usize> = tw.drain_completions().iter().map(|c| c.index).collect();
        assert_eq!(indexes, vec![0, 1]);
    }

    #[test]
    fn test_single_sentence_loop_retypes() {
        let mut tw = Typewriter::new(settings(&["ok"], true), 1);
        run(&mut tw, 2);
        assert_eq!(tw.phase(), Phase::PausingBeforeAdvance);
        assert_eq!(tw.drain_completions().len(), 1);

        tw.advance();
        assert_eq!(tw.displayed(), "");
        assert_eq!(tw.phase(), Phase::Typing);
        run(&mut tw, 2);
        assert_eq!(tw.displayed(), "ok");
        assert_eq!(tw.drain_completions().len(), 1);
    }

    #[test]
    fn test_initial_delay_only_on_first_character() {
        let s = TypewriterSettings {
            initial_delay: 500.0,
            ..settings(&["ab"], false)
        };
        let mut tw = Typewriter::new(s, 1);
        assert_eq!(tw.pending().map(|p| p.delay_ms), Some(550.0));
        tw.advance();
        assert_eq!(tw.pending().map(|p| p.delay_ms), Some(50.0));
    }

    #[test]
    fn test_variable_speed_within_range() {
        let s = TypewriterSettings {
            variable_speed: Some(SpeedRange { min: 20.0, max: 80.0 }),
            ..settings(&["abcdefghijklmnop"], false)
        };
        let mut tw = Typewriter::new(s, 42);
        while let Some(p) = tw.pending() {
            if p.step == Step::Reveal {
                assert!(p.delay_ms >= 20.0 && p.delay_ms < 80.0, "{}", p.delay_ms);
            }
            tw.advance();
        }
    }

    #[test]
    fn test_stop_start_reset() {
        let mut tw = Typewriter::new(settings(&["abc"], false), 1);
        tw.advance();
        let gen_before = tw.generation();

        tw.stop();
        assert_eq!(tw.pending(), None);
        assert!(tw.generation() > gen_before);
        assert!(!tw.advance());

        tw.start();
        tw.advance();
        assert_eq!(tw.displayed(), "ab");

        tw.reset();
        assert!(!tw.is_running());
        assert_eq!(tw.displayed(), "");
        assert_eq!(tw.text_index(), 0);
        assert_eq!(tw.pending(), None);

        tw.start();
        run(&mut tw, 10);
        assert_eq!(tw.displayed(), "abc");
    }

    #[test]
    fn test_start_on_visible_waits_for_intersection() {
        let s = TypewriterSettings {
            start_on_visible: true,
            ..settings(&["a"], false)
        };
        let mut tw = Typewriter::new(s, 1);
        assert!(!tw.is_running());
        assert_eq!(tw.pending(), None);

        // start() alone does not bypass the visibility gate
        tw.start();
        assert_eq!(tw.pending(), None);

        let keep_observing = tw.on_visibility(true);
        assert!(!keep_observing);
        assert!(tw.pending().is_some());
    }

    #[test]
    fn test_pause_on_hidden_retriggers() {
        let s = TypewriterSettings {
            start_on_visible: true,
            pause_on_hidden: true,
            start_once: false,
            ..settings(&["abc"], false)
        };
        let mut tw = Typewriter::new(s, 1);
        assert!(tw.on_visibility(true));
        tw.advance();

        assert!(tw.on_visibility(false));
        assert!(!tw.is_running());
        assert_eq!(tw.pending(), None);

        assert!(tw.on_visibility(true));
        run(&mut tw, 10);
        assert_eq!(tw.displayed(), "abc");
    }

    #[test]
    fn test_empty_text_never_schedules() {
        let s = TypewriterSettings {
            text: TextSource::Many(Vec::new()),
            ..Default::default()
        };
        let mut tw = Typewriter::new(s, 1);
        assert_eq!(tw.pending(), None);
        assert!(!tw.advance());
    }

    #[test]
    fn test_cursor_hidden_while_typing() {
        let s = TypewriterSettings {
            hide_cursor_while_typing: true,
            ..settings(&["ab"], false)
        };
        let mut tw = Typewriter::new(s, 1);
        assert!(tw.cursor_hidden());
        run(&mut tw, 10);
        assert!(!tw.cursor_hidden());
    }

    #[test]
    fn test_colors_cycle_per_sentence() {
        let s = TypewriterSettings {
            text_colors: vec!["red".to_string(), "blue".to_string()],
            ..settings(&["a", "b", "c"], true)
        };
        let mut tw = Typewriter::new(s, 1);
        assert_eq!(tw.color(), Some("red"));
        // type, pause, erase, advance
        run(&mut tw, 4);
        assert_eq!(tw.text_index(), 1);
        assert_eq!(tw.color(), Some("blue"));
    }
}
