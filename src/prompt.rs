//! Interactive selection prompt driven by the keymap
//!
//! A query line filters a list of candidates; keys dispatched through the
//! keymap edit the query, move the selection and finish the session.

use std::collections::BTreeSet;
use std::time::Duration;

use unicode_width::UnicodeWidthChar;

use crate::keymap::{ActionContext, KeyChord, Primitive, StatusSink};
use crate::status::StatusLine;

/// Candidates moved by one page scroll
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// How a prompt session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exit {
    /// Finished with an exit status and the chosen candidates
    Finished { code: i32, selection: Vec<String> },
    /// Aborted without a selection
    Cancelled,
}

/// Query, candidate list and selection state
#[derive(Debug, Clone)]
pub struct Prompt {
    query: Vec<char>,
    /// Caret position in chars, `0..=query.len()`
    caret: usize,
    candidates: Vec<String>,
    /// Index into the filtered candidates
    selected: usize,
    /// Marked candidates, as indices into `candidates`
    marked: BTreeSet<usize>,
    page_size: usize,
    pub status: StatusLine,
    exit: Option<Exit>,
}

impl Prompt {
    pub fn new(candidates: Vec<String>) -> Self {
        Self {
            query: Vec::new(),
            caret: 0,
            candidates,
            selected: 0,
            marked: BTreeSet::new(),
            page_size: DEFAULT_PAGE_SIZE,
            status: StatusLine::new(),
            exit: None,
        }
    }

    /// Set the page scroll size (builder pattern)
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn query(&self) -> String {
        self.query.iter().collect()
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Terminal columns taken by the query text before the caret
    pub fn caret_column(&self) -> usize {
        self.query[..self.caret]
            .iter()
            .map(|c| c.width().unwrap_or(0))
            .sum()
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Indices of candidates containing the query, ignoring case
    pub fn matches(&self) -> Vec<usize> {
        let needle = self.query().to_lowercase();
        self.candidates
            .iter()
            .enumerate()
            .filter(|(_, c)| c.to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect()
    }

    /// Position of the selection within [`matches`](Self::matches)
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// The candidate under the selection, if any match
    pub fn current(&self) -> Option<&str> {
        self.current_index().map(|i| self.candidates[i].as_str())
    }

    pub fn is_marked(&self, index: usize) -> bool {
        self.marked.contains(&index)
    }

    pub fn exit(&self) -> Option<&Exit> {
        self.exit.as_ref()
    }

    pub fn is_done(&self) -> bool {
        self.exit.is_some()
    }

    fn current_index(&self) -> Option<usize> {
        self.matches().get(self.selected).copied()
    }

    fn move_selection(&mut self, delta: isize) {
        let count = self.matches().len();
        if count == 0 {
            self.selected = 0;
            return;
        }
        let target = self.selected as isize + delta;
        self.selected = target.clamp(0, count as isize - 1) as usize;
    }

    /// Keep the selection inside the filtered list after the query changes
    fn refilter(&mut self) {
        let count = self.matches().len();
        if self.selected >= count {
            self.selected = count.saturating_sub(1);
        }
    }

    fn toggle_mark(&mut self) {
        if let Some(index) = self.current_index() {
            if !self.marked.remove(&index) {
                self.marked.insert(index);
            }
        }
    }

    fn insert_char(&mut self, c: char) {
        self.query.insert(self.caret, c);
        self.caret += 1;
        self.refilter();
    }

    fn word_end_after(&self, from: usize) -> usize {
        let mut pos = from;
        while pos < self.query.len() && !is_word_char(self.query[pos]) {
            pos += 1;
        }
        while pos < self.query.len() && is_word_char(self.query[pos]) {
            pos += 1;
        }
        pos
    }

    fn word_start_before(&self, from: usize) -> usize {
        let mut pos = from;
        while pos > 0 && !is_word_char(self.query[pos - 1]) {
            pos -= 1;
        }
        while pos > 0 && is_word_char(self.query[pos - 1]) {
            pos -= 1;
        }
        pos
    }

    /// Chosen candidates: the marked ones, or else the current one
    fn selection(&self) -> Vec<String> {
        if self.marked.is_empty() {
            self.current().map(str::to_string).into_iter().collect()
        } else {
            self.marked
                .iter()
                .map(|&i| self.candidates[i].clone())
                .collect()
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl StatusSink for Prompt {
    fn set_status(&mut self, text: &str, clear_after: Option<Duration>) {
        self.status.set_status(text, clear_after);
    }
}

impl ActionContext for Prompt {
    fn perform(&mut self, primitive: Primitive, chord: &KeyChord) {
        match primitive {
            Primitive::Noop => {}
            Primitive::AcceptChar => {
                if let Some(c) = chord.printable() {
                    self.insert_char(c);
                }
            }
            Primitive::Finish => self.finish(0),
            Primitive::Cancel => {
                tracing::debug!("Prompt cancelled");
                self.exit = Some(Exit::Cancelled);
            }

            // Query editing
            Primitive::ForwardChar => self.caret = (self.caret + 1).min(self.query.len()),
            Primitive::BackwardChar => self.caret = self.caret.saturating_sub(1),
            Primitive::ForwardWord => self.caret = self.word_end_after(self.caret),
            Primitive::BackwardWord => self.caret = self.word_start_before(self.caret),
            Primitive::BeginningOfLine => self.caret = 0,
            Primitive::EndOfLine => self.caret = self.query.len(),
            Primitive::DeleteForwardChar => {
                if self.caret < self.query.len() {
                    self.query.remove(self.caret);
                    self.refilter();
                }
            }
            Primitive::DeleteBackwardChar => {
                if self.caret > 0 {
                    self.caret -= 1;
                    self.query.remove(self.caret);
                    self.refilter();
                }
            }
            Primitive::DeleteBackwardWord => {
                let start = self.word_start_before(self.caret);
                self.query.drain(start..self.caret);
                self.caret = start;
                self.refilter();
            }
            Primitive::KillBeginningOfLine => {
                self.query.drain(..self.caret);
                self.caret = 0;
                self.refilter();
            }
            Primitive::KillEndOfLine => {
                self.query.truncate(self.caret);
                self.refilter();
            }

            // Selection
            Primitive::SelectUp => self.move_selection(-1),
            Primitive::SelectDown => self.move_selection(1),
            Primitive::ScrollPageUp => self.move_selection(-(self.page_size as isize)),
            Primitive::ScrollPageDown => self.move_selection(self.page_size as isize),
            Primitive::ToggleSelection => self.toggle_mark(),
            Primitive::ToggleSelectionAndSelectNext => {
                self.toggle_mark();
                self.move_selection(1);
            }
        }
    }

    fn finish(&mut self, code: i32) {
        let selection = self.selection();
        tracing::debug!(
            "Prompt finished with status {} ({} selected)",
            code,
            selection.len()
        );
        self.exit = Some(Exit::Finished { code, selection });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::{Action, ActionContext};

    fn prompt() -> Prompt {
        Prompt::new(vec![
            "apple".to_string(),
            "banana".to_string(),
            "cherry".to_string(),
            "apricot".to_string(),
        ])
    }

    fn type_str(p: &mut Prompt, text: &str) {
        for c in text.chars() {
            p.perform(Primitive::AcceptChar, &KeyChord::char(c));
        }
    }

    fn run(p: &mut Prompt, primitive: Primitive) {
        p.perform(primitive, &KeyChord::char(' '));
    }

    #[test]
    fn test_typing_filters_candidates() {
        let mut p = prompt();
        type_str(&mut p, "AP");
        assert_eq!(p.query(), "AP");
        assert_eq!(p.caret(), 2);
        assert_eq!(p.matches(), vec![0, 3]);
        assert_eq!(p.current(), Some("apple"));
    }

    #[test]
    fn test_non_printable_chord_not_inserted() {
        let mut p = prompt();
        p.perform(Primitive::AcceptChar, &KeyChord::ctrl('q'));
        p.perform(Primitive::AcceptChar, &KeyChord::alt('q'));
        assert_eq!(p.query(), "");
    }

    #[test]
    fn test_caret_movement_and_insertion() {
        let mut p = prompt();
        type_str(&mut p, "ac");
        run(&mut p, Primitive::BackwardChar);
        type_str(&mut p, "b");
        assert_eq!(p.query(), "abc");
        assert_eq!(p.caret(), 2);

        run(&mut p, Primitive::BeginningOfLine);
        assert_eq!(p.caret(), 0);
        run(&mut p, Primitive::BackwardChar);
        assert_eq!(p.caret(), 0);

        run(&mut p, Primitive::EndOfLine);
        run(&mut p, Primitive::ForwardChar);
        assert_eq!(p.caret(), 3);
    }

    #[test]
    fn test_caret_column_counts_display_width() {
        let mut p = prompt();
        type_str(&mut p, "a漢é");
        assert_eq!(p.caret(), 3);
        assert_eq!(p.caret_column(), 4);

        run(&mut p, Primitive::BackwardChar);
        assert_eq!(p.caret_column(), 3);
        run(&mut p, Primitive::BeginningOfLine);
        assert_eq!(p.caret_column(), 0);
    }

    #[test]
    fn test_word_movement() {
        let mut p = prompt();
        type_str(&mut p, "foo bar_baz  qux");
        run(&mut p, Primitive::BeginningOfLine);

        run(&mut p, Primitive::ForwardWord);
        assert_eq!(p.caret(), 3);
        run(&mut p, Primitive::ForwardWord);
        assert_eq!(p.caret(), 11);

        run(&mut p, Primitive::EndOfLine);
        run(&mut p, Primitive::BackwardWord);
        assert_eq!(p.caret(), 13);
        run(&mut p, Primitive::BackwardWord);
        assert_eq!(p.caret(), 4);
    }

    #[test]
    fn test_deletion() {
        let mut p = prompt();
        type_str(&mut p, "one two");
        run(&mut p, Primitive::DeleteBackwardWord);
        assert_eq!(p.query(), "one ");

        run(&mut p, Primitive::DeleteBackwardChar);
        assert_eq!(p.query(), "one");

        run(&mut p, Primitive::BeginningOfLine);
        run(&mut p, Primitive::DeleteForwardChar);
        assert_eq!(p.query(), "ne");
        assert_eq!(p.caret(), 0);

        run(&mut p, Primitive::DeleteBackwardChar);
        assert_eq!(p.query(), "ne");
    }

    #[test]
    fn test_kill_line() {
        let mut p = prompt();
        type_str(&mut p, "hello world");
        for _ in 0..5 {
            run(&mut p, Primitive::BackwardChar);
        }
        run(&mut p, Primitive::KillEndOfLine);
        assert_eq!(p.query(), "hello ");

        run(&mut p, Primitive::BackwardChar);
        run(&mut p, Primitive::KillBeginningOfLine);
        assert_eq!(p.query(), " ");
        assert_eq!(p.caret(), 0);
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut p = prompt();
        run(&mut p, Primitive::SelectUp);
        assert_eq!(p.selected(), 0);

        run(&mut p, Primitive::ScrollPageDown);
        assert_eq!(p.selected(), 3);
        assert_eq!(p.current(), Some("apricot"));

        run(&mut p, Primitive::SelectUp);
        assert_eq!(p.selected(), 2);
        run(&mut p, Primitive::ScrollPageUp);
        assert_eq!(p.selected(), 0);
    }

    #[test]
    fn test_selection_follows_filter() {
        let mut p = prompt();
        run(&mut p, Primitive::ScrollPageDown);
        type_str(&mut p, "an");
        assert_eq!(p.matches(), vec![1]);
        assert_eq!(p.selected(), 0);
        assert_eq!(p.current(), Some("banana"));

        type_str(&mut p, "zzz");
        assert_eq!(p.current(), None);
        run(&mut p, Primitive::SelectDown);
        assert_eq!(p.selected(), 0);
    }

    #[test]
    fn test_finish_with_current_candidate() {
        let mut p = prompt();
        run(&mut p, Primitive::SelectDown);
        run(&mut p, Primitive::Finish);
        assert_eq!(
            p.exit(),
            Some(&Exit::Finished {
                code: 0,
                selection: vec!["banana".to_string()],
            })
        );
    }

    #[test]
    fn test_finish_with_marked_candidates() {
        let mut p = prompt();
        run(&mut p, Primitive::ToggleSelectionAndSelectNext);
        run(&mut p, Primitive::SelectDown);
        run(&mut p, Primitive::ToggleSelection);
        assert!(p.is_marked(0));
        assert!(p.is_marked(2));

        Action::finish_with(4).execute(&mut p, &KeyChord::ctrl('q'));
        assert_eq!(
            p.exit(),
            Some(&Exit::Finished {
                code: 4,
                selection: vec!["apple".to_string(), "cherry".to_string()],
            })
        );
    }

    #[test]
    fn test_toggle_twice_unmarks() {
        let mut p = prompt();
        run(&mut p, Primitive::ToggleSelection);
        run(&mut p, Primitive::ToggleSelection);
        assert!(!p.is_marked(0));
    }

    #[test]
    fn test_finish_with_no_matches_selects_nothing() {
        let mut p = prompt();
        type_str(&mut p, "nothing matches");
        run(&mut p, Primitive::Finish);
        assert_eq!(
            p.exit(),
            Some(&Exit::Finished {
                code: 0,
                selection: vec![],
            })
        );
    }

    #[test]
    fn test_cancel() {
        let mut p = prompt();
        run(&mut p, Primitive::Cancel);
        assert!(p.is_done());
        assert_eq!(p.exit(), Some(&Exit::Cancelled));
    }

    #[test]
    fn test_status_feedback_reaches_status_line() {
        let mut p = prompt();
        p.set_status("C-x", None);
        assert_eq!(p.status.text(), "C-x");
    }
}
