//! Multi-key sequence matching
//!
//! The matcher is fed one chord at a time and reports whether the chords so
//! far complete a bound sequence, are a prefix of one, or match nothing.
//! A sequence that is also the prefix of a longer one keeps waiting for more
//! keys; [`SequenceMatcher::cancel`] hands back its action when the wait is
//! abandoned.

use std::collections::{BTreeMap, HashMap};

use super::action::Action;
use super::sequence::KeySequence;
use super::types::KeyChord;

/// Result of feeding one chord to a matcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The chord completed a bound sequence; matcher state was reset
    Resolved(Action),
    /// The chord extends a valid prefix; more keys are needed
    InSequence,
    /// No bound sequence continues with this chord; matcher state was reset
    NoMatch,
}

/// Stores key sequences and matches incoming chords against them
pub trait SequenceMatcher {
    /// Remove every binding and any pending state
    fn clear(&mut self);

    /// Stage a binding; the last action added for a sequence wins
    fn add(&mut self, sequence: KeySequence, action: Action);

    /// Make staged bindings available for lookup
    fn compile(&mut self);

    /// Feed one chord
    fn accept_key(&mut self, chord: KeyChord) -> MatchOutcome;

    /// Drop any partially typed sequence
    fn reset(&mut self);

    /// Drop the partial sequence, returning the action bound to it, if any
    fn cancel(&mut self) -> Option<Action>;

    /// Whether a partial sequence is being typed
    fn is_pending(&self) -> bool;
}

#[derive(Debug, Clone, Default)]
struct Node {
    action: Option<Action>,
    children: HashMap<KeyChord, Node>,
}

impl Node {
    fn insert(&mut self, chords: &[KeyChord], action: Action) {
        match chords.split_first() {
            None => self.action = Some(action),
            Some((first, rest)) => self.children.entry(*first).or_default().insert(rest, action),
        }
    }

    fn descend(&self, chords: &[KeyChord]) -> Option<&Node> {
        chords
            .iter()
            .try_fold(self, |node, chord| node.children.get(chord))
    }
}

/// Trie-backed [`SequenceMatcher`]
#[derive(Debug, Clone, Default)]
pub struct TrieMatcher {
    /// Bindings added since the last clear
    staged: BTreeMap<KeySequence, Action>,
    /// Lookup trie built by `compile`
    root: Node,
    compiled: bool,
    /// Chords of the partially typed sequence
    pending: Vec<KeyChord>,
}

impl TrieMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.staged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

}

impl SequenceMatcher for TrieMatcher {
    fn clear(&mut self) {
        self.staged.clear();
        self.root = Node::default();
        self.compiled = false;
        self.pending.clear();
    }

    fn add(&mut self, sequence: KeySequence, action: Action) {
        self.staged.insert(sequence, action);
        self.compiled = false;
    }

    fn compile(&mut self) {
        let mut root = Node::default();
        for (sequence, action) in &self.staged {
            root.insert(sequence.chords(), action.clone());
        }
        self.root = root;
        self.compiled = true;
        self.pending.clear();
    }

    fn accept_key(&mut self, chord: KeyChord) -> MatchOutcome {
        if !self.compiled {
            return MatchOutcome::NoMatch;
        }

        let next = self
            .root
            .descend(&self.pending)
            .and_then(|node| node.children.get(&chord));

        match next {
            Some(node) if !node.children.is_empty() => {
                self.pending.push(chord);
                MatchOutcome::InSequence
            }
            Some(Node {
                action: Some(action),
                ..
            }) => {
                let action = action.clone();
                self.pending.clear();
                MatchOutcome::Resolved(action)
            }
            _ => {
                self.pending.clear();
                MatchOutcome::NoMatch
            }
        }
    }

    fn reset(&mut self) {
        self.pending.clear();
    }

    fn cancel(&mut self) -> Option<Action> {
        let action = if self.pending.is_empty() {
            None
        } else {
            self.root
                .descend(&self.pending)
                .and_then(|node| node.action.clone())
        };
        self.pending.clear();
        action
    }

    fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}
