//! Interned tagging states.

use hashbrown::HashMap;

use crate::sentence::{START_TAG, STOP_TAG};

/// Handle to an interned state; equal ids always denote equal states within
/// the same [`StateSpace`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StateId(usize);

/// A position in a sentence together with the two preceding tags.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StateData {
    prev_prev_tag: String,
    prev_tag: String,
    position: usize,
}

impl StateData {
    /// Tag two positions back.
    pub fn prev_prev_tag(&self) -> &str {
        &self.prev_prev_tag
    }

    /// Tag one position back.
    pub fn prev_tag(&self) -> &str {
        &self.prev_tag
    }

    /// Sentence position this state sits at.
    pub fn position(&self) -> usize {
        self.position
    }
}

/// Intern table handing out canonical [`StateId`]s for state values.
///
/// Two requests with identical fields return the same id, so id equality is
/// state equality and states can key hash maps cheaply. The table is owned by
/// a single tagging task and dropped with it; ids must not be mixed across
/// tables.
#[derive(Debug, Default)]
pub struct StateSpace {
    ids: HashMap<StateData, StateId>,
    data: Vec<StateData>,
}

impl StateSpace {
    /// Creates an empty state space.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the canonical id for the given field values, interning a new
    /// state if necessary.
    pub fn build(&mut self, prev_prev_tag: &str, prev_tag: &str, position: usize) -> StateId {
        let state = StateData {
            prev_prev_tag: prev_prev_tag.to_string(),
            prev_tag: prev_tag.to_string(),
            position,
        };
        if let Some(&id) = self.ids.get(&state) {
            return id;
        }
        let id = StateId(self.data.len());
        self.data.push(state.clone());
        self.ids.insert(state, id);
        id
    }

    /// The distinguished start state `(START_TAG, START_TAG, 0)`.
    pub fn start(&mut self) -> StateId {
        self.build(START_TAG, START_TAG, 0)
    }

    /// The distinguished stop state `(STOP_TAG, STOP_TAG, position)`.
    pub fn stop(&mut self, position: usize) -> StateId {
        self.build(STOP_TAG, STOP_TAG, position)
    }

    /// The state reached from `state` by emitting `tag`: the history shifts
    /// by one and the position advances.
    pub fn next(&mut self, state: StateId, tag: &str) -> StateId {
        let prev_tag = self.data[state.0].prev_tag.clone();
        let position = self.data[state.0].position;
        self.build(&prev_tag, tag, position + 1)
    }

    /// Field access for an interned state.
    pub fn get(&self, state: StateId) -> &StateData {
        &self.data[state.0]
    }

    /// Number of interned states.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if nothing has been interned yet.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Expands a state path into the tag sequence it spells out.
    ///
    /// Each state contributes its `prev_tag`; the first state additionally
    /// contributes its `prev_prev_tag` to seed the sequence, so a path of k
    /// states yields k+1 tags.
    pub fn tag_sequence(&self, path: &[StateId]) -> Vec<String> {
        let mut tags = Vec::with_capacity(path.len() + 1);
        if let Some(&first) = path.first() {
            tags.push(self.data[first.0].prev_prev_tag.clone());
        }
        for &state in path {
            tags.push(self.data[state.0].prev_tag.clone());
        }
        tags
    }
}
