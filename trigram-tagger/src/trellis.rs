//! The tagging lattice.

use std::hash::Hash;

use hashbrown::HashMap;

use crate::counter::Counter;

/// A directed graph over states with log-probability edge weights.
///
/// Forward and backward adjacency are kept symmetric by the single mutator
/// [`Trellis::set_transition_weight`]. A state absent from an adjacency
/// counter has no edge there. That is not the same as an edge of weight
/// zero, since a log-space weight of zero marks a certain transition.
#[derive(Debug)]
pub struct Trellis<S> {
    start: S,
    end: S,
    forward: HashMap<S, Counter<S>>,
    backward: HashMap<S, Counter<S>>,
    empty: Counter<S>,
}

impl<S> Trellis<S>
where
    S: Copy + Eq + Hash,
{
    /// Creates a trellis with designated start and end states and no edges.
    pub fn new(start: S, end: S) -> Self {
        Self {
            start,
            end,
            forward: HashMap::new(),
            backward: HashMap::new(),
            empty: Counter::new(),
        }
    }

    /// The designated start state.
    pub fn start(&self) -> S {
        self.start
    }

    /// The designated end state.
    pub fn end(&self) -> S {
        self.end
    }

    /// Installs the edge from `from` to `to` with the given log weight,
    /// updating both adjacency directions. An existing edge is overwritten.
    pub fn set_transition_weight(&mut self, from: S, to: S, weight: f64) {
        self.forward.entry(from).or_default().set(to, weight);
        self.backward.entry(to).or_default().set(from, weight);
    }

    /// Outgoing edges of a state; empty if it has none.
    pub fn forward_weights(&self, state: S) -> &Counter<S> {
        self.forward.get(&state).unwrap_or(&self.empty)
    }

    /// Incoming edges of a state; empty if it has none.
    pub fn backward_weights(&self, state: S) -> &Counter<S> {
        self.backward.get(&state).unwrap_or(&self.empty)
    }

    /// Weight of the edge from `from` to `to`, or `None` if there is no such
    /// edge.
    pub fn weight(&self, from: S, to: S) -> Option<f64> {
        self.forward.get(&from).and_then(|edges| edges.get(&to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutator_writes_both_directions() {
        let mut trellis = Trellis::new("start", "end");
        trellis.set_transition_weight("start", "a", -1.5);
        trellis.set_transition_weight("a", "end", -0.5);

        assert_eq!(Some(-1.5), trellis.forward_weights("start").get("a"));
        assert_eq!(Some(-1.5), trellis.backward_weights("a").get("start"));
        assert_eq!(Some(-0.5), trellis.forward_weights("a").get("end"));
        assert_eq!(Some(-0.5), trellis.backward_weights("end").get("a"));
    }

    #[test]
    fn test_missing_edge_is_not_zero_weight() {
        let mut trellis = Trellis::new("start", "end");
        trellis.set_transition_weight("start", "a", 0.0);

        assert_eq!(Some(0.0), trellis.weight("start", "a"));
        assert_eq!(None, trellis.weight("start", "b"));
        assert_eq!(None, trellis.weight("a", "start"));
    }

    #[test]
    fn test_overwriting_an_edge_keeps_symmetry() {
        let mut trellis = Trellis::new("start", "end");
        trellis.set_transition_weight("start", "a", -1.0);
        trellis.set_transition_weight("start", "a", -3.0);

        assert_eq!(Some(-3.0), trellis.weight("start", "a"));
        assert_eq!(Some(-3.0), trellis.backward_weights("a").get("start"));
        assert_eq!(1, trellis.forward_weights("start").len());
    }

    #[test]
    fn test_unknown_state_has_empty_adjacency() {
        let trellis: Trellis<&str> = Trellis::new("start", "end");

        assert!(trellis.forward_weights("start").is_empty());
        assert!(trellis.backward_weights("end").is_empty());
    }
}
