//! Best-path search over a trellis.

use std::hash::Hash;

use hashbrown::hash_map::Entry;
use hashbrown::HashMap;

use crate::trellis::Trellis;

/// A decoded state path and its total log score.
#[derive(Clone, Debug)]
pub struct BestPath<S> {
    /// States from start to end, in forward order. When the end state was
    /// unreachable, the contents are decoder-defined and need not end at it.
    pub states: Vec<S>,
    /// Sum of the traversed edge weights; `f64::NEG_INFINITY` when the end
    /// state was unreachable.
    pub log_score: f64,
}

/// Strategy for finding the best start-to-end path through a trellis.
///
/// Decoders assume a leveled trellis: every path from the start state to a
/// given state crosses the same number of edges. Tag lattices satisfy this by
/// construction, since the position grows by one along every edge.
pub trait TrellisDecoder<S>
where
    S: Copy + Eq + Hash,
{
    /// Returns the best path from start to end together with its score.
    ///
    /// If the end state is unreachable the score is `f64::NEG_INFINITY` and
    /// the path is decoder-defined; implementations must not panic.
    fn best_path(&self, trellis: &Trellis<S>) -> BestPath<S>;
}

/// Baseline decoder that always follows the locally best edge.
///
/// Runs in O(path length) but never backtracks, so it can walk into a dead
/// end or a globally suboptimal path. Kept as the yardstick the Viterbi
/// decoder is validated against.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyDecoder;

impl<S> TrellisDecoder<S> for GreedyDecoder
where
    S: Copy + Eq + Hash,
{
    fn best_path(&self, trellis: &Trellis<S>) -> BestPath<S> {
        let mut states = vec![trellis.start()];
        let mut log_score = 0.0;
        let mut current = trellis.start();
        while current != trellis.end() {
            let next = match trellis.forward_weights(current).arg_max() {
                Some((&next, weight)) => {
                    log_score += weight;
                    next
                }
                // Dead end: the walked prefix is returned with an impossible
                // score.
                None => {
                    return BestPath {
                        states,
                        log_score: f64::NEG_INFINITY,
                    }
                }
            };
            states.push(next);
            current = next;
        }
        BestPath { states, log_score }
    }
}

/// Dynamic-programming decoder over the whole trellis (Viterbi).
///
/// Expands the trellis one level at a time, recording for every discovered
/// state the best score of any path reaching it and the predecessor
/// achieving that score, then reconstructs the best path backwards from the
/// end state. When several predecessors tie for the best score, any one of
/// them may be recorded: repeated calls return paths of identical score but
/// possibly different tie-broken predecessors.
#[derive(Clone, Copy, Debug, Default)]
pub struct ViterbiDecoder;

struct Arrival<S> {
    log_score: f64,
    back: Option<S>,
}

impl<S> TrellisDecoder<S> for ViterbiDecoder
where
    S: Copy + Eq + Hash,
{
    fn best_path(&self, trellis: &Trellis<S>) -> BestPath<S> {
        let start = trellis.start();
        let end = trellis.end();

        // One chart level per trellis level; rebuilt from scratch on every
        // call.
        let mut chart: Vec<HashMap<S, Arrival<S>>> = Vec::new();
        let mut first_level = HashMap::new();
        first_level.insert(
            start,
            Arrival {
                log_score: 0.0,
                back: None,
            },
        );
        chart.push(first_level);

        let mut end_level = None;
        let mut position = 0;
        loop {
            if chart[position].is_empty() {
                break;
            }
            if chart[position].contains_key(&end) {
                end_level = Some(position);
                break;
            }
            let mut next_level: HashMap<S, Arrival<S>> = HashMap::new();
            for (&state, arrival) in &chart[position] {
                for (&to, weight) in trellis.forward_weights(state).iter() {
                    let log_score = arrival.log_score + weight;
                    match next_level.entry(to) {
                        Entry::Occupied(mut entry) => {
                            if log_score > entry.get().log_score {
                                entry.insert(Arrival {
                                    log_score,
                                    back: Some(state),
                                });
                            }
                        }
                        Entry::Vacant(entry) => {
                            entry.insert(Arrival {
                                log_score,
                                back: Some(state),
                            });
                        }
                    }
                }
            }
            chart.push(next_level);
            position += 1;
        }

        let end_level = match end_level {
            Some(level) => level,
            None => {
                return BestPath {
                    states: Vec::new(),
                    log_score: f64::NEG_INFINITY,
                }
            }
        };

        let log_score = chart[end_level][&end].log_score;
        let mut states = vec![end];
        let mut current = end;
        let mut level = end_level;
        // Predecessors recorded at level k always live at level k-1, so the
        // walk ends exactly at the start state, which has no predecessor.
        while let Some(previous) = chart[level][&current].back {
            states.push(previous);
            current = previous;
            level -= 1;
        }
        states.reverse();
        BestPath { states, log_score }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trellis(edges: &[(&'static str, &'static str, f64)]) -> Trellis<&'static str> {
        let mut trellis = Trellis::new("start", "end");
        for &(from, to, weight) in edges {
            trellis.set_transition_weight(from, to, weight);
        }
        trellis
    }

    #[test]
    fn test_viterbi_trivial_trellis() {
        let trellis: Trellis<&str> = Trellis::new("only", "only");
        let path = ViterbiDecoder.best_path(&trellis);

        assert_eq!(vec!["only"], path.states);
        assert_eq!(0.0, path.log_score);
    }

    #[test]
    fn test_viterbi_finds_best_total_score() {
        // The edge into "b" looks better locally, but "c" wins overall.
        let trellis = trellis(&[
            ("start", "b", -1.0),
            ("start", "c", -3.0),
            ("b", "end", -5.0),
            ("c", "end", -1.0),
        ]);
        let path = ViterbiDecoder.best_path(&trellis);

        assert_eq!(vec!["start", "c", "end"], path.states);
        assert!((path.log_score - -4.0).abs() < 1e-12);
    }

    #[test]
    fn test_greedy_takes_the_local_maximum() {
        let trellis = trellis(&[
            ("start", "b", -1.0),
            ("start", "c", -3.0),
            ("b", "end", -5.0),
            ("c", "end", -1.0),
        ]);
        let path = GreedyDecoder.best_path(&trellis);

        assert_eq!(vec!["start", "b", "end"], path.states);
        assert!((path.log_score - -6.0).abs() < 1e-12);
    }

    #[test]
    fn test_viterbi_never_scores_below_greedy() {
        let trellis = trellis(&[
            ("start", "a", -2.0),
            ("start", "b", -1.0),
            ("a", "c", -1.0),
            ("b", "c", -4.0),
            ("c", "end", 0.0),
        ]);
        let viterbi = ViterbiDecoder.best_path(&trellis);
        let greedy = GreedyDecoder.best_path(&trellis);

        assert!(viterbi.log_score >= greedy.log_score);
        assert!((viterbi.log_score - -3.0).abs() < 1e-12);
    }

    #[test]
    fn test_viterbi_handles_multiple_levels() {
        let trellis = trellis(&[
            ("start", "a1", -1.0),
            ("start", "a2", -2.0),
            ("a1", "b1", -3.0),
            ("a1", "b2", -1.0),
            ("a2", "b1", -0.5),
            ("a2", "b2", -4.0),
            ("b1", "end", -1.0),
            ("b2", "end", -2.0),
        ]);
        let path = ViterbiDecoder.best_path(&trellis);

        // The path start, a2, b1, end totals -3.5; every alternative is worse.
        assert_eq!(vec!["start", "a2", "b1", "end"], path.states);
        assert!((path.log_score - -3.5).abs() < 1e-12);
    }

    #[test]
    fn test_viterbi_reports_unreachable_end_as_negative_infinity() {
        let trellis = trellis(&[("start", "a", -1.0)]);
        let path = ViterbiDecoder.best_path(&trellis);

        assert!(path.states.is_empty());
        assert_eq!(f64::NEG_INFINITY, path.log_score);
    }

    #[test]
    fn test_greedy_reports_dead_end_as_negative_infinity() {
        let trellis = trellis(&[("start", "a", -1.0)]);
        let path = GreedyDecoder.best_path(&trellis);

        assert_eq!(vec!["start", "a"], path.states);
        assert_eq!(f64::NEG_INFINITY, path.log_score);
    }

    #[test]
    fn test_repeated_decoding_gives_identical_scores() {
        let trellis = trellis(&[
            ("start", "a", -1.0),
            ("start", "b", -1.0),
            ("a", "end", -2.0),
            ("b", "end", -2.0),
        ]);

        let first = ViterbiDecoder.best_path(&trellis);
        let second = ViterbiDecoder.best_path(&trellis);

        assert_eq!(first.log_score, second.log_score);
        assert_eq!(first.states.len(), second.states.len());
    }

    #[test]
    fn test_tied_paths_decode_to_the_shared_score() {
        // Two paths with identical totals; either is a legal answer.
        let trellis = trellis(&[
            ("start", "a", -1.0),
            ("start", "b", -1.0),
            ("a", "end", -2.0),
            ("b", "end", -2.0),
        ]);
        let path = ViterbiDecoder.best_path(&trellis);

        assert!((path.log_score - -3.0).abs() < 1e-12);
        assert_eq!(3, path.states.len());
        assert_eq!("start", path.states[0]);
        assert_eq!("end", path.states[2]);
        assert!(path.states[1] == "a" || path.states[1] == "b");
    }
}
