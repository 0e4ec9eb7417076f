//! Per-node simulation outcomes and the rewards derived from them.

use serde::{Deserialize, Serialize};
use spoke_common::NodeId;
use std::fmt;
use std::ops::Index;

/// Terminal state of one node after a simulation sweep.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Readiness {
    /// Not placed, or waiting on a predecessor that never became ready.
    Unplaced,
    /// Placed, but its arrival time does not line up with its spoke.
    Infeasible,
    /// Output available at the given time.
    Ready(i64),
}

impl Readiness {
    /// Returns `true` for [`Readiness::Ready`].
    pub fn is_ready(self) -> bool {
        matches!(self, Readiness::Ready(_))
    }

    /// The ready time, if any.
    pub fn time(self) -> Option<i64> {
        match self {
            Readiness::Ready(t) => Some(t),
            _ => None,
        }
    }

    /// Reward for this state on a device with aggregate extent `max_dist`
    /// and a graph of `num_nodes` nodes.
    pub fn reward(self, max_dist: i64, num_nodes: usize) -> f64 {
        match self {
            Readiness::Unplaced => 0.0,
            Readiness::Infeasible => -1.0,
            Readiness::Ready(t) => {
                let n = num_nodes as i64;
                (max_dist * n - t) as f64 / n as f64
            }
        }
    }
}

impl fmt::Display for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Readiness::Unplaced => write!(f, "unplaced"),
            Readiness::Infeasible => write!(f, "infeasible"),
            Readiness::Ready(t) => write!(f, "ready@{t}"),
        }
    }
}

/// One [`Readiness`] per node, in node-index order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReadinessVector(Vec<Readiness>);

impl ReadinessVector {
    /// Wraps a per-node state vector.
    pub fn new(states: Vec<Readiness>) -> Self {
        Self(states)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no nodes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// State of one node.
    pub fn get(&self, node: NodeId) -> Readiness {
        self.0[node.index()]
    }

    /// Iterates states in node-index order.
    pub fn iter(&self) -> impl Iterator<Item = Readiness> + '_ {
        self.0.iter().copied()
    }

    /// The states as a slice.
    pub fn as_slice(&self) -> &[Readiness] {
        &self.0
    }

    /// Returns `true` if every node is ready.
    pub fn all_ready(&self) -> bool {
        self.0.iter().all(|r| r.is_ready())
    }

    /// Number of nodes in the given state class.
    pub fn count(&self, pred: impl Fn(Readiness) -> bool) -> usize {
        self.iter().filter(|&r| pred(r)).count()
    }

    /// Latest ready time across all ready nodes.
    pub fn makespan(&self) -> Option<i64> {
        self.iter().filter_map(Readiness::time).max()
    }

    /// Derives the reward of every node.
    pub fn rewards(&self, max_dist: i64) -> RewardVector {
        let n = self.len();
        RewardVector(self.iter().map(|r| r.reward(max_dist, n)).collect())
    }
}

impl Index<usize> for ReadinessVector {
    type Output = Readiness;

    fn index(&self, node: usize) -> &Readiness {
        &self.0[node]
    }
}

/// One reward per node, in node-index order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RewardVector(Vec<f64>);

impl RewardVector {
    /// Wraps a per-node reward vector.
    pub fn new(rewards: Vec<f64>) -> Self {
        Self(rewards)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no nodes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reward of one node.
    pub fn get(&self, node: NodeId) -> f64 {
        self.0[node.index()]
    }

    /// Iterates rewards in node-index order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    /// The rewards as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Sum over all nodes.
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Consumes the vector, returning the raw rewards.
    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl Index<usize> for RewardVector {
    type Output = f64;

    fn index(&self, node: usize) -> &f64 {
        &self.0[node]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reward_per_state() {
        assert_eq!(Readiness::Unplaced.reward(11, 10), 0.0);
        assert_eq!(Readiness::Infeasible.reward(11, 10), -1.0);
        assert_eq!(Readiness::Ready(4).reward(11, 10), 10.6);
        assert_eq!(Readiness::Ready(110).reward(11, 10), 0.0);
        assert_eq!(Readiness::Ready(120).reward(11, 10), -1.0);
    }

    #[test]
    fn time_accessor() {
        assert_eq!(Readiness::Ready(9).time(), Some(9));
        assert_eq!(Readiness::Infeasible.time(), None);
        assert!(!Readiness::Unplaced.is_ready());
    }

    #[test]
    fn vector_summaries() {
        let v = ReadinessVector::new(vec![
            Readiness::Ready(4),
            Readiness::Ready(12),
            Readiness::Infeasible,
            Readiness::Unplaced,
        ]);
        assert_eq!(v.len(), 4);
        assert!(!v.all_ready());
        assert_eq!(v.makespan(), Some(12));
        assert_eq!(v.count(|r| r == Readiness::Infeasible), 1);
        assert_eq!(v.get(NodeId::from_raw(1)), Readiness::Ready(12));
    }

    #[test]
    fn rewards_from_vector() {
        let v = ReadinessVector::new(vec![Readiness::Ready(4), Readiness::Unplaced]);
        let r = v.rewards(11);
        assert_eq!(r.as_slice(), &[9.0, 0.0]);
        assert_eq!(r.total(), 9.0);
    }

    #[test]
    fn empty_vector() {
        let v = ReadinessVector::default();
        assert!(v.all_ready());
        assert_eq!(v.makespan(), None);
        assert!(v.rewards(11).is_empty());
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Readiness::Ready(7)), "ready@7");
        assert_eq!(format!("{}", Readiness::Infeasible), "infeasible");
    }

    #[test]
    fn serde_roundtrip() {
        let v = ReadinessVector::new(vec![Readiness::Ready(4), Readiness::Infeasible]);
        let json = serde_json::to_string(&v).unwrap();
        let back: ReadinessVector = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }
}
