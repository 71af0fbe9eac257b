use crate::types::{Action, Outcome};

/// One candidate controller sequence together with its evaluation
///
/// `Clone` is a full value copy: the action sequence is never shared between
/// chromosomes, so mutating a child can not leak into its parent.
#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome {
    actions: Vec<Action>,
    fitness: f64,
    outcome: Option<Outcome>,
}

impl Chromosome {
    /// Create an un-evaluated chromosome.
    pub fn new(actions: Vec<Action>) -> Self {
        Self {
            actions,
            fitness: 0.0,
            outcome: None,
        }
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn set_actions(&mut self, actions: Vec<Action>) {
        self.actions = actions;
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn record_outcome(&mut self, outcome: Outcome) {
        self.outcome = Some(outcome);
    }

    pub fn clear_outcome(&mut self) {
        self.outcome = None;
    }

    /// Genotype equality: same actions in the same order, fitness ignored.
    pub fn is_clone_of(&self, other: &Chromosome) -> bool {
        self.actions == other.actions
    }

    /// Drop every action after the first `count`.
    pub fn truncate(&mut self, count: usize) {
        self.actions.truncate(count);
    }

    pub fn extend_actions(&mut self, more: &[Action]) {
        self.actions.extend_from_slice(more);
    }
}
