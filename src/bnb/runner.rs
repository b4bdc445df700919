//! Branch-and-bound search loop.

use super::config::{BnbConfig, SubsetOrdering};
use super::types::{BnbStats, SearchNode};
use crate::budget::TimeBudget;
use crate::error::{Result, SetCoverError};
use crate::greedy::complete_cover;
use crate::instance::ProblemInstance;
use crate::result::{SolveResult, Termination};
use crate::trace::Trace;
use fixedbitset::FixedBitSet;
use rustc_hash::FxHashMap;
use tracing::{debug, info};

/// Result of a branch-and-bound run.
#[derive(Debug, Clone)]
pub struct BnbResult {
    /// Best cover, trace and termination reason.
    pub solution: SolveResult,
    /// Search counters.
    pub stats: BnbStats,
}

impl From<BnbResult> for SolveResult {
    fn from(result: BnbResult) -> Self {
        result.solution
    }
}

/// Executes exact branch-and-bound.
pub struct BnbRunner;

impl BnbRunner {
    /// Runs branch-and-bound until the tree is exhausted or the budget expires.
    ///
    /// When the tree is exhausted the result has [`Termination::Optimal`].
    /// When cut off, the result is the best cover committed so far; if no
    /// node was processed at all, the plain greedy cover is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_setcover::bnb::{BnbConfig, BnbRunner};
    /// use u_setcover::{ProblemInstance, TimeBudget};
    ///
    /// let instance = ProblemInstance::new(5, vec![
    ///     vec![1, 2, 3], vec![2, 4], vec![3, 4, 5], vec![1, 5],
    /// ]).unwrap();
    /// let config = BnbConfig::default();
    /// let result = BnbRunner::run(&instance, &config, &TimeBudget::unlimited()).unwrap();
    /// assert_eq!(result.solution.best_cost, 2);
    /// assert!(result.solution.is_optimal());
    /// ```
    pub fn run(
        instance: &ProblemInstance,
        config: &BnbConfig,
        budget: &TimeBudget,
    ) -> Result<BnbResult> {
        config.validate().map_err(SetCoverError::InvalidConfig)?;
        instance.check_feasible()?;

        info!(
            event = "solve_start",
            algorithm = "BnB",
            universe = instance.universe_size(),
            subsets = instance.subset_count(),
            memoize = config.memoize,
        );

        let search = Search::new(instance, config, budget);
        let result = search.run();

        info!(
            event = "solve_end",
            algorithm = "BnB",
            cost = result.solution.best_cost,
            termination = ?result.solution.termination,
            nodes = result.stats.nodes_explored,
            elapsed_ms = budget.elapsed().as_millis() as u64,
        );

        Ok(result)
    }
}

/// Decision order for the instance.
fn decision_order(instance: &ProblemInstance, ordering: SubsetOrdering) -> Vec<usize> {
    let mut order: Vec<usize> = (0..instance.subset_count()).collect();
    if ordering == SubsetOrdering::DescendingSize {
        // stable: equal sizes keep index order
        order.sort_by_key(|&i| std::cmp::Reverse(instance.subset_len(i)));
    }
    order
}

struct Search<'a> {
    instance: &'a ProblemInstance,
    config: &'a BnbConfig,
    budget: &'a TimeBudget,
    order: Vec<usize>,
    stack: Vec<SearchNode>,
    memo: FxHashMap<(usize, FixedBitSet), usize>,
    /// Incumbent, ascending indices.
    best: Option<Vec<usize>>,
    trace: Trace,
    stats: BnbStats,
}

impl<'a> Search<'a> {
    fn new(instance: &'a ProblemInstance, config: &'a BnbConfig, budget: &'a TimeBudget) -> Self {
        let order = decision_order(instance, config.ordering);
        let mut stack = Vec::with_capacity(instance.subset_count() + 1);
        stack.push(SearchNode::root(instance.universe_size()));
        Self {
            instance,
            config,
            budget,
            order,
            stack,
            memo: FxHashMap::default(),
            best: None,
            trace: Trace::new(),
            stats: BnbStats::default(),
        }
    }

    #[inline]
    fn best_cost(&self) -> usize {
        self.best.as_ref().map_or(usize::MAX, Vec::len)
    }

    fn run(mut self) -> BnbResult {
        let termination = self.explore();

        if self.best.is_none() {
            // Budget ran out before the first node; fall back to the plain greedy cover.
            let all: Vec<usize> = (0..self.instance.subset_count()).collect();
            if let Some(done) = complete_cover(self.instance, &all, &self.instance.empty_cover())
            {
                self.offer(done.picks);
            }
        }

        self.stats.memo_entries = self.memo.len();
        let best = self.best.take().unwrap_or_default();
        BnbResult {
            solution: SolveResult::new(best, self.trace, termination, self.stats.nodes_explored),
            stats: self.stats,
        }
    }

    fn explore(&mut self) -> Termination {
        let universe_size = self.instance.universe_size();
        let subset_count = self.order.len();

        while let Some(node) = self.stack.pop() {
            if self.budget.expired() {
                return if self.budget.is_cancelled() {
                    Termination::Cancelled
                } else {
                    Termination::Cutoff
                };
            }
            if self.config.max_nodes > 0 && self.stats.nodes_explored >= self.config.max_nodes {
                return Termination::IterationLimit;
            }
            self.stats.nodes_explored += 1;
            self.stats.max_depth = self.stats.max_depth.max(node.frontier);

            let covered_count = node.covered.count_ones(..);
            if covered_count == universe_size {
                self.offer(node.selected);
                continue;
            }
            if node.frontier == subset_count {
                self.stats.dead_ends += 1;
                continue;
            }

            if self.config.memoize && self.seen_cheaper(&node) {
                self.stats.pruned_by_memo += 1;
                continue;
            }

            let Some(done) =
                complete_cover(self.instance, &self.order[node.frontier..], &node.covered)
            else {
                self.stats.pruned_by_bound += 1;
                continue;
            };

            if node.selected.len() + done.picks.len() <= self.best_cost() {
                let mut candidate = node.selected.clone();
                candidate.extend_from_slice(&done.picks);
                self.offer(candidate);
            }

            // Every remaining subset covers at most `first_gain` of the
            // uncovered elements.
            let uncovered = universe_size - covered_count;
            let lower_bound = uncovered.div_ceil(done.first_gain);
            if node.selected.len() + lower_bound >= self.best_cost() {
                self.stats.pruned_by_bound += 1;
                continue;
            }

            self.branch(node);
        }

        Termination::Optimal
    }

    /// Whether the node's `(frontier, covered)` state was already reached
    /// with no more selected subsets. Records the node otherwise.
    fn seen_cheaper(&mut self, node: &SearchNode) -> bool {
        let depth = node.selected.len();
        let key = (node.frontier, node.covered.clone());
        if let Some(seen) = self.memo.get_mut(&key) {
            if depth >= *seen {
                return true;
            }
            *seen = depth;
        } else if self.memo.len() < self.config.max_memo_entries {
            self.memo.insert(key, depth);
        }
        false
    }

    /// Pushes the exclude child, then the include child so it is explored first.
    fn branch(&mut self, node: SearchNode) {
        let index = self.order[node.frontier];
        let subset = self.instance.subset(index);
        let adds_coverage = subset.difference_count(&node.covered) > 0;

        let mut include_covered = node.covered.clone();
        include_covered.union_with(subset);
        let mut include_selected = node.selected.clone();
        include_selected.push(index);

        self.stack.push(SearchNode {
            frontier: node.frontier + 1,
            covered: node.covered,
            selected: node.selected,
        });

        if adds_coverage {
            self.stack.push(SearchNode {
                frontier: node.frontier + 1,
                covered: include_covered,
                selected: include_selected,
            });
        } else {
            self.stats.pruned_dominated += 1;
        }
    }

    /// Installs `candidate` when it is smaller than the incumbent, or equal
    /// and lexicographically smaller.
    fn offer(&mut self, mut candidate: Vec<usize>) {
        candidate.sort_unstable();
        self.stats.solutions_found += 1;
        let replace = match &self.best {
            None => true,
            Some(best) => {
                candidate.len() < best.len() || (candidate.len() == best.len() && candidate < *best)
            }
        };
        if !replace {
            return;
        }

        let cost = candidate.len();
        let elapsed = self.budget.elapsed_secs();
        if self.trace.record(elapsed, cost) {
            debug!(event = "improvement", algorithm = "BnB", cost, elapsed_secs = elapsed);
        }
        self.best = Some(candidate);
    }
}
