//! Uniform solver entry point.

use crate::bnb::{BnbConfig, BnbRunner};
use crate::budget::TimeBudget;
use crate::error::{Result, SetCoverError};
use crate::greedy::GreedyRunner;
use crate::hc::{HcConfig, HcRunner};
use crate::instance::ProblemInstance;
use crate::result::SolveResult;
use crate::sa::{SaConfig, SaRunner};
use std::fmt;
use std::str::FromStr;

/// The four solving strategies behind one `solve` call.
///
/// Parses from the short identifiers used for output files (`BnB`,
/// `Approx`, `LS1`, `LS2`) and from descriptive aliases, ignoring case.
///
/// # Examples
///
/// ```
/// use u_setcover::{Algorithm, ProblemInstance, TimeBudget};
///
/// let alg: Algorithm = "ls1".parse().unwrap();
/// assert_eq!(alg, Algorithm::SimulatedAnnealing);
/// assert_eq!(alg.to_string(), "LS1");
///
/// let instance = ProblemInstance::new(3, vec![vec![1, 2], vec![3], vec![2, 3]]).unwrap();
/// let result = Algorithm::BranchAndBound
///     .solve(&instance, &TimeBudget::unlimited(), None)
///     .unwrap();
/// assert_eq!(result.best_cost, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    BranchAndBound,
    Approx,
    SimulatedAnnealing,
    HillClimbing,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::BranchAndBound,
        Algorithm::Approx,
        Algorithm::SimulatedAnnealing,
        Algorithm::HillClimbing,
    ];

    /// Short identifier used in output file names.
    pub fn identifier(self) -> &'static str {
        match self {
            Algorithm::BranchAndBound => "BnB",
            Algorithm::Approx => "Approx",
            Algorithm::SimulatedAnnealing => "LS1",
            Algorithm::HillClimbing => "LS2",
        }
    }

    /// Whether results depend on the random seed.
    pub fn is_stochastic(self) -> bool {
        matches!(
            self,
            Algorithm::SimulatedAnnealing | Algorithm::HillClimbing
        )
    }

    /// Solves `instance` with default settings under `budget`.
    ///
    /// `seed` only affects stochastic strategies; `None` draws one at random.
    pub fn solve(
        self,
        instance: &ProblemInstance,
        budget: &TimeBudget,
        seed: Option<u64>,
    ) -> Result<SolveResult> {
        match self {
            Algorithm::BranchAndBound => {
                BnbRunner::run(instance, &BnbConfig::default(), budget).map(Into::into)
            }
            Algorithm::Approx => GreedyRunner::run(instance, budget),
            Algorithm::SimulatedAnnealing => {
                let mut config = SaConfig::default();
                config.seed = seed;
                SaRunner::run(instance, &config, budget).map(Into::into)
            }
            Algorithm::HillClimbing => {
                let mut config = HcConfig::default();
                config.seed = seed;
                HcRunner::run(instance, &config, budget)
            }
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for Algorithm {
    type Err = SetCoverError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bnb" | "branchandbound" | "branch-and-bound" => Ok(Algorithm::BranchAndBound),
            "approx" | "greedy" => Ok(Algorithm::Approx),
            "ls1" | "sa" | "simulatedannealing" | "simulated-annealing" => {
                Ok(Algorithm::SimulatedAnnealing)
            }
            "ls2" | "hc" | "hillclimbing" | "hill-climbing" => Ok(Algorithm::HillClimbing),
            _ => Err(SetCoverError::UnknownAlgorithm(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate::evaluate;

    fn example() -> ProblemInstance {
        ProblemInstance::new(5, vec![vec![1, 2, 3], vec![2, 4], vec![3, 4, 5], vec![1, 5]])
            .unwrap()
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("BnB".parse::<Algorithm>().unwrap(), Algorithm::BranchAndBound);
        assert_eq!("BranchAndBound".parse::<Algorithm>().unwrap(), Algorithm::BranchAndBound);
        assert_eq!("APPROX".parse::<Algorithm>().unwrap(), Algorithm::Approx);
        assert_eq!("SA".parse::<Algorithm>().unwrap(), Algorithm::SimulatedAnnealing);
        assert_eq!(
            "SimulatedAnnealing".parse::<Algorithm>().unwrap(),
            Algorithm::SimulatedAnnealing
        );
        assert_eq!("LS2".parse::<Algorithm>().unwrap(), Algorithm::HillClimbing);
        assert_eq!(" hc ".parse::<Algorithm>().unwrap(), Algorithm::HillClimbing);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "tabu".parse::<Algorithm>().unwrap_err();
        assert!(matches!(err, SetCoverError::UnknownAlgorithm(ref s) if s == "tabu"));
    }

    #[test]
    fn test_display_roundtrips_through_parse() {
        for alg in Algorithm::ALL {
            assert_eq!(alg.to_string().parse::<Algorithm>().unwrap(), alg);
        }
    }

    #[test]
    fn test_stochastic_flags() {
        assert!(!Algorithm::BranchAndBound.is_stochastic());
        assert!(!Algorithm::Approx.is_stochastic());
        assert!(Algorithm::SimulatedAnnealing.is_stochastic());
        assert!(Algorithm::HillClimbing.is_stochastic());
    }

    #[test]
    fn test_every_algorithm_solves_example() {
        let instance = example();
        for alg in Algorithm::ALL {
            let result = alg
                .solve(&instance, &TimeBudget::unlimited(), Some(42))
                .unwrap();
            assert!(
                evaluate(&instance, &result.best_solution).feasible,
                "{alg} returned an infeasible cover"
            );
            assert_eq!(result.trace.last_cost(), Some(result.best_cost), "{alg}");
        }
    }

    #[test]
    fn test_every_algorithm_rejects_infeasible() {
        let instance = ProblemInstance::new(3, vec![vec![1], vec![2]]).unwrap();
        for alg in Algorithm::ALL {
            let err = alg
                .solve(&instance, &TimeBudget::unlimited(), Some(1))
                .unwrap_err();
            assert!(
                matches!(err, SetCoverError::InfeasibleInstance { .. }),
                "{alg}: {err}"
            );
        }
    }
}
