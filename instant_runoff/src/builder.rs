pub use crate::config::*;
use crate::voting_eval;

/// A builder for assembling an election.
///
/// The builder checks the ballots as they are added and tallies their first preferences,
/// so that the election can be run directly.
///
/// ```
/// pub use instant_runoff::builder::Builder;
/// pub use instant_runoff::VoteRules;
/// # use instant_runoff::VotingErrors;
///
/// let mut builder = Builder::new(&VoteRules::DEFAULT_RULES)?
///     .candidates(&["Anna".to_string(), "Bob".to_string()])?;
///
/// builder.add_ballot(&[2, 1])?;
///
/// let result = builder.run()?;
/// assert_eq!(result.winners, vec!["Bob".to_string()]);
///
/// # Ok::<(), VotingErrors>(())
/// ```
pub struct Builder {
    pub(crate) _rules: VoteRules,
    pub(crate) _candidates: Vec<Candidate>,
    pub(crate) _ballots: Vec<Ballot>,
}

impl Builder {
    pub fn new(rules: &VoteRules) -> Result<Builder, VotingErrors> {
        Ok(Builder {
            _rules: rules.clone(),
            _candidates: Vec::new(),
            _ballots: Vec::new(),
        })
    }

    /// Registers the candidates. Their positions follow the order of the names, starting at 1.
    ///
    /// Ballots added before are dropped.
    pub fn candidates(self, cands: &[String]) -> Result<Builder, VotingErrors> {
        if cands.is_empty() {
            return Err(VotingErrors::DegenerateElection);
        }
        Ok(Builder {
            _rules: self._rules,
            _candidates: cands
                .iter()
                .enumerate()
                .map(|(idx, name)| Candidate::new(name, (idx + 1) as u32))
                .collect(),
            _ballots: Vec::new(),
        })
    }

    /// Adds a ballot.
    ///
    /// ranks: the positions of the candidates, from the most preferred to the least.
    /// A ballot does not need to rank every candidate, but it must rank at least one and
    /// only refer to registered candidates.
    pub fn add_ballot(&mut self, ranks: &[u32]) -> Result<(), VotingErrors> {
        let ballot_idx = self._ballots.len();
        let num_candidates = self._candidates.len() as u32;
        if let Some(&preference) = ranks.iter().find(|&&r| r == 0 || r > num_candidates) {
            return Err(VotingErrors::InvalidPreference {
                ballot: ballot_idx,
                preference,
            });
        }
        let first = *ranks
            .first()
            .ok_or(VotingErrors::EmptyBallot { ballot: ballot_idx })?;
        self._candidates[(first - 1) as usize].record_first_preference();
        self._ballots.push(Ballot::new(ranks.to_vec()));
        Ok(())
    }

    pub fn num_ballots(&self) -> usize {
        self._ballots.len()
    }

    /// Runs the election with all the ballots added so far.
    pub fn run(self) -> Result<VotingResult, VotingErrors> {
        voting_eval(self._candidates, self._ballots, &self._rules)
    }
}
