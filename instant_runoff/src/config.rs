// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// A candidate standing in the election.
///
/// The `position` is the 1-based index of the candidate in the input order. It is the
/// identifier that ballots refer to and it never changes, even after other candidates
/// have been eliminated. The vote count can only be changed through the tallying
/// operations.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Candidate {
    name: String,
    position: u32,
    vote_count: u64,
}

impl Candidate {
    pub fn new(name: &str, position: u32) -> Candidate {
        Candidate {
            name: name.to_string(),
            position,
            vote_count: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> u32 {
        self.position
    }

    pub fn vote_count(&self) -> u64 {
        self.vote_count
    }

    /// Counts one ballot that ranks this candidate first.
    pub fn record_first_preference(&mut self) {
        self.vote_count += 1;
    }

    /// Receives one ballot whose previous choice was eliminated.
    pub(crate) fn transfer_vote(&mut self) {
        self.vote_count += 1;
    }
}

/// The ranking of one voter, from the most preferred candidate to the least.
///
/// Preferences are consumed from the front as candidates get eliminated.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Ballot {
    ranks: Vec<u32>,
    // Index of the current preference. Everything before it has been consumed.
    cursor: usize,
}

impl Ballot {
    pub fn new(ranks: Vec<u32>) -> Ballot {
        Ballot { ranks, cursor: 0 }
    }

    /// The preference currently pointed at, or None if the ballot is exhausted.
    pub fn current_preference(&self) -> Option<u32> {
        self.ranks.get(self.cursor).cloned()
    }

    /// The preferences that have not been consumed yet.
    pub fn remaining(&self) -> &[u32] {
        self.ranks.get(self.cursor..).unwrap_or(&[])
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.ranks.len()
    }

    /// Drops the current preference and returns the next one.
    pub(crate) fn next_preference(&mut self) -> Option<u32> {
        if self.cursor < self.ranks.len() {
            self.cursor += 1;
        }
        self.current_preference()
    }
}

// ******** Output data structures *********

/// How a round ended an election.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Decision {
    /// One candidate holds strictly more than half of the ballots.
    Majority,
    /// All the remaining candidates hold exactly the same share of the ballots.
    CompleteTie,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct EliminationStats {
    pub name: String,
    pub transfers: Vec<(String, u64)>,
    pub exhausted: u64,
}

/// Statistics for one round
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RoundStats {
    pub round: u32,
    /// The number of ballots still counting in this round.
    pub active_ballots: u64,
    pub tally: Vec<(String, u64)>,
    pub tally_results_elected: Vec<String>,
    pub tally_result_eliminated: Vec<EliminationStats>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct VotingResult {
    /// The winners, in candidate order. There is more than one only for a complete tie.
    pub winners: Vec<String>,
    pub decision: Decision,
    /// Count strictly above which a candidate wins in the final round.
    pub threshold: u64,
    pub round_stats: Vec<RoundStats>,
}

/// Errors that prevent the algorithm from completing successfully.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum VotingErrors {
    /// No candidate is standing.
    DegenerateElection,
    /// A ballot ran out of preferences while the policy forbids it.
    /// The index refers to the ballot list at the start of the round.
    PreferenceExhausted { ballot: usize },
    /// A ballot without any preference.
    EmptyBallot { ballot: usize },
    /// A ballot refers to a candidate position that does not exist.
    InvalidPreference { ballot: usize, preference: u32 },
    /// The vote counts do not add up to the number of ballots.
    InconsistentTally { tallied: u64, ballots: u64 },
    NoConvergence,
}

impl Error for VotingErrors {}

impl Display for VotingErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VotingErrors::DegenerateElection => write!(f, "election has no candidate"),
            VotingErrors::PreferenceExhausted { ballot } => {
                write!(f, "ballot {} has no remaining candidate", ballot)
            }
            VotingErrors::EmptyBallot { ballot } => write!(f, "ballot {} is empty", ballot),
            VotingErrors::InvalidPreference { ballot, preference } => write!(
                f,
                "ballot {} refers to unknown candidate {}",
                ballot, preference
            ),
            VotingErrors::InconsistentTally { tallied, ballots } => write!(
                f,
                "tally counts {} votes for {} ballots",
                tallied, ballots
            ),
            VotingErrors::NoConvergence => write!(f, "elimination did not remove any candidate"),
        }
    }
}

// ********* Configuration **********

/// What happens to a ballot when all the candidates it ranks have been eliminated.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ExhaustedBallotPolicy {
    /// The ballot stops counting. The majority is then computed over the remaining ballots.
    Discard,
    /// The election fails with `VotingErrors::PreferenceExhausted`.
    Fail,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct VoteRules {
    pub exhausted_ballots: ExhaustedBallotPolicy,
}

impl VoteRules {
    pub const DEFAULT_RULES: VoteRules = VoteRules {
        exhausted_ballots: ExhaustedBallotPolicy::Discard,
    };
}

impl Default for VoteRules {
    fn default() -> Self {
        VoteRules::DEFAULT_RULES
    }
}
