mod config;
pub mod builder;
pub mod manual;
use log::{debug, info, warn};

use std::collections::{HashMap, HashSet};

pub use crate::config::*;

type RoundId = u32;

/// The outcome of evaluating the tally of one round.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum RoundDecision {
    /// The candidate at this index holds a strict majority.
    Majority(usize),
    /// All the remaining candidates share the ballots equally.
    CompleteTie,
    /// Nobody wins this round, some candidates must be eliminated.
    Inconclusive,
}

impl RoundDecision {
    /// The winner set of the round, in candidate order. It is empty for an inconclusive round.
    pub fn winners<'a>(&self, candidates: &'a [Candidate]) -> Vec<&'a Candidate> {
        match self {
            RoundDecision::Majority(idx) => candidates.get(*idx).into_iter().collect(),
            RoundDecision::CompleteTie => candidates.iter().collect(),
            RoundDecision::Inconclusive => Vec::new(),
        }
    }

    pub fn decision(&self) -> Option<Decision> {
        match self {
            RoundDecision::Majority(_) => Some(Decision::Majority),
            RoundDecision::CompleteTie => Some(Decision::CompleteTie),
            RoundDecision::Inconclusive => None,
        }
    }
}

/// Returns the index of the still running candidate that has the given position, if any.
pub fn find_candidate_index(candidates: &[Candidate], preference: u32) -> Option<usize> {
    candidates.iter().position(|c| c.position() == preference)
}

/// Counts the first preference of every ballot.
///
/// The candidates are expected to start with an empty tally.
pub fn tally_first_preferences(
    candidates: &mut [Candidate],
    ballots: &[Ballot],
) -> Result<(), VotingErrors> {
    for (idx, ballot) in ballots.iter().enumerate() {
        let preference = ballot
            .current_preference()
            .ok_or(VotingErrors::EmptyBallot { ballot: idx })?;
        let cidx = find_candidate_index(candidates, preference).ok_or(
            VotingErrors::InvalidPreference {
                ballot: idx,
                preference,
            },
        )?;
        candidates[cidx].record_first_preference();
    }
    Ok(())
}

fn check_tally(candidates: &[Candidate], ballots: &[Ballot]) -> Result<(), VotingErrors> {
    let tallied: u64 = candidates.iter().map(|c| c.vote_count()).sum();
    let num_ballots = ballots.len() as u64;
    if tallied != num_ballots {
        return Err(VotingErrors::InconsistentTally {
            tallied,
            ballots: num_ballots,
        });
    }
    Ok(())
}

/// Decides if the current tally ends the election.
///
/// A candidate wins outright with strictly more than half of the ballots. If nobody does,
/// the round is still decisive when every candidate holds exactly the same number of votes,
/// in which case they are all winners.
pub fn get_winners(
    candidates: &[Candidate],
    ballot_count: u64,
) -> Result<RoundDecision, VotingErrors> {
    if candidates.is_empty() {
        return Err(VotingErrors::DegenerateElection);
    }
    // Every candidate holds the same share of nothing.
    if ballot_count == 0 {
        debug!("get_winners: no ballot, all candidates tie");
        return Ok(RoundDecision::CompleteTie);
    }

    let majority_threshold = ballot_count / 2;
    let num_candidates = candidates.len() as u64;
    let tied_share: Option<u64> = if ballot_count % num_candidates == 0 {
        Some(ballot_count / num_candidates)
    } else {
        None
    };
    debug!(
        "get_winners: majority_threshold: {:?} tied_share: {:?}",
        majority_threshold, tied_share
    );

    let mut num_tied: usize = 0;
    for (idx, c) in candidates.iter().enumerate() {
        if c.vote_count() > majority_threshold {
            return Ok(RoundDecision::Majority(idx));
        }
        if Some(c.vote_count()) == tied_share {
            num_tied += 1;
        }
    }
    if num_tied == candidates.len() {
        Ok(RoundDecision::CompleteTie)
    } else {
        Ok(RoundDecision::Inconclusive)
    }
}

/// Removes all the candidates with the lowest tally and transfers their ballots.
///
/// Every ballot that pointed at an eliminated candidate moves to its next preference that
/// is still running. Ballots that run out of preferences are handled according to
/// the exhausted ballot policy of the rules.
///
/// Returns the transfer statistics for each eliminated candidate, in candidate order.
/// On error, the candidates and the ballots are left untouched.
pub fn eliminate_losers(
    candidates: &mut Vec<Candidate>,
    ballots: &mut Vec<Ballot>,
    rules: &VoteRules,
) -> Result<Vec<EliminationStats>, VotingErrors> {
    let min_count = candidates
        .iter()
        .map(|c| c.vote_count())
        .min()
        .ok_or(VotingErrors::DegenerateElection)?;

    let losers: Vec<(u32, String)> = candidates
        .iter()
        .filter(|c| c.vote_count() == min_count)
        .map(|c| (c.position(), c.name().to_string()))
        .collect();
    debug!(
        "eliminate_losers: min_count: {:?} losers: {:?}",
        min_count, losers
    );
    // Removing everybody would leave the election without a winner.
    if losers.len() == candidates.len() {
        return Err(VotingErrors::NoConvergence);
    }

    let loser_positions: HashSet<u32> = losers.iter().map(|(pos, _)| *pos).collect();

    if rules.exhausted_ballots == ExhaustedBallotPolicy::Fail {
        let running: HashSet<u32> = candidates
            .iter()
            .map(|c| c.position())
            .filter(|pos| !loser_positions.contains(pos))
            .collect();
        let exhausted = ballots.iter().position(|b| match b.current_preference() {
            Some(pref) if loser_positions.contains(&pref) => {
                !b.remaining().iter().any(|p| running.contains(p))
            }
            _ => false,
        });
        if let Some(idx) = exhausted {
            return Err(VotingErrors::PreferenceExhausted { ballot: idx });
        }
    }

    candidates.retain(|c| !loser_positions.contains(&c.position()));

    // For every eliminated position: the ballots received by each remaining position,
    // and the number of exhausted ballots.
    let mut transfers: HashMap<u32, (HashMap<u32, u64>, u64)> = HashMap::new();
    for (idx, ballot) in ballots.iter_mut().enumerate() {
        let old_first = match ballot.current_preference() {
            Some(pref) if loser_positions.contains(&pref) => pref,
            // Still pointing at a running candidate, nothing to transfer.
            _ => continue,
        };

        let mut new_first: Option<usize> = None;
        while let Some(pref) = ballot.next_preference() {
            if let Some(cidx) = find_candidate_index(candidates, pref) {
                new_first = Some(cidx);
                break;
            }
        }

        let e = transfers
            .entry(old_first)
            .or_insert_with(|| (HashMap::new(), 0));
        match new_first {
            Some(cidx) => {
                candidates[cidx].transfer_vote();
                *e.0.entry(candidates[cidx].position()).or_insert(0) += 1;
            }
            None => match rules.exhausted_ballots {
                ExhaustedBallotPolicy::Discard => {
                    e.1 += 1;
                }
                ExhaustedBallotPolicy::Fail => {
                    return Err(VotingErrors::PreferenceExhausted { ballot: idx });
                }
            },
        }
    }

    let num_before = ballots.len();
    ballots.retain(|b| !b.is_exhausted());
    if ballots.len() < num_before {
        warn!(
            "eliminate_losers: discarding {} exhausted ballots",
            num_before - ballots.len()
        );
    }

    let mut stats: Vec<EliminationStats> = Vec::new();
    for (pos, name) in losers {
        let (received, exhausted) = transfers.remove(&pos).unwrap_or_default();
        // Transfers are listed in candidate order.
        let transfers: Vec<(String, u64)> = candidates
            .iter()
            .filter_map(|c| {
                received
                    .get(&c.position())
                    .map(|count| (c.name().to_string(), *count))
            })
            .collect();
        debug!(
            "eliminate_losers: {} -> transfers: {:?} exhausted: {}",
            name, transfers, exhausted
        );
        stats.push(EliminationStats {
            name,
            transfers,
            exhausted,
        });
    }
    Ok(stats)
}

/// Runs the instant-runoff algorithm until a majority winner or a complete tie is found.
///
/// Arguments:
/// * `candidates` the candidates in input order, with their first preferences already tallied
/// * `ballots` the ballots of this election
/// * `rules` the rules that govern this election
pub fn voting_eval(
    candidates: Vec<Candidate>,
    ballots: Vec<Ballot>,
    rules: &VoteRules,
) -> Result<VotingResult, VotingErrors> {
    info!(
        "Processing {:?} ballots, {:?} candidates, rules: {:?}",
        ballots.len(),
        candidates.len(),
        rules
    );
    if candidates.is_empty() {
        return Err(VotingErrors::DegenerateElection);
    }
    for c in candidates.iter() {
        info!("Candidate: {}: {}", c.position(), c.name());
    }

    let mut cur_candidates: Vec<Candidate> = candidates;
    let mut cur_ballots: Vec<Ballot> = ballots;
    let mut round_stats: Vec<RoundStats> = Vec::new();

    loop {
        let round_id = (round_stats.len() + 1) as RoundId;
        check_tally(&cur_candidates, &cur_ballots)?;
        let ballot_count = cur_ballots.len() as u64;
        let tally: Vec<(String, u64)> = cur_candidates
            .iter()
            .map(|c| (c.name().to_string(), c.vote_count()))
            .collect();
        info!(
            "Round id: {:?} ballots: {:?} tally: {:?}",
            round_id, ballot_count, tally
        );

        let round_decision = get_winners(&cur_candidates, ballot_count)?;
        if let Some(decision) = round_decision.decision() {
            let winners: Vec<String> = round_decision
                .winners(&cur_candidates)
                .iter()
                .map(|c| c.name().to_string())
                .collect();
            info!(
                "Round id: {:?} decision: {:?} winners: {:?}",
                round_id, decision, winners
            );
            round_stats.push(RoundStats {
                round: round_id,
                active_ballots: ballot_count,
                tally,
                tally_results_elected: winners.clone(),
                tally_result_eliminated: Vec::new(),
            });
            return Ok(VotingResult {
                winners,
                decision,
                threshold: ballot_count / 2,
                round_stats,
            });
        }

        let num_candidates = cur_candidates.len();
        let eliminated = eliminate_losers(&mut cur_candidates, &mut cur_ballots, rules)?;
        // Invariant: every inconclusive round removes at least one candidate.
        if cur_candidates.len() >= num_candidates {
            return Err(VotingErrors::NoConvergence);
        }
        round_stats.push(RoundStats {
            round: round_id,
            active_ballots: ballot_count,
            tally,
            tally_results_elected: Vec::new(),
            tally_result_eliminated: eliminated,
        });
    }
}
