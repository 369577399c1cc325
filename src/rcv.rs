use log::{debug, info, warn};

use instant_runoff::builder::Builder;
use instant_runoff::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::rcv::config_reader::*;
use crate::rcv::io_common::{format_result, resolve_output, write_output};
use crate::rcv::io_text::{read_elections, BallotError, ParsedElection};

mod config_reader;
mod io_common;
mod io_text;

#[derive(Debug, Snafu)]
pub enum RcvError {
    #[snafu(display("Error opening input {path}"))]
    OpeningInput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error reading the standard input"))]
    ReadingInput { source: std::io::Error },
    #[snafu(display("Missing the number of elections"))]
    MissingCaseCount {},
    #[snafu(display("Line {lineno}: invalid count {value:?}"))]
    InvalidCount {
        source: std::num::ParseIntError,
        lineno: usize,
        value: String,
    },
    #[snafu(display("Election {case}: missing the number of candidates"))]
    MissingCandidateCount { case: usize },
    #[snafu(display("Election {case}: missing candidate names"))]
    MissingCandidate { case: usize },
    #[snafu(display("Line {lineno}: malformed ballot: {source}"))]
    MalformedBallot { source: BallotError, lineno: usize },
    #[snafu(display("Election {case}: {source}"))]
    Voting { source: VotingErrors, case: usize },
    #[snafu(display("Error opening {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON: {source}"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Difference detected between the output and the reference {path}"))]
    ReferenceMismatch { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

type RcvResult<T> = Result<T, RcvError>;

fn decision_name(decision: Decision) -> &'static str {
    match decision {
        Decision::Majority => "majority",
        Decision::CompleteTie => "completeTie",
    }
}

fn result_stats_to_json(rs: &VotingResult) -> Vec<JSValue> {
    let mut l: Vec<JSValue> = Vec::new();
    for round_stat in rs.round_stats.iter() {
        let mut tally: JSMap<String, JSValue> = JSMap::new();
        for (name, count) in round_stat.tally.iter() {
            tally.insert(name.clone(), json!(count.to_string()));
        }

        let mut tally_results: Vec<JSValue> = Vec::new();
        for elim_stats in round_stat.tally_result_eliminated.iter() {
            let mut transfers: JSMap<String, JSValue> = JSMap::new();
            for (name, count) in elim_stats.transfers.iter() {
                transfers.insert(name.clone(), json!(count.to_string()));
            }
            if elim_stats.exhausted > 0 {
                transfers.insert(
                    "exhausted".to_string(),
                    json!(elim_stats.exhausted.to_string()),
                );
            }
            tally_results.push(json!({
                "eliminated": elim_stats.name,
                "transfers": transfers
            }));
        }
        for winner_name in round_stat.tally_results_elected.iter() {
            tally_results.push(json!({
                "elected": winner_name,
                "transfers": {}
            }));
        }

        let js = json!({"round": round_stat.round, "tally": tally, "tallyResults": tally_results});
        l.push(js);
    }
    l
}

fn build_summary_js(contest: &str, rules: &VoteRules, results: &[VotingResult]) -> JSValue {
    let c = OutputConfig {
        contest: contest.to_string(),
        exhausted_ballots: policy_name(rules.exhausted_ballots).to_string(),
    };
    let elections: Vec<JSValue> = results
        .iter()
        .enumerate()
        .map(|(idx, rv)| {
            json!({
                "case": idx + 1,
                "winners": rv.winners,
                "decision": decision_name(rv.decision),
                "threshold": rv.threshold.to_string(),
                "results": result_stats_to_json(rv)
            })
        })
        .collect();
    json!({
        "config": c,
        "elections": elections })
}

/// Runs one election. The winner names are in `VotingResult::winners`.
pub fn evaluate(
    candidates: &[String],
    ballots: &[Vec<u32>],
    rules: &VoteRules,
) -> Result<VotingResult, VotingErrors> {
    let mut builder = Builder::new(rules)?.candidates(candidates)?;
    for ranks in ballots.iter() {
        builder.add_ballot(ranks)?;
    }
    builder.run()
}

/// Tabulates all the elections of a text record.
///
/// Returns the formatted winners and the detailed result of each election.
pub fn voting_solve(input: &str, rules: &VoteRules) -> RcvResult<(String, Vec<VotingResult>)> {
    let elections: Vec<ParsedElection> = read_elections(input)?;
    info!("Read {} elections", elections.len());

    let mut output = String::new();
    let mut results: Vec<VotingResult> = Vec::new();
    for (idx, election) in elections.iter().enumerate() {
        let case = idx + 1;
        info!(
            "Election {}: {} candidates, {} ballots",
            case,
            election.candidates.len(),
            election.ballots.len()
        );
        let result =
            evaluate(&election.candidates, &election.ballots, rules).context(VotingSnafu { case })?;
        debug!("Election {}: result: {:?}", case, result);
        output.push_str(&format_result(&result.winners, case == elections.len()));
        results.push(result);
    }
    Ok((output, results))
}

fn read_input(path: Option<&Path>) -> RcvResult<String> {
    match path {
        Some(p) => {
            info!("Attempting to read election file {:?}", p);
            fs::read_to_string(p).context(OpeningInputSnafu {
                path: p.display().to_string(),
            })
        }
        None => {
            info!("Reading the election from the standard input");
            let mut contents = String::new();
            std::io::stdin()
                .read_to_string(&mut contents)
                .context(ReadingInputSnafu {})?;
            Ok(contents)
        }
    }
}

fn check_reference(reference_path: &str, output: &str) -> RcvResult<()> {
    let reference = read_reference(reference_path)?;
    if reference != output {
        warn!("Found differences with the reference {}", reference_path);
        print_diff(reference.as_str(), output, "\n");
        return ReferenceMismatchSnafu {
            path: reference_path,
        }
        .fail();
    }
    info!("Output matches the reference {}", reference_path);
    Ok(())
}

pub fn run_election(args: &Args) -> RcvResult<()> {
    let config: Option<RcvConfig> = match args.config.as_deref() {
        Some(config_path) => Some(read_config(config_path)?),
        None => None,
    };
    let config_dir: Option<PathBuf> = args
        .config
        .as_deref()
        .and_then(|p| Path::new(p).parent())
        .map(|p| p.to_path_buf());
    info!("config: {:?}", config);

    // Command line options take precedence over the configuration.
    let mut rcv_rules: RcvRules = config.as_ref().map(|c| c.rules.clone()).unwrap_or_default();
    if let Some(policy) = args.exhausted_ballots.clone() {
        rcv_rules.exhausted_ballots = Some(policy);
    }
    let rules = validate_rules(&rcv_rules)?;

    let config_source: Option<&InputSource> = config.as_ref().and_then(|c| c.input.as_ref());
    let input_path: Option<PathBuf> = match (&args.input, config_source) {
        (Some(p), _) => Some(PathBuf::from(p)),
        (None, Some(source)) => {
            let root = config_dir.clone().unwrap_or_default();
            Some(root.join(&source.file_path))
        }
        (None, None) => None,
    };
    let contents = read_input(input_path.as_deref())?;

    let (output, results) = voting_solve(&contents, &rules)?;

    let output_dir: Option<&str> = config
        .as_ref()
        .and_then(|c| c.output_settings.output_directory.as_deref());
    let out_dest = resolve_output(output_dir, args.out.as_deref().unwrap_or("stdout"));
    write_output(&out_dest, &output)?;

    if let Some(summary_dest) = args.summary.as_deref() {
        let contest = config
            .as_ref()
            .map(|c| c.output_settings.contest_name.clone())
            .unwrap_or_default();
        let summary_js = build_summary_js(&contest, &rules, &results);
        let pretty_js = serde_json::to_string_pretty(&summary_js).context(ParsingJsonSnafu {})?;
        write_output(&resolve_output(output_dir, summary_dest), &pretty_js)?;
    }

    if let Some(reference_path) = args.reference.as_deref() {
        check_reference(reference_path, &output)?;
    }

    Ok(())
}
