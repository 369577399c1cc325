// Primitives for reading the plain text election records.

use snafu::prelude::*;

use crate::rcv::*;

/// Why a ballot line was rejected.
#[derive(Debug, Snafu)]
pub enum BallotError {
    #[snafu(display("{token:?} is not a candidate number"))]
    NotANumber {
        source: std::num::ParseIntError,
        token: String,
    },
    #[snafu(display("candidate {preference} is not between 1 and {max}"))]
    OutOfRange { preference: u32, max: usize },
    #[snafu(display("expected {expected} preferences, found {found}"))]
    WrongCount { expected: usize, found: usize },
}

/// One election, as read from the record.
/// Ballots refer to the candidates by their position in the list, starting at 1.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParsedElection {
    pub candidates: Vec<String>,
    pub ballots: Vec<Vec<u32>>,
}

/// Parses a line of whitespace-separated candidate numbers.
pub fn parse_ballot(line: &str, expected_count: usize) -> Result<Vec<u32>, BallotError> {
    let mut ranks: Vec<u32> = Vec::new();
    for token in line.split_whitespace() {
        let preference = token.parse::<u32>().context(NotANumberSnafu { token })?;
        ensure!(
            preference >= 1 && preference as usize <= expected_count,
            OutOfRangeSnafu {
                preference,
                max: expected_count
            }
        );
        ranks.push(preference);
    }
    ensure!(
        ranks.len() == expected_count,
        WrongCountSnafu {
            expected: expected_count,
            found: ranks.len()
        }
    );
    Ok(ranks)
}

fn parse_count(line: &str, lineno: usize) -> RcvResult<usize> {
    line.trim().parse::<usize>().context(InvalidCountSnafu {
        lineno,
        value: line.trim(),
    })
}

fn next_non_blank<'a, I>(lines: &mut I) -> Option<(usize, &'a str)>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    lines.find(|(_, l)| !l.trim().is_empty())
}

/// Reads all the elections of a record.
///
/// The record starts with the number of elections. Each election lists the number of
/// candidates, one name per line, then one ballot per line until a blank line or the end
/// of the input.
pub fn read_elections(input: &str) -> RcvResult<Vec<ParsedElection>> {
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(idx, l)| (idx + 1, l.trim_end()));

    let (lineno, first) = next_non_blank(&mut lines).context(MissingCaseCountSnafu {})?;
    let num_cases = parse_count(first, lineno)?;
    debug!("read_elections: {} elections", num_cases);

    let mut res: Vec<ParsedElection> = Vec::new();
    for case in 1..=num_cases {
        let (lineno, count_line) =
            next_non_blank(&mut lines).context(MissingCandidateCountSnafu { case })?;
        let num_candidates = parse_count(count_line, lineno)?;

        let mut candidates: Vec<String> = Vec::new();
        for _ in 0..num_candidates {
            let (_, name) = lines.next().context(MissingCandidateSnafu { case })?;
            candidates.push(name.to_string());
        }

        let mut ballots: Vec<Vec<u32>> = Vec::new();
        for (lineno, line) in lines.by_ref() {
            if line.trim().is_empty() {
                break;
            }
            let ranks = parse_ballot(line, num_candidates).context(MalformedBallotSnafu { lineno })?;
            ballots.push(ranks);
        }
        debug!(
            "read_elections: election {}: candidates: {:?} ballots: {}",
            case,
            candidates,
            ballots.len()
        );
        res.push(ParsedElection {
            candidates,
            ballots,
        });
    }

    if let Some((lineno, _)) = next_non_blank(&mut lines) {
        warn!(
            "read_elections: ignoring the content after the last election, starting at line {}",
            lineno
        );
    }
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_ballots() {
        assert_eq!(parse_ballot("1 4 5 2 3\n", 5).unwrap(), vec![1, 4, 5, 2, 3]);
        assert_eq!(parse_ballot("  2\t1 ", 2).unwrap(), vec![2, 1]);
        // Repeated candidates are accepted.
        assert_eq!(parse_ballot("3 4 3 2", 4).unwrap(), vec![3, 4, 3, 2]);
    }

    #[test]
    fn reject_malformed_ballots() {
        assert!(matches!(
            parse_ballot("1 2", 3),
            Err(BallotError::WrongCount {
                expected: 3,
                found: 2
            })
        ));
        assert!(matches!(
            parse_ballot("1 2 3 1", 3),
            Err(BallotError::WrongCount {
                expected: 3,
                found: 4
            })
        ));
        assert!(matches!(
            parse_ballot("1 x 3", 3),
            Err(BallotError::NotANumber { .. })
        ));
        assert!(matches!(
            parse_ballot("1 0 3", 3),
            Err(BallotError::OutOfRange {
                preference: 0,
                max: 3
            })
        ));
        assert!(matches!(
            parse_ballot("55 65 100", 3),
            Err(BallotError::OutOfRange { preference: 55, .. })
        ));
        assert!(matches!(
            parse_ballot("1 2", usize::MAX),
            Err(BallotError::WrongCount { found: 2, .. })
        ));
    }

    #[test]
    fn read_multiple_elections() {
        let input = "2\n\n3\nJohn Doe\nJane Smith\nSirchan Sirchan\n3 2 1\n\n2\nJohn Doe\r\nPotato Joe\n2 1\n1 2\n";
        let elections = read_elections(input).unwrap();
        assert_eq!(
            elections,
            vec![
                ParsedElection {
                    candidates: vec![
                        "John Doe".to_string(),
                        "Jane Smith".to_string(),
                        "Sirchan Sirchan".to_string()
                    ],
                    ballots: vec![vec![3, 2, 1]],
                },
                ParsedElection {
                    candidates: vec!["John Doe".to_string(), "Potato Joe".to_string()],
                    ballots: vec![vec![2, 1], vec![1, 2]],
                },
            ]
        );
    }

    #[test]
    fn read_election_without_ballots() {
        let elections = read_elections("1\n\n2\nA\nB").unwrap();
        assert_eq!(elections[0].candidates, vec!["A", "B"]);
        assert!(elections[0].ballots.is_empty());
    }

    #[test]
    fn reject_truncated_records() {
        assert!(matches!(
            read_elections(""),
            Err(RcvError::MissingCaseCount {})
        ));
        assert!(matches!(
            read_elections("two\n"),
            Err(RcvError::InvalidCount { lineno: 1, .. })
        ));
        assert!(matches!(
            read_elections("2\n\n1\nA\n1\n"),
            Err(RcvError::MissingCandidateCount { case: 2 })
        ));
        assert!(matches!(
            read_elections("1\n\n3\nA\nB"),
            Err(RcvError::MissingCandidate { case: 1 })
        ));
        assert!(matches!(
            read_elections("1\n\n2\nA\nB\n1 2\n2\n"),
            Err(RcvError::MalformedBallot { lineno: 7, .. })
        ));
    }

    #[test]
    fn reject_huge_counts() {
        assert!(read_elections("18446744073709551615\n").is_err());
        assert!(read_elections("1\n\n18446744073709551615\nA\n").is_err());
        assert!(matches!(
            read_elections("1\n\n10000000000\nA\nB\n"),
            Err(RcvError::MissingCandidate { case: 1 } | RcvError::InvalidCount { lineno: 3, .. })
        ));
        assert!(matches!(
            read_elections("18446744073709551616\n"),
            Err(RcvError::InvalidCount { lineno: 1, .. })
        ));
    }

    #[test]
    fn keep_leading_spaces_in_names() {
        let elections = read_elections("1\n\n2\n  Kaivan Shah\t\r\nLyee Chong\n1 2\n").unwrap();
        assert_eq!(elections[0].candidates, vec!["  Kaivan Shah", "Lyee Chong"]);
    }
}
