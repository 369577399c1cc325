/*!

This is the long-form manual for `instant_runoff` and `ausvote`.

## Counting rules

Every ballot ranks the candidates by their position (the first candidate
listed has position `1`). Initially, each ballot counts for the candidate it
ranks first. Then the count proceeds in rounds:

1. If one candidate holds strictly more than half of the ballots still
   counting, this candidate wins.
2. Otherwise, if every remaining candidate holds exactly the same number of
   votes, all of them are declared winners, in the order of the input.
3. Otherwise, all the candidates with the lowest number of votes are
   eliminated at once. Each ballot that counted for one of them moves to its
   highest ranked candidate that is still running, and the next round starts.

Ballots that counted for a candidate still running are not touched during
an elimination.

A ballot may run out of candidates, for example when it does not rank all of
them. The `exhaustedBallots` rule controls what happens then:
* `discard` (default): the ballot stops counting. The majority of the next
  rounds is computed over the ballots that still count.
* `fail`: the election stops with an error.

An election without ballots is a complete tie between all its candidates. An
election without candidates is an error.

## Input format

The input is a plain text record:

```text
2

3
John Doe
Jane Smith
Sirchan Sirchan
1 2 3
2 1 3
2 3 1
1 2 3
3 1 2

2
John Doe
Potato Joe
2 1
```

The first line is the number of elections. Each election starts with the
number of candidates, followed by one name per line, and then one ballot per
line until a blank line or the end of the input. A ballot must list exactly
as many positions as there are candidates.

## Output format

The winners of each election are printed one per line. The elections are
separated by a blank line.

```text
John Doe

Potato Joe
```

## Configuration

`ausvote` accepts a configuration file in JSON:

```json
{
  "outputSettings": { "contestName": "Student council" },
  "input": { "filePath": "ballots.txt" },
  "rules": { "exhaustedBallots": "discard" }
}
```

The input path is resolved relative to the configuration file. The command
line flags `--input` and `--exhausted-ballots` take precedence over the
configuration.

The `--summary` flag writes the details of every round (tallies,
eliminations and transfers) in JSON format.

 */
