use clap::Parser;

/// This is an instant-runoff tabulation program for plain text election records.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A configuration file in JSON format. See the manual for the
    /// available options.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,
    /// (file path) A reference file containing the expected winners. If provided, ausvote will
    /// check that the tabulated output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path or 'stdout', default stdout) Where the winners of each election are written.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path or empty) The election record to tabulate. The standard input is read if
    /// neither this option nor the configuration file provide one.
    /// Setting this option overrides the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the details of every round will be written
    /// in JSON format to the given location.
    #[clap(long, value_parser)]
    pub summary: Option<String>,

    /// (discard or fail, default discard) What to do with a ballot when all its candidates
    /// have been eliminated.
    #[clap(long, value_parser)]
    pub exhausted_ballots: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard error.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
