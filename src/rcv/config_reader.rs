use crate::rcv::*;

use serde::{Deserialize, Serialize};

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputSettings {
    #[serde(rename = "contestName")]
    pub contest_name: String,
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
}

/// The configuration echoed at the top of the JSON summary.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub contest: String,
    #[serde(rename = "exhaustedBallots")]
    pub exhausted_ballots: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct InputSource {
    #[serde(rename = "filePath")]
    pub file_path: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct RcvRules {
    #[serde(rename = "exhaustedBallots")]
    pub exhausted_ballots: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RcvConfig {
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    pub input: Option<InputSource>,
    #[serde(default)]
    pub rules: RcvRules,
}

pub fn read_config(path: &str) -> RcvResult<RcvConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read config: {:?}", contents);
    let config: RcvConfig = serde_json::from_str(&contents).context(ParsingJsonSnafu {})?;
    Ok(config)
}

pub fn read_reference(path: &str) -> RcvResult<String> {
    fs::read_to_string(path).context(OpeningInputSnafu { path })
}

pub fn policy_name(policy: ExhaustedBallotPolicy) -> &'static str {
    match policy {
        ExhaustedBallotPolicy::Discard => "discard",
        ExhaustedBallotPolicy::Fail => "fail",
    }
}

pub fn validate_rules(rcv_rules: &RcvRules) -> RcvResult<VoteRules> {
    let res = VoteRules {
        exhausted_ballots: match rcv_rules.exhausted_ballots.as_deref() {
            None | Some("discard") => ExhaustedBallotPolicy::Discard,
            Some("fail") => ExhaustedBallotPolicy::Fail,
            Some(x) => {
                whatever!(
                    "Cannot use exhausted ballot policy {:?}: expected discard or fail",
                    x
                )
            }
        },
    };
    Ok(res)
}
