use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named security baseline. Ordered from least to most restrictive.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Privileged,
    Baseline,
    Restricted,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Privileged => "privileged",
            Level::Baseline => "baseline",
            Level::Restricted => "restricted",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown level: {0} (expected privileged|baseline|restricted)")]
pub struct ParseLevelError(String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "privileged" => Ok(Level::Privileged),
            "baseline" => Ok(Level::Baseline),
            "restricted" => Ok(Level::Restricted),
            other => Err(ParseLevelError(other.to_string())),
        }
    }
}

/// A policy version: `vMAJOR.MINOR`, or `latest`.
///
/// `Latest` sorts after every release, so resolving at `latest` always picks
/// the newest implementation of a check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Version {
    Release { major: u32, minor: u32 },
    #[default]
    Latest,
}

impl Version {
    pub const fn new(major: u32, minor: u32) -> Self {
        Version::Release { major, minor }
    }

    pub fn is_latest(self) -> bool {
        matches!(self, Version::Latest)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Version::Release { major, minor } => write!(f, "v{major}.{minor}"),
            Version::Latest => f.write_str("latest"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseVersionError {
    #[error("version must start with 'v' or be 'latest': {0}")]
    MissingPrefix(String),
    #[error("version must be of the form vMAJOR.MINOR: {0}")]
    Malformed(String),
}

impl FromStr for Version {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "latest" {
            return Ok(Version::Latest);
        }
        let Some(rest) = s.strip_prefix('v') else {
            return Err(ParseVersionError::MissingPrefix(s.to_string()));
        };
        let Some((major, minor)) = rest.split_once('.') else {
            return Err(ParseVersionError::Malformed(s.to_string()));
        };
        let parse = |part: &str| {
            // Reject signs and leading zeros so each version has one spelling.
            if part.is_empty()
                || !part.bytes().all(|b| b.is_ascii_digit())
                || (part.len() > 1 && part.starts_with('0'))
            {
                return Err(ParseVersionError::Malformed(s.to_string()));
            }
            part.parse::<u32>()
                .map_err(|_| ParseVersionError::Malformed(s.to_string()))
        };
        Ok(Version::new(parse(major)?, parse(minor)?))
    }
}

impl Serialize for Version {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// The level/version pair a pod is evaluated against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct LevelVersion {
    pub level: Level,
    #[schemars(with = "String")]
    pub version: Version,
}

impl LevelVersion {
    pub fn new(level: Level, version: Version) -> Self {
        Self { level, version }
    }
}

impl fmt::Display for LevelVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.level, self.version)
    }
}
