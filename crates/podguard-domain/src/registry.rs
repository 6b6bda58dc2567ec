//! Versioned check registry.
//!
//! Each check keeps every historical implementation tagged with the version
//! that introduced it. Evaluating at version `t` uses the newest
//! implementation introduced at or before `t`, so an audit pinned to an old
//! version keeps that version's behavior after stricter variants are added.

use crate::model::{PodMetadata, PodSpec};
use crate::policy::CheckOptions;
use podguard_types::{CheckResult, Level, LevelVersion, Version};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A single check implementation.
pub trait PodCheck: Send + Sync {
    fn check(&self, metadata: &PodMetadata, spec: &PodSpec, opts: &CheckOptions) -> CheckResult;
}

impl<F> PodCheck for F
where
    F: Fn(&PodMetadata, &PodSpec, &CheckOptions) -> CheckResult + Send + Sync,
{
    fn check(&self, metadata: &PodMetadata, spec: &PodSpec, opts: &CheckOptions) -> CheckResult {
        self(metadata, spec, opts)
    }
}

pub struct VersionedCheck {
    pub minimum_version: Version,
    pub check_pod: Box<dyn PodCheck>,
    /// Check IDs this implementation supersedes when both apply.
    pub overrides: Vec<&'static str>,
}

impl VersionedCheck {
    pub fn new(minimum_version: Version, check_pod: impl PodCheck + 'static) -> Self {
        Self {
            minimum_version,
            check_pod: Box::new(check_pod),
            overrides: Vec::new(),
        }
    }

    pub fn overriding(mut self, check_ids: &[&'static str]) -> Self {
        self.overrides.extend_from_slice(check_ids);
        self
    }
}

impl fmt::Debug for VersionedCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VersionedCheck")
            .field("minimum_version", &self.minimum_version)
            .field("overrides", &self.overrides)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct Check {
    pub id: &'static str,
    pub level: Level,
    /// Ordered by strictly increasing `minimum_version`.
    pub versions: Vec<VersionedCheck>,
}

impl Check {
    /// Newest implementation introduced at or before `version`, or `None` if
    /// the check did not exist yet.
    pub fn resolve(&self, version: Version) -> Option<&VersionedCheck> {
        self.versions
            .iter()
            .rev()
            .find(|v| v.minimum_version <= version)
    }
}

/// A check resolved for one level/version.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedCheck<'r> {
    pub id: &'static str,
    pub level: Level,
    pub versioned: &'r VersionedCheck,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("check {0} has no versions")]
    NoVersions(&'static str),
    #[error("check {0} is registered more than once")]
    DuplicateCheck(&'static str),
    #[error("check {id}: version {next} must be greater than {previous}")]
    VersionsNotIncreasing {
        id: &'static str,
        previous: Version,
        next: Version,
    },
    #[error("check {0}: 'latest' cannot be a minimum version")]
    LatestAsMinimum(&'static str),
    #[error("check {id}: level {level} cannot carry checks")]
    UnenforceableLevel { id: &'static str, level: Level },
    #[error("check {id} overrides unknown check {overridden}")]
    UnknownOverride {
        id: &'static str,
        overridden: &'static str,
    },
    #[error("unknown check: {0}")]
    UnknownCheck(String),
}

/// Immutable once built; safe to share across threads.
#[derive(Debug)]
pub struct CheckRegistry {
    checks: Vec<Check>,
    by_id: BTreeMap<&'static str, usize>,
}

impl CheckRegistry {
    /// Validate and index `checks`. Declaration order is kept: it is the order
    /// checks run in and the order their results are folded.
    pub fn new(checks: Vec<Check>) -> Result<Self, RegistryError> {
        let mut by_id = BTreeMap::new();
        for (pos, check) in checks.iter().enumerate() {
            validate_check(check)?;
            if by_id.insert(check.id, pos).is_some() {
                return Err(RegistryError::DuplicateCheck(check.id));
            }
        }
        for check in &checks {
            for versioned in &check.versions {
                if let Some(missing) = versioned
                    .overrides
                    .iter()
                    .find(|o| !by_id.contains_key(*o))
                {
                    return Err(RegistryError::UnknownOverride {
                        id: check.id,
                        overridden: *missing,
                    });
                }
            }
        }
        Ok(Self { checks, by_id })
    }

    pub fn get(&self, id: &str) -> Option<&Check> {
        self.by_id.get(id).map(|&pos| &self.checks[pos])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Check> {
        self.checks.iter()
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Resolve a named check at `version`.
    ///
    /// `Ok(None)` means the check is not applicable yet at that version.
    pub fn resolve(
        &self,
        id: &str,
        version: Version,
    ) -> Result<Option<&VersionedCheck>, RegistryError> {
        let check = self
            .get(id)
            .ok_or_else(|| RegistryError::UnknownCheck(id.to_string()))?;
        Ok(check.resolve(version))
    }

    /// Every check a level runs at a version, in declaration order.
    ///
    /// Includes checks of all lower levels, skips checks not introduced yet
    /// and checks superseded by another resolved check.
    pub fn checks_for(&self, level_version: LevelVersion) -> Vec<ResolvedCheck<'_>> {
        if level_version.level == Level::Privileged {
            return Vec::new();
        }
        let applicable: Vec<ResolvedCheck<'_>> = self
            .checks
            .iter()
            .filter(|c| c.level <= level_version.level)
            .filter_map(|c| {
                c.resolve(level_version.version).map(|versioned| ResolvedCheck {
                    id: c.id,
                    level: c.level,
                    versioned,
                })
            })
            .collect();
        let overridden: BTreeSet<&'static str> = applicable
            .iter()
            .flat_map(|r| r.versioned.overrides.iter().copied())
            .collect();
        applicable
            .into_iter()
            .filter(|r| !overridden.contains(r.id))
            .collect()
    }
}

fn validate_check(check: &Check) -> Result<(), RegistryError> {
    if check.level == Level::Privileged {
        return Err(RegistryError::UnenforceableLevel {
            id: check.id,
            level: check.level,
        });
    }
    let Some(first) = check.versions.first() else {
        return Err(RegistryError::NoVersions(check.id));
    };
    if check.versions.iter().any(|v| v.minimum_version.is_latest()) {
        return Err(RegistryError::LatestAsMinimum(check.id));
    }
    let mut previous = first.minimum_version;
    for next in check.versions.iter().skip(1).map(|v| v.minimum_version) {
        if next <= previous {
            return Err(RegistryError::VersionsNotIncreasing {
                id: check.id,
                previous,
                next,
            });
        }
        previous = next;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(tag: &'static str) -> impl PodCheck + 'static {
        move |_: &PodMetadata, _: &PodSpec, _: &CheckOptions| CheckResult::forbidden(tag, tag)
    }

    fn versions(list: &[(u32, u32, &'static str)]) -> Vec<VersionedCheck> {
        list.iter()
            .map(|&(major, minor, tag)| VersionedCheck::new(Version::new(major, minor), tagged(tag)))
            .collect()
    }

    fn run(v: &VersionedCheck) -> String {
        v.check_pod
            .check(&PodMetadata::default(), &PodSpec::default(), &CheckOptions::default())
            .forbidden_reason
    }

    fn registry() -> CheckRegistry {
        CheckRegistry::new(vec![
            Check {
                id: "base",
                level: Level::Baseline,
                versions: versions(&[(1, 0, "base-1.0")]),
            },
            Check {
                id: "strict",
                level: Level::Restricted,
                versions: versions(&[(1, 8, "strict-1.8"), (1, 25, "strict-1.25")]),
            },
        ])
        .unwrap()
    }

    #[test]
    fn resolves_latest_implementation_at_or_before_target() {
        let reg = registry();
        let at = |major, minor| reg.resolve("strict", Version::new(major, minor)).unwrap();

        assert!(at(1, 7).is_none());
        assert_eq!(run(at(1, 8).unwrap()), "strict-1.8");
        assert_eq!(run(at(1, 24).unwrap()), "strict-1.8");
        assert_eq!(run(at(1, 25).unwrap()), "strict-1.25");
        assert_eq!(run(at(2, 0).unwrap()), "strict-1.25");

        let latest = reg.resolve("strict", Version::Latest).unwrap().unwrap();
        assert_eq!(run(latest), "strict-1.25");
    }

    #[test]
    fn unknown_check_is_an_error() {
        let err = registry().resolve("nope", Version::Latest).unwrap_err();
        assert_eq!(err, RegistryError::UnknownCheck("nope".to_string()));
    }

    #[test]
    fn levels_include_lower_levels() {
        let reg = registry();
        let ids = |level, version| -> Vec<&'static str> {
            reg.checks_for(LevelVersion::new(level, version))
                .iter()
                .map(|r| r.id)
                .collect()
        };
        assert!(ids(Level::Privileged, Version::Latest).is_empty());
        assert_eq!(ids(Level::Baseline, Version::Latest), vec!["base"]);
        assert_eq!(ids(Level::Restricted, Version::Latest), vec!["base", "strict"]);
        assert_eq!(ids(Level::Restricted, Version::new(1, 0)), vec!["base"]);
    }

    #[test]
    fn overrides_remove_superseded_checks() {
        let reg = CheckRegistry::new(vec![
            Check {
                id: "narrow",
                level: Level::Baseline,
                versions: versions(&[(1, 0, "narrow")]),
            },
            Check {
                id: "wide",
                level: Level::Restricted,
                versions: vec![
                    VersionedCheck::new(Version::new(1, 0), tagged("wide")).overriding(&["narrow"]),
                ],
            },
        ])
        .unwrap();

        let restricted: Vec<&'static str> = reg
            .checks_for(LevelVersion::new(Level::Restricted, Version::Latest))
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(restricted, vec!["wide"]);

        let baseline: Vec<&'static str> = reg
            .checks_for(LevelVersion::new(Level::Baseline, Version::Latest))
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(baseline, vec!["narrow"]);
    }

    #[test]
    fn rejects_invalid_registrations() {
        let dup = CheckRegistry::new(vec![
            Check {
                id: "a",
                level: Level::Baseline,
                versions: versions(&[(1, 0, "a")]),
            },
            Check {
                id: "a",
                level: Level::Baseline,
                versions: versions(&[(1, 0, "a")]),
            },
        ]);
        assert_eq!(dup.unwrap_err(), RegistryError::DuplicateCheck("a"));

        let unordered = CheckRegistry::new(vec![Check {
            id: "a",
            level: Level::Baseline,
            versions: versions(&[(1, 5, "x"), (1, 5, "y")]),
        }]);
        assert!(matches!(
            unordered.unwrap_err(),
            RegistryError::VersionsNotIncreasing { id: "a", .. }
        ));

        let empty = CheckRegistry::new(vec![Check {
            id: "a",
            level: Level::Baseline,
            versions: Vec::new(),
        }]);
        assert_eq!(empty.unwrap_err(), RegistryError::NoVersions("a"));

        let privileged = CheckRegistry::new(vec![Check {
            id: "a",
            level: Level::Privileged,
            versions: versions(&[(1, 0, "a")]),
        }]);
        assert!(matches!(
            privileged.unwrap_err(),
            RegistryError::UnenforceableLevel { .. }
        ));

        let latest = CheckRegistry::new(vec![Check {
            id: "a",
            level: Level::Baseline,
            versions: vec![VersionedCheck::new(Version::Latest, tagged("a"))],
        }]);
        assert_eq!(latest.unwrap_err(), RegistryError::LatestAsMinimum("a"));

        let dangling = CheckRegistry::new(vec![Check {
            id: "a",
            level: Level::Baseline,
            versions: vec![VersionedCheck::new(Version::new(1, 0), tagged("a")).overriding(&["ghost"])],
        }]);
        assert_eq!(
            dangling.unwrap_err(),
            RegistryError::UnknownOverride {
                id: "a",
                overridden: "ghost"
            }
        );
    }
}
