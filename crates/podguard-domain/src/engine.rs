use crate::model::{PodMetadata, PodSpec};
use crate::policy::CheckOptions;
use crate::registry::CheckRegistry;
use podguard_types::{AggregateCheckResult, LevelVersion};
use tracing::{debug, trace};

/// Run every check `level_version` requires and fold the results.
///
/// No short-circuit: a forbidden pod reports every failing check, in
/// registry declaration order.
pub fn evaluate(
    registry: &CheckRegistry,
    level_version: LevelVersion,
    metadata: &PodMetadata,
    spec: &PodSpec,
    opts: &CheckOptions,
) -> AggregateCheckResult {
    let resolved = registry.checks_for(level_version);
    if tracing::enabled!(tracing::Level::TRACE) {
        for check in registry.iter() {
            if !resolved.iter().any(|r| r.id == check.id) {
                trace!(check = check.id, %level_version, "check not applicable");
            }
        }
    }

    let mut aggregate = AggregateCheckResult::default();
    for check in &resolved {
        let result = check.versioned.check_pod.check(metadata, spec, opts);
        debug!(
            check = check.id,
            minimum_version = %check.versioned.minimum_version,
            allowed = result.allowed,
            "evaluated check"
        );
        aggregate.push(result);
    }

    debug!(
        pod = %metadata.name,
        %level_version,
        checks = resolved.len(),
        allowed = aggregate.allowed,
        "evaluated pod"
    );
    aggregate
}
