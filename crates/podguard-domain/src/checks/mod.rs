//! Rule checks and the shared helpers they are built from.

use crate::registry::Check;

mod allow_privilege_escalation;
mod capabilities_baseline;
mod capabilities_restricted;
mod host_namespaces;
mod host_path_volumes;
mod host_ports;
mod privileged;
mod restricted_volumes;
mod run_as_non_root;
mod run_as_user;
mod seccomp_profile_restricted;
mod utils;
pub mod violations;
pub mod visit;


/// Every built-in check, in the order checks run and results are folded.
pub fn default_checks() -> Vec<Check> {
    vec![
        // baseline
        privileged::check(),
        host_namespaces::check(),
        host_ports::check(),
        host_path_volumes::check(),
        capabilities_baseline::check(),
        // restricted
        run_as_non_root::check(),
        run_as_user::check(),
        allow_privilege_escalation::check(),
        capabilities_restricted::check(),
        seccomp_profile_restricted::check(),
        restricted_volumes::check(),
    ]
}
