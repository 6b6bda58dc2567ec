//! Violation aggregation and message composition.
//!
//! A check records one [`Violation`] per offending scope/field. Both outputs
//! of the check are derived from that list: the detail prose (grouped and
//! pluralized) and, on request, one [`FieldError`] per violation.

use crate::checks::utils::{join_quote, pluralize, value_text};
use crate::checks::visit::Scope;
use crate::policy::CheckOptions;
use podguard_types::{CheckResult, ErrorType, FieldError, FieldPath};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// An explicit value is disallowed.
    Forbidden,
    /// A compliant value must be set explicitly but is absent.
    Required,
}

impl ViolationKind {
    /// Sentence order used by [`Violations::compose`]: explicit bad values
    /// before missing ones.
    pub const DEFAULT_ORDER: [ViolationKind; 2] =
        [ViolationKind::Forbidden, ViolationKind::Required];
}

impl From<ViolationKind> for ErrorType {
    fn from(kind: ViolationKind) -> Self {
        match kind {
            ViolationKind::Forbidden => ErrorType::Forbidden,
            ViolationKind::Required => ErrorType::Required,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Violation<'a> {
    pub scope: Scope<'a>,
    pub kind: ViolationKind,
    pub field: FieldPath,
    pub bad_value: Value,
}

#[derive(Clone, Debug, Default)]
pub struct Violations<'a> {
    items: Vec<Violation<'a>>,
}

impl<'a> Violations<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn forbid(&mut self, scope: Scope<'a>, field: FieldPath, bad_value: impl Into<Value>) {
        self.items.push(Violation {
            scope,
            kind: ViolationKind::Forbidden,
            field,
            bad_value: bad_value.into(),
        });
    }

    pub fn require(&mut self, scope: Scope<'a>, field: FieldPath) {
        self.items.push(Violation {
            scope,
            kind: ViolationKind::Required,
            field,
            bad_value: Value::String(String::new()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation<'a>> {
        self.items.iter()
    }

    /// One group per violation kind present, in [`ViolationKind::DEFAULT_ORDER`].
    pub fn groups(&self) -> Vec<Group<'a>> {
        self.groups_in(&ViolationKind::DEFAULT_ORDER)
    }

    /// One group per kind present, in the given kind order. Kinds missing
    /// from `order` are left out.
    pub fn groups_in(&self, order: &[ViolationKind]) -> Vec<Group<'a>> {
        order
            .iter()
            .filter_map(|&kind| {
                let mut group = Group::new(kind);
                for v in self.items.iter().filter(|v| v.kind == kind) {
                    group.add(v);
                }
                (!group.subjects.is_empty()).then_some(group)
            })
            .collect()
    }

    /// Every violating scope regardless of kind.
    pub fn subjects(&self) -> Subjects<'a> {
        let mut subjects = Subjects::default();
        for v in &self.items {
            subjects.add(v.scope);
        }
        subjects
    }

    /// Render one sentence per group, newline-separated.
    pub fn compose(&self, sentence: impl Fn(&Group<'a>) -> String) -> String {
        self.compose_in(&ViolationKind::DEFAULT_ORDER, sentence)
    }

    pub fn compose_in(
        &self,
        order: &[ViolationKind],
        sentence: impl Fn(&Group<'a>) -> String,
    ) -> String {
        self.groups_in(order)
            .iter()
            .map(sentence)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn field_errors(&self) -> Vec<FieldError> {
        self.items
            .iter()
            .map(|v| FieldError {
                error_type: v.kind.into(),
                field: v.field.clone(),
                bad_value: v.bad_value.clone(),
            })
            .collect()
    }

    /// Allowed iff nothing was recorded.
    pub fn into_result(self, reason: &str, detail: String, opts: &CheckOptions) -> CheckResult {
        if self.items.is_empty() {
            return CheckResult::allowed();
        }
        let errors = opts.with_field_errors.then(|| self.field_errors());
        CheckResult::forbidden(reason, detail).with_field_errors(errors)
    }
}

/// Violations of one kind, merged by subject.
#[derive(Clone, Debug)]
pub struct Group<'a> {
    pub kind: ViolationKind,
    pub subjects: Subjects<'a>,
    values: BTreeSet<String>,
}

impl<'a> Group<'a> {
    fn new(kind: ViolationKind) -> Self {
        Self {
            kind,
            subjects: Subjects::default(),
            values: BTreeSet::new(),
        }
    }

    fn add(&mut self, v: &Violation<'a>) {
        self.subjects.add(v.scope);
        self.values.insert(value_text(&v.bad_value));
    }

    /// Distinct bad values of the group, sorted.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }
}

/// The scopes named in one sentence, in traversal order, without repeats.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Subjects<'a> {
    pod: bool,
    containers: Vec<Scope<'a>>,
    volumes: Vec<Scope<'a>>,
}

impl<'a> Subjects<'a> {
    fn add(&mut self, scope: Scope<'a>) {
        let list = match scope {
            Scope::Pod => {
                self.pod = true;
                return;
            }
            Scope::Container { .. } => &mut self.containers,
            Scope::Volume { .. } => &mut self.volumes,
        };
        if !list.contains(&scope) {
            list.push(scope);
        }
    }

    pub fn len(&self) -> usize {
        usize::from(self.pod) + self.containers.len() + self.volumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render as a joint "pod or containers ..." subject for requirements
    /// that either the pod or each listed container could satisfy.
    pub fn or_pod(&self) -> JointSubjects<'_, 'a> {
        JointSubjects(self)
    }

    fn names(list: &[Scope<'a>]) -> Vec<&'a str> {
        list.iter()
            .filter_map(|s| match s {
                Scope::Container { name, .. } | Scope::Volume { name, .. } => Some(*name),
                Scope::Pod => None,
            })
            .collect()
    }

    fn noun_phrase(singular: &str, plural: &str, list: &[Scope<'a>]) -> Option<String> {
        if list.is_empty() {
            return None;
        }
        Some(format!(
            "{} {}",
            pluralize(singular, plural, list.len()),
            join_quote(Self::names(list))
        ))
    }
}

impl fmt::Display for Subjects<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if self.pod {
            parts.push("pod".to_string());
        }
        parts.extend(Self::noun_phrase("container", "containers", &self.containers));
        parts.extend(Self::noun_phrase("volume", "volumes", &self.volumes));
        f.write_str(&parts.join(" and "))
    }
}

pub struct JointSubjects<'s, 'a>(&'s Subjects<'a>);

impl fmt::Display for JointSubjects<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match Subjects::noun_phrase("container", "containers", &self.0.containers) {
            Some(containers) => write!(f, "pod or {containers}"),
            None => f.write_str("pod"),
        }
    }
}
