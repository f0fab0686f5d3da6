//! Clauses and effect schemas.
//!
//! An [`EffectSchema`] is everything statically known about one computation,
//! as an ordered list of [`Clause`]s. A clause `(condition, effect)` reads as
//! a contract does: whenever the computation exhibits `effect`, `condition`
//! held. Clauses are independent of each other; several clauses for the same
//! outcome are combined conservatively (with OR) by the functors.
//!
//! Clause order carries no meaning beyond deterministic output.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::expr::{Constant, Expr, Value};

/// How many times a callable argument is invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvocationKind {
    ExactlyOnce,
    AtLeastOnce,
    AtMostOnce,
    Unknown,
}

impl InvocationKind {
    /// The callable is invoked at least once.
    pub fn is_definitely_visited(self) -> bool {
        matches!(self, InvocationKind::ExactlyOnce | InvocationKind::AtLeastOnce)
    }

    /// The callable may be invoked more than once.
    pub fn can_be_revisited(self) -> bool {
        matches!(self, InvocationKind::Unknown | InvocationKind::AtLeastOnce)
    }
}

impl fmt::Display for InvocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InvocationKind::ExactlyOnce => "EXACTLY_ONCE",
            InvocationKind::AtLeastOnce => "AT_LEAST_ONCE",
            InvocationKind::AtMostOnce => "AT_MOST_ONCE",
            InvocationKind::Unknown => "UNKNOWN",
        };
        f.write_str(name)
    }
}

/// Observable outcome of a computation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Effect {
    /// The computation finishes and returns the value.
    Returns(Value),
    /// The computation invokes `callable` with the given cardinality.
    Calls {
        callable: Value,
        kind: InvocationKind,
    },
}

impl Effect {
    pub fn returns(value: impl Into<Value>) -> Self {
        Effect::Returns(value.into())
    }

    pub fn calls(callable: impl Into<Value>, kind: InvocationKind) -> Self {
        Effect::Calls {
            callable: callable.into(),
            kind,
        }
    }

    /// Value returned, if this is a `Returns` effect.
    pub fn returned_value(&self) -> Option<&Value> {
        match self {
            Effect::Returns(value) => Some(value),
            Effect::Calls { .. } => None,
        }
    }

    /// `Returns` with a concrete (non-wildcard) value: the only effects the
    /// sequential functors know how to combine.
    pub fn is_finishing(&self) -> bool {
        matches!(self, Effect::Returns(value) if !value.is_wildcard())
    }

    /// Whether observing `self` guarantees observing `other`.
    ///
    /// `None` means the two effects are unrelated and nothing can be said.
    pub fn implies(&self, other: &Effect) -> Option<bool> {
        match (self, other) {
            (
                Effect::Calls { callable, kind },
                Effect::Calls {
                    callable: other_callable,
                    kind: other_kind,
                },
            ) => (callable == other_callable).then_some(kind == other_kind),
            (Effect::Returns(value), Effect::Returns(other_value)) => {
                if other_value.is_wildcard() || value == other_value {
                    Some(true)
                } else if value.is_wildcard() {
                    None
                } else {
                    match (value, other_value) {
                        (Value::Constant(_), Value::Constant(_)) => Some(false),
                        _ => None,
                    }
                }
            }
            (Effect::Returns(_), Effect::Calls { .. }) | (Effect::Calls { .. }, Effect::Returns(_)) => {
                None
            }
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::Returns(value) => write!(f, "Returns({})", value),
            Effect::Calls { callable, kind } => write!(f, "CallsInPlace({}, {})", callable, kind),
        }
    }
}

/// "Whenever `effect` is observed, `condition` held."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub condition: Expr,
    pub effect: Effect,
}

impl Clause {
    pub fn new(condition: impl Into<Expr>, effect: Effect) -> Self {
        Self {
            condition: condition.into(),
            effect,
        }
    }

    /// Unconditional clause.
    pub fn always(effect: Effect) -> Self {
        Self::new(Constant::True, effect)
    }

    /// Same condition, different effect.
    pub fn replace_effect(&self, effect: Effect) -> Self {
        Self {
            condition: self.condition.clone(),
            effect,
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.effect, self.condition)
    }
}

/// Ordered clauses describing one computation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectSchema {
    clauses: Vec<Clause>,
}

impl EffectSchema {
    /// The no-information schema.
    pub const EMPTY: EffectSchema = EffectSchema {
        clauses: Vec::new(),
    };

    pub fn new(clauses: Vec<Clause>) -> Self {
        Self { clauses }
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Split into clauses satisfying `finishing` and the rest, keeping order
    /// within each part.
    pub fn partition(&self, finishing: impl Fn(&Effect) -> bool) -> (Vec<Clause>, Vec<Clause>) {
        self.clauses
            .iter()
            .cloned()
            .partition(|clause| finishing(&clause.effect))
    }

    /// Clauses whose effect is `Returns(value)`.
    pub fn returning(&self, value: &Value) -> impl Iterator<Item = &Clause> {
        self.clauses
            .iter()
            .filter(move |clause| clause.effect.returned_value() == Some(value))
    }
}

impl FromIterator<Clause> for EffectSchema {
    fn from_iter<T: IntoIterator<Item = Clause>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for EffectSchema {
    type Item = Clause;
    type IntoIter = std::vec::IntoIter<Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.into_iter()
    }
}

impl fmt::Display for EffectSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.clauses.is_empty() {
            return write!(f, "<no effects>");
        }
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", clause)?;
        }
        Ok(())
    }
}
