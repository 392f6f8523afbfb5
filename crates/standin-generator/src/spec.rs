//! Declarative entity specifications.
//!
//! An [`EntitySpec`] names one kind of entity and lists its fields in
//! declaration order, each with a [`FieldKind`] saying how the value is
//! produced. Order matters: derived fields read the partially built
//! record, so they must appear after the fields they depend on. A spec
//! can also carry named invariants that every finished record must
//! satisfy.

use standin_core::{FieldValue, Record};
use std::fmt;
use std::sync::Arc;

/// Closure that derives a field value from the partially built record.
pub type DeriveFn = Arc<dyn Fn(&Record) -> FieldValue + Send + Sync>;

/// Cross-field predicate evaluated against finished records.
pub type InvariantFn = Arc<dyn Fn(&Record) -> bool + Send + Sync>;

/// How a single field's value is produced.
#[derive(Clone)]
pub enum FieldKind {
    /// Random UUID v4 rendered as text
    Uuid,
    /// `start + index`, unique by construction
    Sequential { start: i64 },
    /// Text pattern with `{index}`, `{uuid}` and `{rand:N}` placeholders
    Pattern { pattern: String },
    /// Random integer in `[min, max]`
    IntBetween { min: i64, max: i64 },
    /// Random float in `[min, max]` rounded to `decimals` digits
    FloatBetween { min: f64, max: f64, decimals: u8 },
    /// One label drawn with probability proportional to its weight
    WeightedChoice { choices: Vec<(String, f64)> },
    /// Datetime uniformly sampled from the last `days_ago` days
    RecentDate { days_ago: u32 },
    /// Boolean that is true with probability `true_weight`
    Bool { true_weight: f64 },
    /// Uniform draw from a fixed set of values
    OneOf { values: Vec<FieldValue> },
    /// Array of unique samples from a string pool
    SampleArray {
        pool: Vec<String>,
        min_len: usize,
        max_len: usize,
    },
    /// The same value for every record
    Static { value: FieldValue },
    /// Inner kind with probability `present`, otherwise null
    Optional { present: f64, inner: Box<FieldKind> },
    /// Computed from previously generated fields of the same record
    Derived(DeriveFn),
}

impl FieldKind {
    pub fn uuid() -> Self {
        Self::Uuid
    }

    pub fn sequential(start: i64) -> Self {
        Self::Sequential { start }
    }

    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
        }
    }

    pub fn int_between(min: i64, max: i64) -> Self {
        Self::IntBetween { min, max }
    }

    pub fn float_between(min: f64, max: f64, decimals: u8) -> Self {
        Self::FloatBetween { min, max, decimals }
    }

    pub fn weighted(choices: &[(&str, f64)]) -> Self {
        Self::WeightedChoice {
            choices: choices
                .iter()
                .map(|(label, weight)| (label.to_string(), *weight))
                .collect(),
        }
    }

    pub fn recent_date(days_ago: u32) -> Self {
        Self::RecentDate { days_ago }
    }

    pub fn bool_weighted(true_weight: f64) -> Self {
        Self::Bool { true_weight }
    }

    pub fn one_of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FieldValue>,
    {
        Self::OneOf {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn sample_array(pool: &[&str], min_len: usize, max_len: usize) -> Self {
        Self::SampleArray {
            pool: pool.iter().map(|s| s.to_string()).collect(),
            min_len,
            max_len,
        }
    }

    pub fn fixed(value: impl Into<FieldValue>) -> Self {
        Self::Static {
            value: value.into(),
        }
    }

    pub fn optional(present: f64, inner: FieldKind) -> Self {
        Self::Optional {
            present,
            inner: Box::new(inner),
        }
    }

    pub fn derived(f: impl Fn(&Record) -> FieldValue + Send + Sync + 'static) -> Self {
        Self::Derived(Arc::new(f))
    }
}

impl fmt::Debug for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uuid => write!(f, "Uuid"),
            Self::Sequential { start } => write!(f, "Sequential {{ start: {start} }}"),
            Self::Pattern { pattern } => write!(f, "Pattern {{ pattern: {pattern:?} }}"),
            Self::IntBetween { min, max } => {
                write!(f, "IntBetween {{ min: {min}, max: {max} }}")
            }
            Self::FloatBetween { min, max, decimals } => write!(
                f,
                "FloatBetween {{ min: {min}, max: {max}, decimals: {decimals} }}"
            ),
            Self::WeightedChoice { choices } => {
                write!(f, "WeightedChoice {{ choices: {choices:?} }}")
            }
            Self::RecentDate { days_ago } => {
                write!(f, "RecentDate {{ days_ago: {days_ago} }}")
            }
            Self::Bool { true_weight } => write!(f, "Bool {{ true_weight: {true_weight} }}"),
            Self::OneOf { values } => write!(f, "OneOf {{ values: {values:?} }}"),
            Self::SampleArray {
                pool,
                min_len,
                max_len,
            } => write!(
                f,
                "SampleArray {{ pool: {pool:?}, min_len: {min_len}, max_len: {max_len} }}"
            ),
            Self::Static { value } => write!(f, "Static {{ value: {value:?} }}"),
            Self::Optional { present, inner } => {
                write!(f, "Optional {{ present: {present}, inner: {inner:?} }}")
            }
            Self::Derived(_) => write!(f, "Derived(..)"),
        }
    }
}

/// A named field and how to fill it.
#[derive(Debug, Clone)]
pub struct FieldDef {
    pub name: String,
    pub kind: FieldKind,
    pub unique: bool,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            unique: false,
        }
    }

    /// Mark the field unique: generation retries until the value is fresh.
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }
}

/// A named cross-field predicate.
#[derive(Clone)]
pub struct Invariant {
    name: String,
    check: InvariantFn,
}

impl Invariant {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn holds(&self, record: &Record) -> bool {
        (self.check)(record)
    }
}

impl fmt::Debug for Invariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invariant({:?})", self.name)
    }
}

/// Ordered description of one entity kind.
#[derive(Debug, Clone)]
pub struct EntitySpec {
    name: String,
    id: FieldDef,
    fields: Vec<FieldDef>,
    invariants: Vec<Invariant>,
}

impl EntitySpec {
    /// Create a spec with a UUID v4 id field. Override with [`EntitySpec::id`].
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: FieldDef::new("id", FieldKind::Uuid).unique(),
            fields: Vec::new(),
            invariants: Vec::new(),
        }
    }

    /// Replace how the id field is produced. Ids are always unique.
    pub fn id(mut self, kind: FieldKind) -> Self {
        self.id = FieldDef::new("id", kind).unique();
        self
    }

    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldDef::new(name, kind));
        self
    }

    pub fn unique_field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldDef::new(name, kind).unique());
        self
    }

    /// Add a field computed from the fields declared before it.
    pub fn derived(
        mut self,
        name: impl Into<String>,
        f: impl Fn(&Record) -> FieldValue + Send + Sync + 'static,
    ) -> Self {
        self.fields
            .push(FieldDef::new(name, FieldKind::derived(f)));
        self
    }

    /// Register a predicate every generated record must satisfy.
    pub fn invariant(
        mut self,
        name: impl Into<String>,
        check: impl Fn(&Record) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.invariants.push(Invariant {
            name: name.into(),
            check: Arc::new(check),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id_def(&self) -> &FieldDef {
        &self.id
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn invariants(&self) -> &[Invariant] {
        &self.invariants
    }

    /// Field names in generation order, id first.
    pub fn field_names(&self) -> Vec<&str> {
        let mut names = Vec::with_capacity(self.fields.len() + 1);
        names.push(self.id.name.as_str());
        names.extend(self.fields.iter().map(|def| def.name.as_str()));
        names
    }
}
