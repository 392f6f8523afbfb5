//! Batch generation of entity records.
//!
//! A [`Generator`] walks an [`EntitySpec`] field by field, evaluating each
//! [`FieldKind`] against an owned seeded RNG. Derived fields see the
//! partially built record, and unique fields retry until the value is
//! fresh across everything this generator has produced.

use crate::random;
use crate::spec::{EntitySpec, FieldDef, FieldKind};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use standin_core::{ConfigError, FieldValue, Record};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Attempts per unique field before generation gives up.
const MAX_UNIQUE_ATTEMPTS: u32 = 100;

/// Errors that can occur during record generation.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// A field kind was configured with an impossible primitive
    #[error("field configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A unique field ran out of fresh values
    #[error("no unique value for field '{field}' after {attempts} attempts")]
    UniqueExhausted {
        /// Field that exhausted its value space
        field: String,
        /// How many draws were tried
        attempts: u32,
    },
}

/// Spec-driven record generator with reproducible output.
///
/// The generator owns its RNG, so two generators built from the same spec
/// and seed produce identical batches. Values already handed out for
/// unique fields are remembered for the generator's whole lifetime.
pub struct Generator {
    spec: EntitySpec,
    rng: StdRng,
    index: u64,
    seen: HashMap<String, HashSet<String>>,
}

impl Generator {
    /// Create a generator for `spec` seeded with `seed`.
    pub fn new(spec: EntitySpec, seed: u64) -> Self {
        Self {
            spec,
            rng: StdRng::seed_from_u64(seed),
            index: 0,
            seen: HashMap::new(),
        }
    }

    /// The spec this generator draws from.
    pub fn spec(&self) -> &EntitySpec {
        &self.spec
    }

    /// Index the next record will carry.
    pub fn current_index(&self) -> u64 {
        self.index
    }

    /// Generate the next record and advance the index.
    pub fn next_record(&mut self) -> Result<Record, GeneratorError> {
        let Self {
            spec,
            rng,
            index,
            seen,
        } = self;

        let mut record = Record::new(*index, FieldValue::Null, HashMap::new());
        record.id = value_for(spec.id_def(), rng, *index, &record, seen)?;
        for def in spec.fields() {
            let value = value_for(def, rng, *index, &record, seen)?;
            record.fields.insert(def.name.clone(), value);
        }

        *index += 1;
        Ok(record)
    }

    /// Generate a batch of `count` records.
    ///
    /// Debug builds check every record against the spec's invariants and
    /// panic on a violation, since a failing invariant means the spec
    /// itself is wrong.
    pub fn generate(&mut self, count: u64) -> Result<Vec<Record>, GeneratorError> {
        let mut records = Vec::with_capacity(count as usize);
        for _ in 0..count {
            records.push(self.next_record()?);
        }

        if cfg!(debug_assertions) {
            for record in &records {
                let failed = self.failed_invariants(record);
                assert!(
                    failed.is_empty(),
                    "spec '{}' violates invariants {:?} on record {}",
                    self.spec.name(),
                    failed,
                    record.index
                );
            }
        }

        tracing::debug!(
            entity = %self.spec.name(),
            count = records.len(),
            "generated record batch"
        );
        Ok(records)
    }

    /// Names of the spec invariants `record` does not satisfy.
    pub fn failed_invariants(&self, record: &Record) -> Vec<&str> {
        self.spec
            .invariants()
            .iter()
            .filter(|invariant| !invariant.holds(record))
            .map(|invariant| invariant.name())
            .collect()
    }
}

fn value_for<R: Rng>(
    def: &FieldDef,
    rng: &mut R,
    index: u64,
    partial: &Record,
    seen: &mut HashMap<String, HashSet<String>>,
) -> Result<FieldValue, GeneratorError> {
    if !def.unique {
        return Ok(eval_kind(&def.kind, rng, index, partial)?);
    }

    let taken = seen.entry(def.name.clone()).or_default();
    for _ in 0..MAX_UNIQUE_ATTEMPTS {
        let value = eval_kind(&def.kind, rng, index, partial)?;
        if taken.insert(unique_key(&value)) {
            return Ok(value);
        }
    }

    Err(GeneratorError::UniqueExhausted {
        field: def.name.clone(),
        attempts: MAX_UNIQUE_ATTEMPTS,
    })
}

fn unique_key(value: &FieldValue) -> String {
    match value.as_str() {
        Some(text) => text.to_string(),
        None => value.to_json().to_string(),
    }
}

/// Evaluate one field kind against the RNG and the record built so far.
fn eval_kind<R: Rng>(
    kind: &FieldKind,
    rng: &mut R,
    index: u64,
    partial: &Record,
) -> Result<FieldValue, ConfigError> {
    Ok(match kind {
        FieldKind::Uuid => FieldValue::Text(random_uuid(rng).to_string()),
        FieldKind::Sequential { start } => FieldValue::Int(start + index as i64),
        FieldKind::Pattern { pattern } => FieldValue::Text(render_pattern(pattern, rng, index)),
        FieldKind::IntBetween { min, max } => {
            FieldValue::Int(random::int_between(rng, *min, *max)?)
        }
        FieldKind::FloatBetween { min, max, decimals } => {
            FieldValue::Float(random::float_between(rng, *min, *max, *decimals)?)
        }
        FieldKind::WeightedChoice { choices } => {
            FieldValue::Text(random::weighted_choice(rng, choices)?.clone())
        }
        FieldKind::RecentDate { days_ago } => {
            FieldValue::DateTime(random::recent_datetime(rng, *days_ago))
        }
        FieldKind::Bool { true_weight } => {
            FieldValue::Bool(rng.random_bool(true_weight.clamp(0.0, 1.0)))
        }
        FieldKind::OneOf { values } => random::pick(rng, values).cloned().unwrap_or(FieldValue::Null),
        FieldKind::SampleArray {
            pool,
            min_len,
            max_len,
        } => random::sample_array(rng, pool, *min_len, *max_len),
        FieldKind::Static { value } => value.clone(),
        FieldKind::Optional { present, inner } => {
            if rng.random_bool(present.clamp(0.0, 1.0)) {
                eval_kind(inner, rng, index, partial)?
            } else {
                FieldValue::Null
            }
        }
        FieldKind::Derived(derive) => derive(partial),
    })
}

fn random_uuid<R: Rng>(rng: &mut R) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);

    // Set version (4) and variant bits per RFC 4122
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    Uuid::from_bytes(bytes)
}

/// Expand `{index}`, `{uuid}` and `{rand:N}` placeholders in a pattern.
fn render_pattern<R: Rng>(pattern: &str, rng: &mut R, index: u64) -> String {
    let mut result = pattern.replace("{index}", &index.to_string());

    while result.contains("{uuid}") {
        result = result.replacen("{uuid}", &random_uuid(rng).to_string(), 1);
    }

    while let Some(start) = result.find("{rand:") {
        let Some(close) = result[start..].find('}') else {
            break;
        };
        let end = start + close;
        let Ok(count) = result[start + 6..end].parse::<usize>() else {
            break;
        };
        let digits = random::digits(rng, count);
        result = format!("{}{}{}", &result[..start], digits, &result[end + 1..]);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{EntitySpec, FieldKind};

    fn device_spec() -> EntitySpec {
        EntitySpec::new("devices")
            .id(FieldKind::sequential(1))
            .unique_field("serial", FieldKind::pattern("SN-{rand:8}"))
            .field("status", FieldKind::weighted(&[("online", 0.7), ("offline", 0.3)]))
            .field("sensors", FieldKind::int_between(1, 16))
            .derived("sensor_pairs", |record| {
                let sensors = record.get("sensors").and_then(FieldValue::as_i64).unwrap_or(0);
                FieldValue::Int(sensors * 2)
            })
    }

    #[test]
    fn test_generate_single_record() {
        let mut generator = Generator::new(device_spec(), 42);
        let record = generator.next_record().unwrap();

        assert_eq!(record.index, 0);
        assert_eq!(record.id, FieldValue::Int(1));

        let serial = record.get("serial").and_then(FieldValue::as_str).unwrap();
        assert!(serial.starts_with("SN-"));
        assert_eq!(serial.len(), 11);

        let status = record.get("status").and_then(FieldValue::as_str).unwrap();
        assert!(status == "online" || status == "offline");

        let sensors = record.get("sensors").and_then(FieldValue::as_i64).unwrap();
        assert!((1..=16).contains(&sensors));
    }

    #[test]
    fn test_generate_batch_with_sequential_indices() {
        let mut generator = Generator::new(device_spec(), 42);
        let records = generator.generate(25).unwrap();

        assert_eq!(records.len(), 25);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.index, i as u64);
            assert_eq!(record.id, FieldValue::Int(1 + i as i64));
        }
        assert_eq!(generator.current_index(), 25);
    }

    #[test]
    fn test_generate_empty_batch() {
        let mut generator = Generator::new(device_spec(), 42);
        assert!(generator.generate(0).unwrap().is_empty());
    }

    #[test]
    fn test_deterministic_generation() {
        let mut first = Generator::new(device_spec(), 42);
        let mut second = Generator::new(device_spec(), 42);

        assert_eq!(first.generate(50).unwrap(), second.generate(50).unwrap());
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut first = Generator::new(device_spec(), 42);
        let mut second = Generator::new(device_spec(), 43);

        assert_ne!(first.generate(20).unwrap(), second.generate(20).unwrap());
    }

    #[test]
    fn test_derived_field_reads_dependencies() {
        let mut generator = Generator::new(device_spec(), 42);

        for record in generator.generate(100).unwrap() {
            let sensors = record.get("sensors").and_then(FieldValue::as_i64).unwrap();
            let pairs = record.get("sensor_pairs").and_then(FieldValue::as_i64).unwrap();
            assert_eq!(pairs, sensors * 2);
        }
    }

    #[test]
    fn test_unique_field_values_distinct() {
        let mut generator = Generator::new(device_spec(), 42);
        let records = generator.generate(200).unwrap();

        let mut serials: Vec<&str> = records
            .iter()
            .filter_map(|r| r.get("serial").and_then(FieldValue::as_str))
            .collect();
        let before = serials.len();
        serials.sort_unstable();
        serials.dedup();
        assert_eq!(serials.len(), before);
    }

    #[test]
    fn test_unique_exhaustion_reported() {
        let spec = EntitySpec::new("tiny")
            .id(FieldKind::sequential(1))
            .unique_field("tag", FieldKind::one_of(["a", "b", "c"]));
        let mut generator = Generator::new(spec, 42);

        // Three values exist; the fourth draw cannot be fresh
        generator.generate(3).unwrap();
        match generator.next_record() {
            Err(GeneratorError::UniqueExhausted { field, attempts }) => {
                assert_eq!(field, "tag");
                assert_eq!(attempts, 100);
            }
            other => panic!("Expected UniqueExhausted, got {other:?}"),
        }
    }

    #[test]
    fn test_config_error_surfaces() {
        let spec = EntitySpec::new("broken")
            .id(FieldKind::sequential(1))
            .field("count", FieldKind::int_between(10, 5));
        let mut generator = Generator::new(spec, 42);

        match generator.next_record() {
            Err(GeneratorError::Config(ConfigError::EmptyIntRange { min: 10, max: 5 })) => {}
            other => panic!("Expected EmptyIntRange, got {other:?}"),
        }
    }

    #[test]
    #[should_panic(expected = "violates invariants")]
    fn test_invariant_violation_panics_in_debug() {
        let spec = EntitySpec::new("impossible")
            .id(FieldKind::sequential(1))
            .field("count", FieldKind::int_between(1, 10))
            .invariant("count is negative", |record| {
                record.get("count").and_then(FieldValue::as_i64).unwrap_or(0) < 0
            });

        let mut generator = Generator::new(spec, 42);
        let _ = generator.generate(1);
    }

    #[test]
    fn test_failed_invariants_lists_names() {
        let spec = EntitySpec::new("devices")
            .id(FieldKind::sequential(1))
            .field("count", FieldKind::fixed(5))
            .invariant("count non-negative", |record| {
                record.get("count").and_then(FieldValue::as_i64).unwrap_or(-1) >= 0
            })
            .invariant("count over one hundred", |record| {
                record.get("count").and_then(FieldValue::as_i64).unwrap_or(0) > 100
            });

        let mut generator = Generator::new(spec, 42);
        let record = generator.next_record().unwrap();

        assert_eq!(generator.failed_invariants(&record), vec!["count over one hundred"]);
    }

    #[test]
    fn test_optional_probability_bounds() {
        let spec = EntitySpec::new("opts")
            .id(FieldKind::sequential(1))
            .field("always", FieldKind::optional(1.0, FieldKind::fixed("here")))
            .field("never", FieldKind::optional(0.0, FieldKind::fixed("gone")));

        let mut generator = Generator::new(spec, 42);
        for record in generator.generate(50).unwrap() {
            assert_eq!(record.get("always"), Some(&FieldValue::from("here")));
            assert_eq!(record.get("never"), Some(&FieldValue::Null));
        }
    }

    #[test]
    fn test_uuid_id_shape() {
        let spec = EntitySpec::new("devices");
        let mut generator = Generator::new(spec, 42);
        let record = generator.next_record().unwrap();

        let id = record.id.as_str().unwrap();
        assert_eq!(id.len(), 36);
        let parsed = Uuid::parse_str(id).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn test_pattern_placeholders_expand() {
        let spec = EntitySpec::new("orders")
            .id(FieldKind::sequential(1))
            .field("code", FieldKind::pattern("ORD-{rand:6}"))
            .field("slot", FieldKind::pattern("slot-{index}"));

        let mut generator = Generator::new(spec, 42);
        let records = generator.generate(3).unwrap();

        for (i, record) in records.iter().enumerate() {
            let code = record.get("code").and_then(FieldValue::as_str).unwrap();
            assert_eq!(code.len(), 10);
            assert!(code.starts_with("ORD-"));
            assert!(code[4..].chars().all(|c| c.is_ascii_digit()));
            assert!(!code[4..].starts_with('0'));

            let slot = record.get("slot").and_then(FieldValue::as_str).unwrap();
            assert_eq!(slot, &format!("slot-{i}"));
        }
    }

    #[test]
    fn test_sample_array_field() {
        let spec = EntitySpec::new("devices")
            .id(FieldKind::sequential(1))
            .field(
                "tags",
                FieldKind::sample_array(&["temp", "humidity", "co2", "motion"], 1, 3),
            );

        let mut generator = Generator::new(spec, 42);
        for record in generator.generate(30).unwrap() {
            let tags = record.get("tags").and_then(FieldValue::as_array).unwrap();
            assert!((1..=3).contains(&tags.len()));
        }
    }

    #[test]
    fn test_recent_date_field_is_datetime() {
        let spec = EntitySpec::new("events")
            .id(FieldKind::sequential(1))
            .field("seen_at", FieldKind::recent_date(7));

        let mut generator = Generator::new(spec, 42);
        let record = generator.next_record().unwrap();
        let seen = record.get("seen_at").and_then(FieldValue::as_datetime).unwrap();
        assert!(*seen <= chrono::Utc::now());
    }
}
