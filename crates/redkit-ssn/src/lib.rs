//! Synthetic SSN-style identifier generation.
//!
//! Produces zero-padded three-part numeric strings in the post-2011
//! randomized format (area-group-serial). Each group is drawn uniformly and
//! independently; there is no uniqueness check and no exclusion of
//! SSA-reserved ranges beyond the stated bounds.

use rand::Rng;
use redkit_core::plugin::PluginInfo;

/// Marker type carrying the plugin's self-description.
pub struct SsnGenerator;

impl PluginInfo for SsnGenerator {
    const NAME: &'static str = "ssn";

    fn usage() -> &'static str {
        "USAGE:
  let values = redkit_ssn::generate(count);
"
    }
}

/// Generates `count` identifiers using the thread-local RNG.
pub fn generate(count: usize) -> Vec<String> {
    generate_with(&mut rand::thread_rng(), count)
}

/// Generates `count` identifiers from a caller-supplied RNG.
///
/// Each value is `AAA-GG-SSSS` with area in 1..=999, group in 1..=99, and
/// serial in 1..=9999, zero-padded per group.
pub fn generate_with<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<String> {
    (0..count)
        .map(|_| {
            let area: u16 = rng.gen_range(1..=999);
            let group: u8 = rng.gen_range(1..=99);
            let serial: u16 = rng.gen_range(1..=9999);
            format!("{area:03}-{group:02}-{serial:04}")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use regex::Regex;

    #[test]
    fn zero_count_yields_empty_sequence() {
        assert!(generate(0).is_empty());
    }

    #[test]
    fn generates_exactly_count_values() {
        assert_eq!(generate(1).len(), 1);
        assert_eq!(generate(250).len(), 250);
    }

    #[test]
    fn values_match_pattern_and_ranges() {
        let pattern = Regex::new(r"^\d{3}-\d{2}-\d{4}$").unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        for value in generate_with(&mut rng, 500) {
            assert!(pattern.is_match(&value), "malformed value {value}");

            let mut groups = value.split('-');
            let area: u16 = groups.next().unwrap().parse().unwrap();
            let group: u8 = groups.next().unwrap().parse().unwrap();
            let serial: u16 = groups.next().unwrap().parse().unwrap();

            assert!((1..=999).contains(&area));
            assert!((1..=99).contains(&group));
            assert!((1..=9999).contains(&serial));
        }
    }

    #[test]
    fn seeded_generation_is_deterministic() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        assert_eq!(generate_with(&mut a, 10), generate_with(&mut b, 10));
    }
}
