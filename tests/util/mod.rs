#![allow(dead_code, unused_macros)]
use owcsim::{Bit, bit_to_level};
use rand::{SeedableRng, rngs::StdRng};

pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn levels(bits: &[Bit]) -> Vec<f64> {
    bits.iter().cloned().map(bit_to_level).collect()
}

macro_rules! error {
    ($thing1:expr, $thing2:expr) => {
        $thing1
            .iter()
            .cloned()
            .zip($thing2.iter().cloned())
            .map(|(t1, t2)| if t1 == t2 { 0f64 } else { 1f64 })
            .sum::<f64>()
            / $thing1.len() as f64
    };
}

macro_rules! assert_decreasing {
    ($v:expr) => {
        for pair in $v.windows(2) {
            assert!(pair[1] < pair[0], "not decreasing: {:?}", $v);
        }
    };
}

macro_rules! assert_increasing {
    ($v:expr) => {
        for pair in $v.windows(2) {
            assert!(pair[1] > pair[0], "not increasing: {:?}", $v);
        }
    };
}
