use rand::{SeedableRng, rngs::StdRng};
use std::cell::RefCell;

thread_local! {
    pub static RNG: RefCell<StdRng> = RefCell::new(StdRng::seed_from_u64(0));
}

/// Generator for draws that must be reproducible across runs, like the
/// benchmark task pools. Callers own the instance, so seeding one never
/// disturbs generator state anywhere else in the process.
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
