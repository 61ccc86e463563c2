use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generates participant identities of the form `user-NNNN`.
///
/// A single generator is seeded once and shared, so concurrent callers take turns on the lock.
/// Identities are not unique: two participants may receive the same one.
pub struct IdentityGenerator {
	rng: Mutex<StdRng>,
}

impl IdentityGenerator {
	pub const PREFIX: &str = "user-";

	/// Seed from the operating system.
	pub fn random() -> Self {
		Self::from_rng(StdRng::from_os_rng())
	}

	/// Seed with a fixed value, producing the same sequence every time.
	pub fn seeded(seed: u64) -> Self {
		Self::from_rng(StdRng::seed_from_u64(seed))
	}

	fn from_rng(rng: StdRng) -> Self {
		Self { rng: Mutex::new(rng) }
	}

	pub fn generate(&self) -> String {
		let n: u16 = self.rng.lock().random_range(0..10_000);
		format!("{}{:04}", Self::PREFIX, n)
	}
}

impl Default for IdentityGenerator {
	fn default() -> Self {
		Self::random()
	}
}

impl std::fmt::Debug for IdentityGenerator {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("IdentityGenerator").finish_non_exhaustive()
	}
}
