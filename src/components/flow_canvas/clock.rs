use std::cell::Cell;

/// Millisecond wall clock used to stamp edge ids.
pub trait Clock {
	/// Milliseconds since the Unix epoch.
	fn now_millis(&self) -> u64;
}

/// `Date.now()` in the browser, `SystemTime` elsewhere.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
	#[cfg(target_arch = "wasm32")]
	fn now_millis(&self) -> u64 {
		js_sys::Date::now() as u64
	}

	#[cfg(not(target_arch = "wasm32"))]
	fn now_millis(&self) -> u64 {
		use std::time::{SystemTime, UNIX_EPOCH};

		SystemTime::now()
			.duration_since(UNIX_EPOCH)
			.map(|elapsed| elapsed.as_millis() as u64)
			.unwrap_or_default()
	}
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct FixedClock {
	now: Cell<u64>,
}

impl FixedClock {
	/// Starts at `millis`.
	pub fn new(millis: u64) -> Self {
		Self {
			now: Cell::new(millis),
		}
	}

	/// Jumps to `millis`.
	pub fn set(&self, millis: u64) {
		self.now.set(millis);
	}

	/// Moves forward by `millis`.
	pub fn advance(&self, millis: u64) {
		self.now.set(self.now.get() + millis);
	}
}

impl Clock for FixedClock {
	fn now_millis(&self) -> u64 {
		self.now.get()
	}
}

impl<C: Clock + ?Sized> Clock for &C {
	fn now_millis(&self) -> u64 {
		(**self).now_millis()
	}
}
