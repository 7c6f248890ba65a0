use crate::slots::SLOT_COUNT;
use bevy::prelude::*;
use rand::Rng;
use std::ops::RangeInclusive;

/// Bounds of the delay before a child appears, in seconds.
pub const SPAWN_DELAY: RangeInclusive<f32> = 0.1..=0.5;

/// Outcome of advancing a [`SpawnProcess`] by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnStep {
	/// Still waiting on the current slot's delay.
	Waiting,
	/// The delay for this slot elapsed; a child belongs there now.
	Spawn(usize),
	/// No slot is left, or the process was cancelled.
	Finished,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingSlot {
	slot: usize,
	remaining: f32,
}

/// Staggered attempt to fill each slot of a node, in slot order.
///
/// Every slot gets one draw against the spawn probability. A slot that wins waits a random
/// delay before its child is spawned, and the next slot is only drawn once that child exists.
/// A slot that loses is skipped for good.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct SpawnProcess {
	next_slot: usize,
	pending: Option<PendingSlot>,
	spawn_probability: f32,
	cancelled: bool,
}

impl SpawnProcess {
	/// Starts the process, resolving draws up to the first slot that has to wait.
	pub fn start(spawn_probability: f32, rng: &mut impl Rng) -> Self {
		let mut process = Self { next_slot: 0, pending: None, spawn_probability, cancelled: false };
		process.arm(rng);
		process
	}

	fn arm(&mut self, rng: &mut impl Rng) {
		while self.next_slot < SLOT_COUNT {
			let slot = self.next_slot;
			self.next_slot += 1;

			if rng.gen::<f32>() < self.spawn_probability {
				self.pending = Some(PendingSlot { slot, remaining: rng.gen_range(SPAWN_DELAY) });
				return;
			}
		}
	}

	/// Advances the current delay by `dt` seconds.
	///
	/// Resumes at most once per call; time left over after a delay elapses is dropped.
	pub fn tick(&mut self, dt: f32, rng: &mut impl Rng) -> SpawnStep {
		if self.cancelled {
			return SpawnStep::Finished;
		}

		let Some(pending) = self.pending.as_mut() else {
			return SpawnStep::Finished;
		};

		pending.remaining -= dt;
		if pending.remaining > 0.0 {
			return SpawnStep::Waiting;
		}

		let slot = pending.slot;
		self.pending = None;
		self.arm(rng);

		SpawnStep::Spawn(slot)
	}

	/// Stops the process before its next resumption.
	pub fn cancel(&mut self) {
		self.cancelled = true;
	}

	pub fn is_cancelled(&self) -> bool {
		self.cancelled
	}

	pub fn is_finished(&self) -> bool {
		self.cancelled || self.pending.is_none()
	}

	/// Slot currently waiting on its delay, if any.
	pub fn pending_slot(&self) -> Option<usize> {
		self.pending.map(|pending| pending.slot)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::rngs::StdRng;
	use rand::SeedableRng;

	/// Ticks until the process finishes and returns the spawned slots.
	fn drain(process: &mut SpawnProcess, dt: f32, rng: &mut StdRng) -> Vec<usize> {
		let mut slots = Vec::new();
		for _ in 0..1000 {
			match process.tick(dt, rng) {
				SpawnStep::Spawn(slot) => slots.push(slot),
				SpawnStep::Waiting => {}
				SpawnStep::Finished => return slots,
			}
		}
		panic!("spawn process did not finish");
	}

	#[test]
	fn test_zero_probability_spawns_nothing() {
		let mut rng = StdRng::seed_from_u64(1);
		let mut process = SpawnProcess::start(0.0, &mut rng);
		assert!(process.is_finished());
		assert_eq!(process.tick(1.0, &mut rng), SpawnStep::Finished);
	}

	#[test]
	fn test_full_probability_spawns_every_slot_in_order() {
		let mut rng = StdRng::seed_from_u64(2);
		let mut process = SpawnProcess::start(1.0, &mut rng);
		assert_eq!(process.pending_slot(), Some(0));
		assert_eq!(drain(&mut process, 0.05, &mut rng), vec![0, 1, 2, 3, 4]);
	}

	#[test]
	fn test_partial_probability_keeps_slot_order() {
		for seed in 0..32 {
			let mut rng = StdRng::seed_from_u64(seed);
			let mut process = SpawnProcess::start(0.5, &mut rng);
			let slots = drain(&mut process, 0.1, &mut rng);
			assert!(slots.len() <= SLOT_COUNT);
			assert!(slots.windows(2).all(|pair| pair[0] < pair[1]));
		}
	}

	#[test]
	fn test_waits_for_delay() {
		let mut rng = StdRng::seed_from_u64(3);
		let mut process = SpawnProcess::start(1.0, &mut rng);

		// the shortest possible delay has not elapsed yet
		assert_eq!(process.tick(0.05, &mut rng), SpawnStep::Waiting);
		assert_eq!(process.tick(0.0, &mut rng), SpawnStep::Waiting);

		// the longest possible delay has
		assert_eq!(process.tick(0.5, &mut rng), SpawnStep::Spawn(0));
		assert_eq!(process.pending_slot(), Some(1));
	}

	#[test]
	fn test_one_resumption_per_tick() {
		let mut rng = StdRng::seed_from_u64(4);
		let mut process = SpawnProcess::start(1.0, &mut rng);

		// a huge frame still yields a single child
		assert_eq!(process.tick(100.0, &mut rng), SpawnStep::Spawn(0));
		assert_eq!(process.tick(100.0, &mut rng), SpawnStep::Spawn(1));
	}

	#[test]
	fn test_cancel_abandons_pending_slot() {
		let mut rng = StdRng::seed_from_u64(5);
		let mut process = SpawnProcess::start(1.0, &mut rng);
		assert_eq!(process.tick(1.0, &mut rng), SpawnStep::Spawn(0));

		process.cancel();
		assert!(process.is_cancelled());
		assert!(process.is_finished());
		assert_eq!(process.tick(1.0, &mut rng), SpawnStep::Finished);
	}
}
