use std::sync::atomic::{AtomicUsize, Ordering};

use atomic_float::AtomicF32;

use crate::error::{ChartError, PersistError};

/// Fixed-capacity circular history shared between one producer and any
/// number of readers.
///
/// The producer writes a slot and then publishes the advanced cursor; a
/// reader that loads the cursor sees every slot written before it. A reader
/// may still see the cursor one append behind the slot contents, so the
/// newest sample can show up a frame late. Each slot is a single atomic
/// `f32`, so a value is never observed half-written.
pub struct SampleRing {
    slots: Box<[AtomicF32]>,
    cursor: AtomicUsize,
}

/// Point-in-time copy of a ring, taken with a single cursor load.
#[derive(Clone, Debug, PartialEq)]
pub struct RingSnapshot {
    pub cursor: usize,
    pub values: Vec<f32>,
}

impl RingSnapshot {
    pub fn capacity(&self) -> usize {
        self.values.len()
    }

    /// Slot written by the most recent append (zero before the first one).
    pub fn latest(&self) -> f32 {
        let capacity = self.values.len();
        self.values[(self.cursor + capacity - 1) % capacity]
    }

    /// Values ordered oldest to newest.
    pub fn chronological(&self) -> Vec<f32> {
        let (newer, older) = self.values.split_at(self.cursor);
        older.iter().chain(newer).copied().collect()
    }
}

impl SampleRing {
    pub fn new(capacity: usize) -> Result<Self, ChartError> {
        if capacity <= 1 {
            return Err(ChartError::CapacityTooSmall(capacity));
        }
        let slots = (0..capacity).map(|_| AtomicF32::new(0.0)).collect();
        Ok(Self {
            slots,
            cursor: AtomicUsize::new(0),
        })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Writes `value` at the cursor and advances it by one, wrapping.
    ///
    /// Only one thread may append. Non-finite values are stored as-is.
    pub fn append(&self, value: f32) {
        let cursor = self.cursor.load(Ordering::Relaxed);
        self.slots[cursor].store(value, Ordering::Relaxed);
        self.cursor
            .store((cursor + 1) % self.slots.len(), Ordering::Release);
    }

    pub fn extend(&self, block: &[f32]) {
        for &sample in block {
            self.append(sample);
        }
    }

    pub fn current_cursor(&self) -> usize {
        self.cursor.load(Ordering::Acquire)
    }

    /// Panics if `index >= capacity`.
    pub fn value_at(&self, index: usize) -> f32 {
        self.slots[index].load(Ordering::Relaxed)
    }

    pub fn latest(&self) -> f32 {
        let capacity = self.slots.len();
        self.value_at((self.current_cursor() + capacity - 1) % capacity)
    }

    pub fn snapshot(&self) -> RingSnapshot {
        let cursor = self.current_cursor();
        let values = self
            .slots
            .iter()
            .map(|slot| slot.load(Ordering::Relaxed))
            .collect();
        RingSnapshot { cursor, values }
    }

    /// Overwrites every slot in index order. The cursor is left alone.
    pub fn restore(&self, values: &[f32]) -> Result<(), PersistError> {
        if values.len() != self.slots.len() {
            return Err(PersistError::LengthMismatch {
                expected: self.slots.len(),
                actual: values.len(),
            });
        }
        for (slot, &value) in self.slots.iter().zip(values) {
            slot.store(value, Ordering::Relaxed);
        }
        Ok(())
    }
}
