//! Lock-free single-producer single-consumer (SPSC) sample FIFO.
//!
//! Sits between the generator tick (interrupt context) and the dispatch
//! loop (main context). Uses atomic cursors, so neither side ever takes a
//! lock or disables interrupts.
//!
//! # Safety Contract
//!
//! - Only ONE context may call [`enqueue()`](SampleFifo::enqueue) (the "producer").
//! - Only ONE context may call [`dequeue()`](SampleFifo::dequeue) (the "consumer").
//! - The two may preempt each other at any point.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

use crate::waveform::Sample;

/// Fixed-capacity SPSC ring buffer of [`Sample`]s.
///
/// All `N` slots are usable. Cursors run over `0..2N` so that a full
/// buffer (`write - read == N`) is distinguishable from an empty one
/// (`write == read`) without a sentinel slot.
///
/// Overflow and underflow are silent: [`enqueue()`](Self::enqueue) returns
/// `false` on a full buffer and [`dequeue()`](Self::dequeue) returns `None`
/// on an empty one. Neither touches the stored samples.
pub struct SampleFifo<const N: usize> {
    buffer: [UnsafeCell<Sample>; N],
    /// Write cursor in `0..2N` (only modified by the producer).
    write: AtomicUsize,
    /// Read cursor in `0..2N` (only modified by the consumer).
    read: AtomicUsize,
    /// Rejected enqueues (only modified by the producer).
    overflows: AtomicU32,
}

// SAFETY: Samples are plain bytes. The SPSC contract guarantees a slot is
// written only by the producer while outside `read..write`, and read only
// by the consumer while inside it. Release/acquire on the cursors makes
// the slot write visible before the consumer can observe it.
unsafe impl<const N: usize> Sync for SampleFifo<N> {}

impl<const N: usize> SampleFifo<N> {
    /// Create an empty FIFO.
    ///
    /// # Panics
    ///
    /// `N` must be non-zero and small enough that `2N` fits in `usize`.
    /// In a `static` initializer this is a compile-time error.
    #[allow(clippy::declare_interior_mut_const)]
    pub const fn new() -> Self {
        assert!(N > 0, "sample FIFO needs at least one slot");
        assert!(N <= usize::MAX / 2, "sample FIFO capacity too large");

        const EMPTY_SLOT: UnsafeCell<Sample> = UnsafeCell::new(0);
        SampleFifo {
            buffer: [EMPTY_SLOT; N],
            write: AtomicUsize::new(0),
            read: AtomicUsize::new(0),
            overflows: AtomicU32::new(0),
        }
    }

    #[inline(always)]
    const fn occupied(write: usize, read: usize) -> usize {
        (write + 2 * N - read) % (2 * N)
    }

    /// Append a sample (producer side).
    ///
    /// Returns `false` and drops `sample` if the FIFO is full.
    pub fn enqueue(&self, sample: Sample) -> bool {
        let write = self.write.load(Ordering::Relaxed);
        let read = self.read.load(Ordering::Acquire);

        if Self::occupied(write, read) == N {
            // Producer-only counter: a plain load/store is enough and avoids
            // read-modify-write atomics on cores without them.
            let dropped = self.overflows.load(Ordering::Relaxed);
            self.overflows.store(dropped.wrapping_add(1), Ordering::Relaxed);
            return false;
        }

        // SAFETY: We are the sole producer and the slot at `write` is outside
        // the occupied range, so the consumer is not reading it.
        unsafe {
            *self.buffer[write % N].get() = sample;
        }

        // Release ordering publishes the slot write before the cursor moves.
        self.write.store((write + 1) % (2 * N), Ordering::Release);
        true
    }

    /// Remove the oldest sample (consumer side).
    ///
    /// Returns `None` if the FIFO is empty.
    pub fn dequeue(&self) -> Option<Sample> {
        let read = self.read.load(Ordering::Relaxed);
        let write = self.write.load(Ordering::Acquire);

        if read == write {
            return None;
        }

        // SAFETY: We are the sole consumer and `read != write` means the slot
        // holds a sample the producer has finished writing.
        let sample = unsafe { *self.buffer[read % N].get() };

        // Release ordering finishes the read before the slot is handed back.
        self.read.store((read + 1) % (2 * N), Ordering::Release);
        Some(sample)
    }

    /// Check if the FIFO is empty.
    pub fn is_empty(&self) -> bool {
        self.read.load(Ordering::Acquire) == self.write.load(Ordering::Acquire)
    }

    /// Check if the FIFO is full.
    pub fn is_full(&self) -> bool {
        self.len() == N
    }

    /// Number of samples currently queued. Always in `0..=N`.
    pub fn len(&self) -> usize {
        let write = self.write.load(Ordering::Acquire);
        let read = self.read.load(Ordering::Acquire);
        Self::occupied(write, read)
    }

    /// Total number of slots.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of samples rejected because the FIFO was full.
    ///
    /// Observability only. Wraps on overflow.
    pub fn overflow_count(&self) -> u32 {
        self.overflows.load(Ordering::Relaxed)
    }
}

impl<const N: usize> Default for SampleFifo<N> {
    fn default() -> Self {
        Self::new()
    }
}
