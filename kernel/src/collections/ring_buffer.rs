// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Single-producer, single-consumer ring buffer backing a hardware FIFO.
//!
//! One instance exists per transfer direction. The interrupt service routine
//! is the producer of the receive buffer and the consumer of the transmit
//! buffer; foreground code is the other side. Each index has exactly one
//! writer:
//!
//! - `head` is the index of the last element written and is only stored by
//!   the producer,
//! - `tail` is the index of the last element read and is only stored by the
//!   consumer.
//!
//! The buffer is empty when `head == tail` and full when advancing `head`
//! would make it equal to `tail`, so one slot is always left unused and at
//! most `capacity - 1` elements are buffered. [`SpscRingBuffer::reset`] stores
//! `head` from the consumer side and therefore must run with the producer
//! excluded (in practice, with the peripheral interrupt masked).
//!
//! Elements are up to 16 bits wide. With [`DataWidth::Word`] each element
//! takes two bytes of storage, low byte at `index * 2` and high byte at
//! `index * 2 + 1`.

use core::marker::PhantomData;
use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Width of one buffered element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataWidth {
    /// Elements of up to 8 bits, one byte of storage each.
    Byte,
    /// Elements of 9 to 16 bits, two bytes of storage each.
    Word,
}

impl DataWidth {
    /// Number of storage bytes one element occupies.
    pub const fn bytes(self) -> usize {
        match self {
            DataWidth::Byte => 1,
            DataWidth::Word => 2,
        }
    }

    /// Mask applied to values stored with this width.
    pub const fn mask(self) -> u32 {
        match self {
            DataWidth::Byte => 0xFF,
            DataWidth::Word => 0xFFFF,
        }
    }
}

/// Ring buffer over borrowed storage.
///
/// `SpscRingBuffer` is `Send` but not `Sync`, so safe code can only reach
/// both ends from one thread of execution at a time:
///
/// ```compile_fail
/// use kernel::collections::ring_buffer::SpscRingBuffer;
///
/// fn shared_across_threads<T: Sync>() {}
/// shared_across_threads::<SpscRingBuffer<'static>>();
/// ```
///
/// To run the producer and the consumer on different threads, hand out the
/// [`Producer`] and [`Consumer`] returned by [`SpscRingBuffer::split`].
pub struct SpscRingBuffer<'a> {
    ring: *mut u8,
    capacity: usize,
    width: DataWidth,
    head: AtomicUsize,
    tail: AtomicUsize,
    overflow: AtomicBool,
    _storage: PhantomData<&'a mut [u8]>,
}

// SAFETY: the buffer exclusively borrows its storage, so moving it to
// another thread moves the only access path with it. It is deliberately not
// `Sync`: `push`, `pop` and `reset` take `&self`, and sharing across threads
// would allow two producers at once. Threads go through
// [`SpscRingBuffer::split`] instead.
unsafe impl Send for SpscRingBuffer<'_> {}

impl<'a> SpscRingBuffer<'a> {
    /// Create a ring buffer over `storage`.
    ///
    /// The capacity in elements is `storage.len() / width.bytes()`; trailing
    /// bytes that do not form a whole element are left unused.
    pub fn new(storage: &'a mut [u8], width: DataWidth) -> SpscRingBuffer<'a> {
        let capacity = storage.len() / width.bytes();
        SpscRingBuffer {
            ring: storage.as_mut_ptr(),
            capacity,
            width,
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
            overflow: AtomicBool::new(false),
            _storage: PhantomData,
        }
    }

    /// Number of slots, including the one that is always kept empty.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn width(&self) -> DataWidth {
        self.width
    }

    /// Index following `index`. Wraps on exact equality with the capacity.
    fn advance(&self, index: usize) -> usize {
        let next = index + 1;
        if next == self.capacity {
            0
        } else {
            next
        }
    }

    /// Number of buffered elements.
    pub fn len(&self) -> usize {
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Acquire);
        if head >= tail {
            head - tail
        } else {
            head + (self.capacity - tail)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.head.load(Ordering::Acquire) == self.tail.load(Ordering::Acquire)
    }

    /// Whether another push would make `head` collide with `tail`.
    pub fn is_full(&self) -> bool {
        if self.capacity == 0 {
            return true;
        }
        let head = self.head.load(Ordering::Acquire);
        self.advance(head) == self.tail.load(Ordering::Acquire)
    }

    /// Producer side: store `value` after `head` and publish it.
    ///
    /// Returns `false` and leaves the buffer untouched when it is full.
    pub fn push(&self, value: u32) -> bool {
        if self.is_full() {
            return false;
        }
        let next = self.advance(self.head.load(Ordering::Relaxed));
        self.put_element(next, value);
        self.head.store(next, Ordering::Release);
        true
    }

    /// Consumer side: take the element after `tail`, if any.
    pub fn pop(&self) -> Option<u32> {
        let tail = self.tail.load(Ordering::Relaxed);
        if self.head.load(Ordering::Acquire) == tail {
            return None;
        }
        let next = self.advance(tail);
        let value = self.get_element(next);
        self.tail.store(next, Ordering::Release);
        Some(value)
    }

    /// Discard all buffered elements and clear the overflow flag.
    ///
    /// Indices are reset by moving `head` onto `tail`; storage is not
    /// zeroed. The producer must not run concurrently.
    pub fn reset(&self) {
        let tail = self.tail.load(Ordering::Acquire);
        self.head.store(tail, Ordering::Release);
        self.overflow.store(false, Ordering::Release);
    }

    /// Record that the producer dropped an element because the buffer was
    /// full.
    pub fn set_overflow(&self) {
        self.overflow.store(true, Ordering::Release);
    }

    pub fn overflowed(&self) -> bool {
        self.overflow.load(Ordering::Acquire)
    }

    /// Split into the two ends of the buffer.
    ///
    /// The mutable borrow guarantees that for as long as the handles live
    /// there is exactly one producer and one consumer, and that `reset`
    /// cannot be called.
    pub fn split<'b>(&'b mut self) -> (Producer<'b, 'a>, Consumer<'b, 'a>) {
        let ring: &'b SpscRingBuffer<'a> = self;
        (Producer { ring }, Consumer { ring })
    }

    fn put_element(&self, index: usize, value: u32) {
        // SAFETY: `index < capacity`, so every byte written is inside the
        // borrowed storage, and the slot is owned by the producer until
        // `head` is published.
        unsafe {
            match self.width {
                DataWidth::Byte => self.ring.add(index).write_volatile(value as u8),
                DataWidth::Word => {
                    let word = (value & DataWidth::Word.mask()) as u16;
                    let [lo, hi] = word.to_le_bytes();
                    self.ring.add(index * 2).write_volatile(lo);
                    self.ring.add(index * 2 + 1).write_volatile(hi);
                }
            }
        }
    }

    fn get_element(&self, index: usize) -> u32 {
        // SAFETY: `index < capacity` and the slot was published by the
        // producer before `head` moved past it.
        unsafe {
            match self.width {
                DataWidth::Byte => self.ring.add(index).read_volatile() as u32,
                DataWidth::Word => {
                    let lo = self.ring.add(index * 2).read_volatile();
                    let hi = self.ring.add(index * 2 + 1).read_volatile();
                    u16::from_le_bytes([lo, hi]) as u32
                }
            }
        }
    }
}

/// Producer end of a split [`SpscRingBuffer`].
pub struct Producer<'b, 'a> {
    ring: &'b SpscRingBuffer<'a>,
}

impl Producer<'_, '_> {
    pub fn push(&mut self, value: u32) -> bool {
        self.ring.push(value)
    }

    pub fn is_full(&self) -> bool {
        self.ring.is_full()
    }

    pub fn set_overflow(&mut self) {
        self.ring.set_overflow();
    }
}

/// Consumer end of a split [`SpscRingBuffer`].
pub struct Consumer<'b, 'a> {
    ring: &'b SpscRingBuffer<'a>,
}

impl Consumer<'_, '_> {
    pub fn pop(&mut self) -> Option<u32> {
        self.ring.pop()
    }

    pub fn len(&self) -> usize {
        self.ring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }
}

// SAFETY: `split` hands out exactly one of each handle under a mutable
// borrow of the buffer. The producer only stores `head` and writes the slot
// after it; the consumer only stores `tail` and reads the slot after it.
// Slot contents are published through the Release/Acquire pair on the index
// that covers them, so no slot is accessed from both sides at once.
unsafe impl Send for Producer<'_, '_> {}
unsafe impl Send for Consumer<'_, '_> {}
