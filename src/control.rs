//! Control intents from the embedding firmware.
//!
//! HTTP handlers, buttons, or any other control surface run outside the
//! pipeline pass. They enqueue intents through a bounded channel built on
//! `critical-section` and `heapless::Deque`; the pipeline drains the queue
//! once per pass.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use crate::calibration::CalibrationParams;
use crate::color::Rgb;

/// A requested change to the device state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlIntent {
    /// Turn the output on or off.
    Power(bool),
    /// Set the output brightness.
    Brightness(u8),
    /// Set the idle color shown while no stream is live.
    StaticColor(Rgb),
    /// Rebuild the RGBW calibration tables.
    Calibration(CalibrationParams),
}

/// Error returned when the queue is full; carries the rejected intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlQueueFull(pub ControlIntent);

/// Bounded, interrupt-safe intent queue.
///
/// Synchronization is a critical section around a fixed-size queue, so the
/// channel can live in a `static` and be fed from interrupt context.
pub struct ControlChannel<const SIZE: usize> {
    inner: Mutex<RefCell<Deque<ControlIntent, SIZE>>>,
}

impl<const SIZE: usize> ControlChannel<SIZE> {
    /// Create a new empty channel.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Sender handle. Multiple senders can coexist.
    pub const fn sender(&self) -> ControlSender<'_, SIZE> {
        ControlSender { channel: self }
    }

    /// Receiver handle for the pipeline.
    pub const fn receiver(&self) -> ControlReceiver<'_, SIZE> {
        ControlReceiver { channel: self }
    }

    /// Enqueue an intent.
    ///
    /// Returns `Err(ControlQueueFull(intent))` when the queue is full.
    pub fn try_send(&self, intent: ControlIntent) -> Result<(), ControlQueueFull> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(intent).map_err(ControlQueueFull)
        })
    }

    /// Dequeue the oldest pending intent, if any.
    pub fn try_receive(&self) -> Option<ControlIntent> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.pop_front()
        })
    }
}

impl<const SIZE: usize> Default for ControlChannel<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sending half of a [`ControlChannel`].
///
/// A lightweight reference that can be cloned and passed around.
#[derive(Clone, Copy)]
pub struct ControlSender<'a, const SIZE: usize> {
    channel: &'a ControlChannel<SIZE>,
}

impl<const SIZE: usize> ControlSender<'_, SIZE> {
    /// Enqueue an intent.
    ///
    /// Returns `Err(ControlQueueFull(intent))` when the queue is full.
    pub fn try_send(&self, intent: ControlIntent) -> Result<(), ControlQueueFull> {
        self.channel.try_send(intent)
    }
}

/// Receiving half of a [`ControlChannel`].
///
/// A lightweight reference that can be cloned and passed around.
#[derive(Clone, Copy)]
pub struct ControlReceiver<'a, const SIZE: usize> {
    channel: &'a ControlChannel<SIZE>,
}

impl<const SIZE: usize> ControlReceiver<'_, SIZE> {
    /// Dequeue the oldest pending intent, if any.
    pub fn try_receive(&self) -> Option<ControlIntent> {
        self.channel.try_receive()
    }
}
