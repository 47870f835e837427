//! # Result Channel
//!
//! Single-slot observable of [`SubmissionState`] with at most one
//! subscriber, modelled on a screen watching a view-model field.
//!
//! ## Delivery Rules
//!
//! - `publish` overwrites the slot and notifies the current subscriber once.
//! - A state published while nobody is subscribed is retained and handed
//!   to the next subscriber once.
//! - A state that has already been delivered is not handed to a newly
//!   attached subscriber unless it asks for a replay.
//! - `unsubscribe` detaches without touching the slot.
//!
//! Observers run on the publishing thread, outside the channel lock, so
//! they may call back into the channel.
//!
//! ## Handoff
//!
//! Publishing is split in two: the slot is written under the lock, then
//! the call is claimed and made after the lock is released. Until it is
//! claimed the state is *handing off*. If the subscriber is replaced or
//! detached in that window, the pending call is dropped and the state
//! counts as undelivered, so the subscriber attached afterwards receives
//! it. A `clear` or a newer publish in that window also drops the call.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::state::SubmissionState;

/// Receives states from a [`ResultChannel`].
pub trait Observer: Send + Sync {
    fn on_state(&self, state: &SubmissionState);
}

impl<F> Observer for F
where
    F: Fn(&SubmissionState) + Send + Sync,
{
    fn on_state(&self, state: &SubmissionState) {
        self(state)
    }
}

#[derive(Default)]
struct Slot {
    state: Option<SubmissionState>,
    delivered: bool,
    handing_off: bool,
    observer: Option<Arc<dyn Observer>>,
    /// Bumped on every subscribe and unsubscribe.
    generation: u64,
    /// Bumped on every write to `state`.
    seq: u64,
}

/// A stored state waiting to be handed to the observer that was current
/// when it was stored.
pub(crate) struct Delivery {
    observer: Arc<dyn Observer>,
    state: SubmissionState,
    generation: u64,
    seq: u64,
}

/// Single-slot, single-subscriber observable of submission outcomes.
#[derive(Default)]
pub struct ResultChannel {
    slot: Mutex<Slot>,
}

impl ResultChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `state` and notify the current subscriber, if any.
    pub fn publish(&self, state: SubmissionState) {
        if let Some(delivery) = self.store(state) {
            self.deliver(delivery);
        }
    }

    /// Write `state` into the slot without calling anyone.
    ///
    /// Returns the pending call for the current subscriber, to be passed to
    /// [`deliver`](Self::deliver) once the caller holds no other locks.
    pub(crate) fn store(&self, state: SubmissionState) -> Option<Delivery> {
        let mut slot = self.slot.lock();
        slot.seq += 1;
        slot.state = Some(state.clone());
        match slot.observer.clone() {
            Some(observer) => {
                slot.delivered = true;
                slot.handing_off = true;
                Some(Delivery {
                    observer,
                    state,
                    generation: slot.generation,
                    seq: slot.seq,
                })
            }
            None => {
                slot.delivered = false;
                slot.handing_off = false;
                tracing::debug!(state = %state, "retaining state until a subscriber attaches");
                None
            }
        }
    }

    /// Call the observer for a stored state, unless the subscriber or the
    /// slot changed since it was stored.
    pub(crate) fn deliver(&self, delivery: Delivery) {
        {
            let mut slot = self.slot.lock();
            if slot.generation != delivery.generation || slot.seq != delivery.seq {
                tracing::debug!(state = %delivery.state, "dropping superseded delivery");
                return;
            }
            slot.handing_off = false;
        }

        tracing::debug!(state = %delivery.state, "delivering published state");
        delivery.observer.on_state(&delivery.state);
    }

    /// Attach `observer`, replacing any previous subscriber.
    ///
    /// If the slot holds a state nobody has seen yet, it is delivered
    /// immediately.
    pub fn subscribe(&self, observer: impl Observer + 'static) {
        self.attach(Arc::new(observer), false);
    }

    /// Attach `observer` and deliver the stored state even if an earlier
    /// subscriber already received it.
    pub fn subscribe_with_replay(&self, observer: impl Observer + 'static) {
        self.attach(Arc::new(observer), true);
    }

    /// Detach the current subscriber. The stored state is kept.
    pub fn unsubscribe(&self) {
        let mut slot = self.slot.lock();
        slot.generation += 1;
        slot.observer = None;
        if slot.handing_off {
            slot.handing_off = false;
            slot.delivered = false;
        }
    }

    /// Whether a subscriber is attached.
    pub fn has_subscriber(&self) -> bool {
        self.slot.lock().observer.is_some()
    }

    /// The stored state, without delivering it.
    pub fn latest(&self) -> Option<SubmissionState> {
        self.slot.lock().state.clone()
    }

    /// Empty the slot. The subscriber stays attached.
    pub fn clear(&self) {
        let mut slot = self.slot.lock();
        slot.seq += 1;
        slot.state = None;
        slot.delivered = false;
        slot.handing_off = false;
    }

    fn attach(&self, observer: Arc<dyn Observer>, replay: bool) {
        let pending = {
            let mut slot = self.slot.lock();
            slot.generation += 1;
            slot.observer = Some(Arc::clone(&observer));
            if slot.state.is_some() && (replay || !slot.delivered || slot.handing_off) {
                slot.delivered = true;
                slot.handing_off = false;
                slot.state.clone()
            } else {
                None
            }
        };
        if let Some(state) = pending {
            tracing::debug!(state = %state, replay, "delivering stored state to new subscriber");
            observer.on_state(&state);
        }
    }
}

impl std::fmt::Debug for ResultChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slot = self.slot.lock();
        f.debug_struct("ResultChannel")
            .field("state", &slot.state)
            .field("delivered", &slot.delivered)
            .field("handing_off", &slot.handing_off)
            .field("subscribed", &slot.observer.is_some())
            .finish()
    }
}
