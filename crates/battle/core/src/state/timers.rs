//! One-shot deferred tasks polled once per tick.

use super::SlotId;

/// Work that runs after a delay. Dispatched by the engine when its timer
/// expires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeferredTask {
    /// Let the opponent policy act for the slot holding the turn.
    OpponentTurn(SlotId),
    /// Resolve the ability committed by this slot.
    AttackImpact(SlotId),
    /// Clear a fainted or caught slot and send in a replacement.
    RemoveSlot(SlotId),
    ClearHighlight(SlotId),
    ClearCatchBlocked,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduledTask {
    pub remaining_ms: f64,
    pub task: DeferredTask,
    /// Set by [`TaskQueue::arm`]; only armed timers count down.
    pub armed: bool,
}

/// Pending timers in scheduling order.
///
/// A timer starts counting down on the tick after the one that scheduled it:
/// new timers stay unarmed until the session calls [`TaskQueue::arm`] at the
/// end of the tick.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaskQueue {
    tasks: Vec<ScheduledTask>,
}

impl TaskQueue {
    pub fn schedule(&mut self, delay_ms: u32, task: DeferredTask) {
        tracing::trace!(?task, delay_ms, "scheduled");
        self.tasks.push(ScheduledTask {
            remaining_ms: delay_ms as f64,
            task,
            armed: false,
        });
    }

    /// Counts every armed timer down by `dt_ms` and returns the tasks that
    /// expired, in the order they were scheduled.
    pub fn advance(&mut self, dt_ms: f64) -> Vec<DeferredTask> {
        let mut fired = Vec::new();
        self.tasks.retain_mut(|scheduled| {
            if !scheduled.armed {
                return true;
            }
            scheduled.remaining_ms -= dt_ms;
            if scheduled.remaining_ms <= 0.0 {
                fired.push(scheduled.task);
                false
            } else {
                true
            }
        });
        fired
    }

    pub fn arm(&mut self) {
        for scheduled in &mut self.tasks {
            scheduled.armed = true;
        }
    }

    /// Removes and returns every pending task matching `predicate`.
    pub fn take_where(&mut self, mut predicate: impl FnMut(&DeferredTask) -> bool) -> Vec<DeferredTask> {
        let mut taken = Vec::new();
        self.tasks.retain(|scheduled| {
            if predicate(&scheduled.task) {
                taken.push(scheduled.task);
                false
            } else {
                true
            }
        });
        taken
    }

    pub fn contains(&self, task: DeferredTask) -> bool {
        self.tasks.iter().any(|scheduled| scheduled.task == task)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduledTask> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
