//! Gesture controller for the planner grid.
//!
//! A grab gesture carries a tagged payload (move, resize-start,
//! resize-end) that is decoded exactly once, at drop time, against the
//! current data. `resolve_drop` validates the drop and emits the domain
//! mutation to persist; every invalid payload, unknown reference, or
//! rejected edit resolves to `None` and the gesture is a silent no-op.

use gantry_db::{Month, Programmer, ProgrammerRef};

use crate::planner::{CourseWindow, SourceTask, effective_range};

/// Payload carried by an in-flight grab gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrabPayload {
    /// Move the task to another programmer and/or month.
    Move {
        task_id: String,
        /// Name of the lane the pill was grabbed from
        source_programmer: String,
    },
    /// Drag the task's start edge.
    ResizeStart { task_id: String },
    /// Drag the task's end edge.
    ResizeEnd { task_id: String },
}

impl GrabPayload {
    /// The task the gesture operates on.
    pub fn task_id(&self) -> &str {
        match self {
            GrabPayload::Move { task_id, .. }
            | GrabPayload::ResizeStart { task_id }
            | GrabPayload::ResizeEnd { task_id } => task_id,
        }
    }
}

/// A drop location: one (programmer lane, month) grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTarget {
    /// Display name of the lane's programmer
    pub programmer_name: String,
    /// Month of the drop column
    pub month: Month,
}

/// Domain mutation produced by an accepted drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannerMutation {
    /// Re-assign the dragged programmer's end-month, moving the record to
    /// a new programmer when the lane changed.
    Move {
        task_id: String,
        /// Programmer the pill was grabbed from; `Unassigned` when the
        /// source lane no longer resolves
        old_programmer: ProgrammerRef,
        /// Record key of the target programmer
        new_programmer_id: String,
        /// New end month for the moved assignment
        month: Month,
        /// Start month to write as well, when the move would otherwise
        /// leave the start after the end
        set_start: Option<Month>,
    },
    /// Set the task's start month.
    ResizeStart { task_id: String, month: Month },
    /// Set the end month of every assignment on the task.
    ResizeEnd { task_id: String, month: Month },
}

/// Whether a task's start handle is interactive.
///
/// Tasks whose effective start lies left of the window cannot be resized
/// from the start edge; the real beginning is off-screen and the edit
/// would be ambiguous.
pub fn start_handle_active(task: &SourceTask, window: &CourseWindow) -> bool {
    match effective_range(task) {
        Some((start, _)) => start >= window.first(),
        None => false,
    }
}

/// Decode a drop against the current data and emit the mutation to apply.
///
/// Returns `None` (a silent no-op) when the payload references a task or
/// programmer that no longer exists, or when the edit would invert the
/// task's start/end order.
pub fn resolve_drop(
    payload: &GrabPayload,
    target: &DropTarget,
    tasks: &[SourceTask],
    programmers: &[Programmer],
) -> Option<PlannerMutation> {
    let task = tasks.iter().find(|t| t.id == payload.task_id())?;

    match payload {
        GrabPayload::Move {
            task_id,
            source_programmer,
        } => {
            let new_programmer_id = programmers
                .iter()
                .find(|p| p.name == target.programmer_name)
                .and_then(|p| p.record_key())?;

            let old_programmer = match programmers
                .iter()
                .find(|p| p.name == *source_programmer)
                .and_then(|p| p.record_key())
            {
                Some(key) => ProgrammerRef::Id(key),
                None => ProgrammerRef::Unassigned,
            };

            // Keep start <= end: a missing start adopts the new end, and a
            // start now later than the new end collapses onto it.
            let set_start = match task.start_month.as_deref() {
                None => Some(target.month),
                Some(key) => match Month::parse(key) {
                    Some(start) if start > target.month => Some(target.month),
                    _ => None,
                },
            };

            Some(PlannerMutation::Move {
                task_id: task_id.clone(),
                old_programmer,
                new_programmer_id,
                month: target.month,
                set_start,
            })
        }
        GrabPayload::ResizeStart { task_id } => {
            let (_, end) = effective_range(task)?;
            if target.month > end {
                return None;
            }
            Some(PlannerMutation::ResizeStart {
                task_id: task_id.clone(),
                month: target.month,
            })
        }
        GrabPayload::ResizeEnd { task_id } => {
            let (start, _) = effective_range(task)?;
            if target.month < start {
                return None;
            }
            Some(PlannerMutation::ResizeEnd {
                task_id: task_id.clone(),
                month: target.month,
            })
        }
    }
}
