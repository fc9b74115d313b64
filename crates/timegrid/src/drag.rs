//! Drag lifecycle: `Idle -> Dragging -> Idle`.
//!
//! While dragging, the manager owns a [`PreviewEvent`] (the original shifted
//! by the current delta) that the layout pipeline treats like any other
//! event. Moving back to the zero delta removes the preview; releasing always
//! removes it and yields a [`Commit`] for the host to apply to its own store.
//! The original event is only borrowed and never modified.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::config::DragConfig;
use crate::error::{GridError, Result};
use crate::event::{Event, MoveDelta, PreviewEvent};
use crate::layout::WorkingSet;
use crate::metrics::LayoutMetrics;
use crate::translator::{DragTranslator, PointerSample};

/// What changed after a move sample was applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DragUpdate {
    /// The preview now sits at `delta` from the original.
    Preview { delta: MoveDelta, degraded: bool },
    /// The pointer is back at the original slot; no preview is shown.
    Cleared { degraded: bool },
}

/// Reschedule request emitted on release.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Commit {
    pub event_id: String,
    pub delta: MoveDelta,
    /// The original bounds shifted by `delta`.
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub degraded: bool,
}

impl Commit {
    /// A release at the original position; the host can skip the write.
    pub fn is_noop(&self) -> bool {
        self.delta.is_zero()
    }
}

#[derive(Debug, Clone)]
struct ActiveDrag<'e> {
    original: &'e Event,
    translator: DragTranslator,
    preview: Option<PreviewEvent>,
}

#[derive(Debug, Clone, Default)]
enum DragState<'e> {
    #[default]
    Idle,
    Dragging(ActiveDrag<'e>),
}

#[derive(Debug, Clone, Default)]
pub struct DragStateManager<'e> {
    config: DragConfig,
    state: DragState<'e>,
}

impl<'e> DragStateManager<'e> {
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            state: DragState::Idle,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// The event currently being dragged.
    pub fn dragged_event(&self) -> Option<&'e Event> {
        match &self.state {
            DragState::Dragging(active) => Some(active.original),
            DragState::Idle => None,
        }
    }

    pub fn preview(&self) -> Option<&PreviewEvent> {
        match &self.state {
            DragState::Dragging(active) => active.preview.as_ref(),
            DragState::Idle => None,
        }
    }

    /// Host events plus the active preview, ready for layout.
    pub fn working_set<'a>(&'a self, events: &'a [Event]) -> WorkingSet<'a> {
        WorkingSet::new(events, self.preview())
    }

    /// Begin dragging `event`.
    ///
    /// # Errors
    /// Returns `GridError::DragInProgress` if another drag is active; the
    /// active drag is left untouched.
    pub fn drag_start(&mut self, event: &'e Event) -> Result<()> {
        if let DragState::Dragging(active) = &self.state {
            log::warn!(
                "rejected drag start for '{}': '{}' is still being dragged",
                event.id,
                active.original.id
            );
            return Err(GridError::DragInProgress(active.original.id.clone()));
        }

        log::debug!("drag start: '{}'", event.id);
        self.state = DragState::Dragging(ActiveDrag {
            original: event,
            translator: DragTranslator::new(self.config),
            preview: None,
        });
        Ok(())
    }

    /// Feed one pointer move sample.
    ///
    /// Returns `Ok(None)` when the sample snaps to the same delta as the last
    /// emitted one, in which case nothing changed and no re-layout is needed.
    pub fn pointer_move(
        &mut self,
        sample: &PointerSample,
        metrics: &LayoutMetrics,
    ) -> Result<Option<DragUpdate>> {
        let DragState::Dragging(active) = &mut self.state else {
            return Err(GridError::NoActiveDrag);
        };

        let Some(translation) = active.translator.on_move(sample, metrics) else {
            return Ok(None);
        };
        Self::update_preview(active, translation.delta, translation.degraded)
            .inspect_err(|_| active.translator.reset())
            .map(Some)
    }

    /// Move the preview to an already-computed `delta` (no suppression).
    pub fn apply_delta(&mut self, delta: MoveDelta) -> Result<DragUpdate> {
        let DragState::Dragging(active) = &mut self.state else {
            return Err(GridError::NoActiveDrag);
        };
        Self::update_preview(active, delta, false)
    }

    /// On an out-of-range delta the previous preview is kept.
    fn update_preview(
        active: &mut ActiveDrag<'e>,
        delta: MoveDelta,
        degraded: bool,
    ) -> Result<DragUpdate> {
        log::debug!(
            "drag move '{}': {} day(s), {} hour(s)",
            active.original.id,
            delta.day_delta(),
            delta.hour_delta()
        );

        if delta.is_zero() {
            active.preview = None;
            Ok(DragUpdate::Cleared { degraded })
        } else {
            let preview = PreviewEvent::new(active.original, delta).inspect_err(|e| {
                log::warn!("drag move rejected: {}", e);
            })?;
            active.preview = Some(preview);
            Ok(DragUpdate::Preview { delta, degraded })
        }
    }

    /// Finish the drag with the release sample. Yields a commit even when the
    /// delta equals the last move; fails only for an out-of-range delta.
    pub fn release(&mut self, sample: &PointerSample, metrics: &LayoutMetrics) -> Result<Commit> {
        let DragState::Dragging(active) = &mut self.state else {
            return Err(GridError::NoActiveDrag);
        };
        let translation = active.translator.on_release(sample, metrics);
        self.finish(translation.delta, translation.degraded)
    }

    /// Finish the drag with an already-computed `delta`.
    pub fn release_with_delta(&mut self, delta: MoveDelta) -> Result<Commit> {
        self.finish(delta, false)
    }

    /// An out-of-range delta leaves the drag active, so the host can still
    /// release elsewhere or cancel.
    fn finish(&mut self, delta: MoveDelta, degraded: bool) -> Result<Commit> {
        let DragState::Dragging(active) = &self.state else {
            return Err(GridError::NoActiveDrag);
        };
        let moved = delta.apply(active.original).inspect_err(|e| {
            log::warn!("drag release rejected: {}", e);
        })?;
        self.state = DragState::Idle;

        log::debug!(
            "drag release '{}': {} day(s), {} hour(s)",
            moved.id,
            delta.day_delta(),
            delta.hour_delta()
        );

        Ok(Commit {
            event_id: moved.id,
            delta,
            start: moved.start,
            end: moved.end,
            degraded,
        })
    }

    /// Abandon the active drag without a commit. Returns whether a drag was
    /// active.
    pub fn cancel(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(active) => {
                log::debug!("drag cancelled: '{}'", active.original.id);
                true
            }
            DragState::Idle => false,
        }
    }
}
