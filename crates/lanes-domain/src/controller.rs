//! Turns the raw pointer stream into drag sessions and commits.

use lanes_core::{AppConfig, AutoScrollConfig, LanesResult, SyncReport};
use serde::Serialize;

use crate::board::Board;
use crate::coordinator::{CommitOutcome, MoveCoordinator};
use crate::drag::{AutoScrollRequest, CancelReason, DragEngine, Preview, ReleaseOutcome};
use crate::item::{Item, ItemId};
use crate::list::ListId;
use crate::notify::{CommittedMove, MoveObserver};
use crate::pointer::{ButtonState, PointerSample, PointerTransition};
use crate::view::{BoardView, SurfaceRegistry};

/// What the host should react to after feeding the controller an event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BoardEvent {
    DragStarted {
        item_id: ItemId,
        list_id: ListId,
        index: usize,
    },
    Preview(Preview),
    AutoScrolled {
        list_id: ListId,
        delta: f64,
    },
    Moved(CommittedMove),
    DroppedInPlace(CommittedMove),
    Cancelled {
        reason: String,
    },
}

impl BoardEvent {
    fn cancelled(reason: &CancelReason) -> Self {
        BoardEvent::Cancelled {
            reason: reason.to_string(),
        }
    }
}

/// Single entry point for host events on one board.
///
/// Everything runs synchronously inside the caller's event handler: a
/// commit finishes refreshing both lists before `handle_pointer` returns.
#[derive(Debug)]
pub struct BoardController {
    view: BoardView,
    drag: DragEngine,
    buttons: ButtonState,
}

impl BoardController {
    pub fn new(view: BoardView, autoscroll: AutoScrollConfig) -> Self {
        let drag = DragEngine::new(view.geometry(), autoscroll);
        Self {
            view,
            drag,
            buttons: ButtonState::Released,
        }
    }

    pub fn from_config(board: Board, config: &AppConfig) -> LanesResult<Self> {
        let view = BoardView::new(board, config.geometry()?)?;
        Ok(Self::new(view, config.autoscroll()))
    }

    pub fn view(&self) -> &BoardView {
        &self.view
    }

    /// Host-side access for placement and wheel scrolling.
    pub fn view_mut(&mut self) -> &mut BoardView {
        &mut self.view
    }

    pub fn board(&self) -> &Board {
        self.view.board()
    }

    pub fn into_board(self) -> Board {
        self.view.into_board()
    }

    pub fn drag(&self) -> &DragEngine {
        &self.drag
    }

    pub fn handle_pointer(
        &mut self,
        sample: &PointerSample,
        surfaces: &mut dyn SurfaceRegistry,
        observer: &mut dyn MoveObserver,
    ) -> Vec<BoardEvent> {
        let mut events = Vec::new();
        if !sample.is_finite() {
            tracing::warn!("dropping non-finite pointer sample {:?}", sample);
            return events;
        }
        let transition = PointerTransition::between(self.buttons, sample.buttons);
        self.buttons = sample.buttons;

        match transition {
            PointerTransition::Press => {
                if let Some(session) = self.drag.press(self.view.board(), &self.view, sample) {
                    events.push(BoardEvent::DragStarted {
                        item_id: session.item_id,
                        list_id: session.origin_list_id,
                        index: session.origin_index,
                    });
                }
            }
            PointerTransition::Move => {
                let update = self.drag.drag_to(self.view.board(), &self.view, sample);
                if let Some(reason) = update.cancelled {
                    self.drag.settle();
                    events.push(BoardEvent::cancelled(&reason));
                    return events;
                }
                if let Some(preview) = update.preview {
                    events.push(BoardEvent::Preview(preview));
                }
                if let Some(request) = update.autoscroll {
                    self.apply_autoscroll(request, surfaces, &mut events);
                }
            }
            PointerTransition::Release => {
                match self.drag.release(self.view.board(), &self.view, sample) {
                    Some(ReleaseOutcome::Commit(request)) => {
                        let outcome =
                            MoveCoordinator::commit(&mut self.view, &request, surfaces, observer);
                        self.drag.settle();
                        events.push(match outcome {
                            CommitOutcome::Moved(mv) => BoardEvent::Moved(mv),
                            CommitOutcome::Unchanged(mv) => BoardEvent::DroppedInPlace(mv),
                            CommitOutcome::Cancelled(reason) => BoardEvent::cancelled(&reason),
                        });
                    }
                    Some(ReleaseOutcome::Cancelled(reason)) => {
                        self.drag.settle();
                        events.push(BoardEvent::cancelled(&reason));
                    }
                    None => {}
                }
            }
            PointerTransition::Hover => {}
        }
        events
    }

    /// Timer-driven work: auto-scroll under a still pointer, then the
    /// coalesced per-frame refresh.
    pub fn tick(&mut self, now_ms: u64, surfaces: &mut dyn SurfaceRegistry) -> Vec<BoardEvent> {
        let mut events = Vec::new();
        if let Some(request) = self.drag.autoscroll_tick(&self.view, now_ms) {
            self.apply_autoscroll(request, surfaces, &mut events);
        }
        self.view.flush_frame(surfaces);
        events
    }

    pub fn flush_frame(&mut self, surfaces: &mut dyn SurfaceRegistry) -> Vec<(ListId, SyncReport)> {
        self.view.flush_frame(surfaces)
    }

    pub fn abort_drag(&mut self) -> Option<BoardEvent> {
        if !self.drag.abort(CancelReason::Aborted) {
            return None;
        }
        self.drag.settle();
        Some(BoardEvent::cancelled(&CancelReason::Aborted))
    }

    pub fn append(
        &mut self,
        list_id: ListId,
        title: String,
        surfaces: &mut dyn SurfaceRegistry,
    ) -> LanesResult<Item> {
        self.view.append(list_id, title, surfaces)
    }

    pub fn set_item_height(
        &mut self,
        item_height: f64,
        surfaces: &mut dyn SurfaceRegistry,
    ) -> LanesResult<()> {
        self.view.set_item_height(item_height, surfaces)?;
        self.drag.set_geometry(self.view.geometry());
        Ok(())
    }

    fn apply_autoscroll(
        &mut self,
        request: AutoScrollRequest,
        surfaces: &mut dyn SurfaceRegistry,
        events: &mut Vec<BoardEvent>,
    ) {
        let applied = match self.view.scroll_by(request.list_id, request.delta) {
            Ok(applied) => applied,
            Err(e) => {
                tracing::warn!("auto-scroll ignored: {}", e);
                return;
            }
        };
        if applied == 0.0 {
            return;
        }
        if let Err(e) = self.view.refresh(request.list_id, surfaces) {
            tracing::warn!("refresh after auto-scroll failed: {}", e);
        }
        events.push(BoardEvent::AutoScrolled {
            list_id: request.list_id,
            delta: applied,
        });
        if let Some(preview) = self.drag.reevaluate(self.view.board(), &self.view) {
            events.push(BoardEvent::Preview(preview));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drag::DragPhase;
    use crate::layout::ScreenRect;
    use crate::notify::MockMoveObserver;
    use lanes_core::surface::MockRenderSurface;
    use lanes_core::Geometry;
    use std::collections::HashMap;

    fn controller(titles: &[&str]) -> BoardController {
        let mut board = Board::new("Test".to_string(), None);
        let id = board.add_list("Todo".to_string());
        for title in titles {
            board.append(id, title.to_string()).unwrap();
        }
        let mut view = BoardView::new(board, Geometry::new(1.0, 0).unwrap()).unwrap();
        view.place_list(id, ScreenRect::new(0.0, 0.0, 20.0, 5.0))
            .unwrap();
        let autoscroll = AutoScrollConfig {
            margin: 1.0,
            step: 1.0,
            interval_ms: 0,
        };
        BoardController::new(view, autoscroll)
    }

    fn no_surfaces() -> HashMap<ListId, MockRenderSurface> {
        HashMap::new()
    }

    #[test]
    fn test_non_finite_samples_are_dropped() {
        let mut controller = controller(&["A"]);
        let mut observer = MockMoveObserver::new();
        let events = controller.handle_pointer(
            &PointerSample::pressed(f64::NAN, 0.5, 0),
            &mut no_surfaces(),
            &mut observer,
        );
        assert!(events.is_empty());
        assert_eq!(controller.drag().phase(), DragPhase::Idle);
    }

    #[test]
    fn test_hover_never_starts_a_drag() {
        let mut controller = controller(&["A"]);
        let mut observer = MockMoveObserver::new();
        let events = controller.handle_pointer(
            &PointerSample::released(1.0, 0.5, 0),
            &mut no_surfaces(),
            &mut observer,
        );
        assert!(events.is_empty());
    }

    #[test]
    fn test_abort_discards_session_and_later_release() {
        let mut controller = controller(&["A", "B"]);
        let before = controller.board().clone();
        let mut observer = MockMoveObserver::new();
        observer.expect_on_move().never();
        let mut surfaces = no_surfaces();

        controller.handle_pointer(&PointerSample::pressed(1.0, 0.5, 0), &mut surfaces, &mut observer);
        assert_eq!(
            controller.abort_drag(),
            Some(BoardEvent::Cancelled {
                reason: "drag aborted".to_string(),
            })
        );
        let events = controller.handle_pointer(
            &PointerSample::released(1.0, 1.5, 10),
            &mut surfaces,
            &mut observer,
        );
        assert!(events.is_empty());
        assert_eq!(controller.board(), &before);
        assert!(controller.abort_drag().is_none());
    }

    #[test]
    fn test_autoscroll_reevaluates_index_under_still_pointer() {
        let titles: Vec<String> = (0..20).map(|i| format!("T{}", i)).collect();
        let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
        let mut controller = controller(&refs);
        let id = controller.board().list_ids()[0];
        let mut observer = MockMoveObserver::new();
        let mut surfaces = no_surfaces();

        controller.handle_pointer(&PointerSample::pressed(1.0, 0.5, 0), &mut surfaces, &mut observer);
        let events = controller.handle_pointer(
            &PointerSample::pressed(1.0, 4.5, 10),
            &mut surfaces,
            &mut observer,
        );
        assert!(events.contains(&BoardEvent::AutoScrolled {
            list_id: id,
            delta: 1.0,
        }));
        assert_eq!(controller.drag().session().unwrap().insertion_index, Some(5));

        controller.tick(20, &mut surfaces);
        assert_eq!(controller.view().window(id).unwrap().state().scroll_offset(), 2.0);
        assert_eq!(controller.drag().session().unwrap().insertion_index, Some(6));
    }
}
