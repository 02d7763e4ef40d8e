//! Applies a finished drag to the board.

use chrono::Utc;

use crate::drag::{CancelReason, DropRequest};
use crate::notify::{CommittedMove, MoveObserver};
use crate::view::{BoardView, SurfaceRegistry};

#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    Moved(CommittedMove),
    /// Dropped back where it came from; the board was not touched.
    Unchanged(CommittedMove),
    Cancelled(CancelReason),
}

impl CommitOutcome {
    pub fn committed(&self) -> Option<&CommittedMove> {
        match self {
            CommitOutcome::Moved(mv) | CommitOutcome::Unchanged(mv) => Some(mv),
            CommitOutcome::Cancelled(_) => None,
        }
    }
}

pub struct MoveCoordinator;

impl MoveCoordinator {
    /// Relocate the dragged item, refresh both lists, then notify.
    ///
    /// The item is looked up by id before anything is removed, so an
    /// origin index made stale by an outside mutation still moves the right
    /// item. If the item or either list is gone the board is left as it was.
    pub fn commit(
        view: &mut BoardView,
        request: &DropRequest,
        surfaces: &mut dyn SurfaceRegistry,
        observer: &mut dyn MoveObserver,
    ) -> CommitOutcome {
        let board = view.board();
        let Some(origin) = board.list(request.origin_list_id) else {
            return Self::cancel(CancelReason::ListMissing(request.origin_list_id));
        };
        let Some(target) = board.list(request.target_list_id) else {
            return Self::cancel(CancelReason::ListMissing(request.target_list_id));
        };

        let origin_index = match origin.get(request.origin_index) {
            Some(item) if item.id == request.item_id => request.origin_index,
            _ => match origin.position_of(request.item_id) {
                Some(index) => {
                    tracing::debug!(
                        "item {} shifted from {} to {} during drag",
                        request.item_id,
                        request.origin_index,
                        index
                    );
                    index
                }
                None => return Self::cancel(CancelReason::ItemDetached(request.item_id)),
            },
        };

        let same_list = request.origin_list_id == request.target_list_id;
        let target_len = if same_list {
            origin.len() - 1
        } else {
            target.len()
        };
        let target_index = request.insertion_index.min(target_len);

        let mut committed = CommittedMove {
            item_id: request.item_id,
            origin_list_id: request.origin_list_id,
            origin_index,
            target_list_id: request.target_list_id,
            target_index,
            committed_at: Utc::now(),
        };

        if committed.is_noop() {
            tracing::debug!("item {} dropped in place", request.item_id);
            observer.on_move(&committed);
            return CommitOutcome::Unchanged(committed);
        }

        match view.board_mut().relocate(
            request.origin_list_id,
            origin_index,
            request.target_list_id,
            target_index,
        ) {
            Ok(at) => committed.target_index = at,
            Err(e) => {
                tracing::warn!("move of item {} rejected: {}", request.item_id, e);
                return Self::cancel(CancelReason::ItemDetached(request.item_id));
            }
        }

        if let Err(e) = view.refresh(request.origin_list_id, surfaces) {
            tracing::warn!("refresh after move failed: {}", e);
        }
        if !same_list {
            if let Err(e) = view.refresh(request.target_list_id, surfaces) {
                tracing::warn!("refresh after move failed: {}", e);
            }
        }

        tracing::debug!(
            "committed item {}: {}[{}] -> {}[{}]",
            committed.item_id,
            committed.origin_list_id,
            committed.origin_index,
            committed.target_list_id,
            committed.target_index
        );
        observer.on_move(&committed);
        CommitOutcome::Moved(committed)
    }

    fn cancel(reason: CancelReason) -> CommitOutcome {
        tracing::debug!("commit cancelled: {}", reason);
        CommitOutcome::Cancelled(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::notify::MockMoveObserver;
    use lanes_core::surface::MockRenderSurface;
    use lanes_core::Geometry;
    use std::collections::HashMap;
    use uuid::Uuid;

    fn view(lists: &[&[&str]]) -> BoardView {
        let mut board = Board::new("Test".to_string(), None);
        for (i, titles) in lists.iter().enumerate() {
            let id = board.add_list(format!("L{}", i));
            for title in *titles {
                board.append(id, title.to_string()).unwrap();
            }
        }
        BoardView::new(board, Geometry::new(50.0, 1).unwrap()).unwrap()
    }

    fn request(view: &BoardView, from: (usize, usize), to: (usize, usize)) -> DropRequest {
        let lists = view.board().lists();
        DropRequest {
            item_id: lists[from.0].items()[from.1].id,
            origin_list_id: lists[from.0].id,
            origin_index: from.1,
            target_list_id: lists[to.0].id,
            insertion_index: to.1,
        }
    }

    fn no_surfaces() -> HashMap<Uuid, MockRenderSurface> {
        HashMap::new()
    }

    #[test]
    fn test_noop_drop_is_notified_without_mutation() {
        let mut view = view(&[&["A", "B", "C"]]);
        let before = view.board().clone();
        let req = request(&view, (0, 1), (0, 1));

        let mut observer = MockMoveObserver::new();
        observer
            .expect_on_move()
            .withf(|mv| mv.is_noop() && mv.origin_index == 1)
            .times(1)
            .return_const(());

        let outcome = MoveCoordinator::commit(&mut view, &req, &mut no_surfaces(), &mut observer);
        assert!(matches!(outcome, CommitOutcome::Unchanged(_)));
        assert_eq!(view.board(), &before);
    }

    #[test]
    fn test_stale_origin_index_relocates_by_id() {
        let mut view = view(&[&["A", "B", "C"], &[]]);
        let req = request(&view, (0, 2), (1, 0));
        let head = request(&view, (0, 0), (1, 0));

        let mut observer = MockMoveObserver::new();
        observer.expect_on_move().times(2).return_const(());
        MoveCoordinator::commit(&mut view, &head, &mut no_surfaces(), &mut observer);

        let outcome = MoveCoordinator::commit(&mut view, &req, &mut no_surfaces(), &mut observer);
        let committed = outcome.committed().unwrap();
        assert_eq!(committed.origin_index, 1);
        assert_eq!(view.board().lists()[0].titles(), vec!["B"]);
        assert_eq!(view.board().lists()[1].titles(), vec!["C", "A"]);
    }

    #[test]
    fn test_vanished_item_cancels_without_notification() {
        let mut view = view(&[&["A"], &[]]);
        let mut req = request(&view, (0, 0), (1, 0));
        req.item_id = Uuid::new_v4();
        let before = view.board().clone();

        let mut observer = MockMoveObserver::new();
        observer.expect_on_move().never();

        let outcome = MoveCoordinator::commit(&mut view, &req, &mut no_surfaces(), &mut observer);
        assert_eq!(
            outcome,
            CommitOutcome::Cancelled(CancelReason::ItemDetached(req.item_id))
        );
        assert_eq!(view.board(), &before);
    }

    #[test]
    fn test_missing_target_list_cancels() {
        let mut view = view(&[&["A"]]);
        let mut req = request(&view, (0, 0), (0, 0));
        req.target_list_id = Uuid::new_v4();

        let mut observer = MockMoveObserver::new();
        observer.expect_on_move().never();
        let outcome = MoveCoordinator::commit(&mut view, &req, &mut no_surfaces(), &mut observer);
        assert!(matches!(
            outcome,
            CommitOutcome::Cancelled(CancelReason::ListMissing(_))
        ));
    }

    #[test]
    fn test_insertion_index_clamped_after_removal() {
        let mut view = view(&[&["A", "B", "C"]]);
        let req = request(&view, (0, 0), (0, 9));

        let mut observer = MockMoveObserver::new();
        observer
            .expect_on_move()
            .withf(|mv| mv.target_index == 2)
            .times(1)
            .return_const(());
        MoveCoordinator::commit(&mut view, &req, &mut no_surfaces(), &mut observer);
        assert_eq!(view.board().lists()[0].titles(), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_cross_list_move_refreshes_both_surfaces() {
        let mut view = view(&[&["A", "B"], &["C"]]);
        let ids = view.board().list_ids();
        for (i, id) in ids.iter().enumerate() {
            view.place_list(
                *id,
                crate::layout::ScreenRect::new(i as f64 * 100.0, 0.0, 100.0, 500.0),
            )
            .unwrap();
        }

        let mut origin = MockRenderSurface::new();
        origin
            .expect_set_extent()
            .withf(|extent| *extent == 50.0)
            .times(1)
            .return_const(());
        origin.expect_acquire().never();
        origin.expect_release().times(1).return_const(());
        let mut target = MockRenderSurface::new();
        target
            .expect_set_extent()
            .withf(|extent| *extent == 100.0)
            .times(1)
            .return_const(());
        target
            .expect_acquire()
            .times(2)
            .returning(|index, _| Ok(lanes_core::HandleId(index as u64)));

        let mut surfaces = HashMap::from([(ids[0], origin), (ids[1], target)]);
        // Seed the origin rows without going through the mocks' expectations.
        let mut seeded = MockRenderSurface::new();
        seeded.expect_set_extent().return_const(());
        seeded
            .expect_acquire()
            .returning(|index, _| Ok(lanes_core::HandleId(index as u64)));
        let mut seed = HashMap::from([(ids[0], seeded)]);
        view.refresh(ids[0], &mut seed).unwrap();

        let req = request(&view, (0, 1), (1, 0));
        let mut observer = MockMoveObserver::new();
        observer.expect_on_move().times(1).return_const(());
        let outcome = MoveCoordinator::commit(&mut view, &req, &mut surfaces, &mut observer);

        assert!(matches!(outcome, CommitOutcome::Moved(_)));
        assert_eq!(view.board().lists()[1].titles(), vec!["B", "C"]);
        assert_eq!(view.window(ids[1]).unwrap().rows().len(), 2);
        assert_eq!(view.window(ids[0]).unwrap().rows().len(), 1);
    }
}
