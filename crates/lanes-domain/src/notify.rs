//! Observers of committed moves.

use chrono::{DateTime, Utc};
use lanes_core::{LogEntry, Loggable};
use serde::Serialize;

use crate::item::ItemId;
use crate::list::ListId;

/// One applied (or legally no-op) move, as reported to observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommittedMove {
    pub item_id: ItemId,
    pub origin_list_id: ListId,
    pub origin_index: usize,
    pub target_list_id: ListId,
    pub target_index: usize,
    pub committed_at: DateTime<Utc>,
}

impl CommittedMove {
    pub fn is_noop(&self) -> bool {
        self.origin_list_id == self.target_list_id && self.origin_index == self.target_index
    }
}

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
pub trait MoveObserver {
    fn on_move(&mut self, committed: &CommittedMove);
}

/// Fans a notification out to several observers in registration order.
#[derive(Default)]
pub struct MoveObservers {
    observers: Vec<Box<dyn MoveObserver>>,
}

impl MoveObservers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, observer: Box<dyn MoveObserver>) {
        self.observers.push(observer);
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl MoveObserver for MoveObservers {
    fn on_move(&mut self, committed: &CommittedMove) {
        for observer in &mut self.observers {
            observer.on_move(committed);
        }
    }
}

/// Writes every move to the `tracing` log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl MoveObserver for TracingObserver {
    fn on_move(&mut self, committed: &CommittedMove) {
        tracing::info!(
            item = %committed.item_id,
            from = %committed.origin_list_id,
            to = %committed.target_list_id,
            "moved item from index {} to {}",
            committed.origin_index,
            committed.target_index
        );
    }
}

/// In-memory record of committed moves.
#[derive(Debug, Default, Clone)]
pub struct MoveJournal {
    moves: Vec<CommittedMove>,
    logs: Vec<LogEntry>,
}

impl MoveJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn moves(&self) -> &[CommittedMove] {
        &self.moves
    }

    pub fn last_move(&self) -> Option<&CommittedMove> {
        self.moves.last()
    }
}

impl MoveObserver for MoveJournal {
    fn on_move(&mut self, committed: &CommittedMove) {
        let message = if committed.is_noop() {
            format!("Item {} dropped back in place", committed.item_id)
        } else if committed.origin_list_id == committed.target_list_id {
            format!(
                "Item {} moved from position {} to {}",
                committed.item_id, committed.origin_index, committed.target_index
            )
        } else {
            format!(
                "Item {} moved to list {} at position {}",
                committed.item_id, committed.target_list_id, committed.target_index
            )
        };
        self.add_log(message);
        self.moves.push(committed.clone());
    }
}

impl Loggable for MoveJournal {
    fn add_log(&mut self, message: String) {
        self.logs.push(LogEntry::new(message));
    }

    fn get_logs(&self) -> &[LogEntry] {
        &self.logs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn committed(origin: ListId, from: usize, target: ListId, to: usize) -> CommittedMove {
        CommittedMove {
            item_id: Uuid::new_v4(),
            origin_list_id: origin,
            origin_index: from,
            target_list_id: target,
            target_index: to,
            committed_at: Utc::now(),
        }
    }

    #[test]
    fn test_journal_records_moves_and_logs() {
        let list = Uuid::new_v4();
        let mut journal = MoveJournal::new();

        journal.on_move(&committed(list, 1, list, 1));
        journal.on_move(&committed(list, 0, list, 2));

        assert_eq!(journal.moves().len(), 2);
        assert_eq!(journal.get_logs().len(), 2);
        assert!(journal.get_logs()[0].message.contains("back in place"));
        assert!(journal.latest_log().unwrap().message.contains("from position 0 to 2"));
    }

    #[test]
    fn test_observers_are_called_in_order() {
        let mv = committed(Uuid::new_v4(), 0, Uuid::new_v4(), 0);
        let mut seq = mockall::Sequence::new();
        let mut first = MockMoveObserver::new();
        first
            .expect_on_move()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        let mut second = MockMoveObserver::new();
        let expected = mv.clone();
        second
            .expect_on_move()
            .withf(move |got| *got == expected)
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        let mut observers = MoveObservers::new();
        observers.register(Box::new(first));
        observers.register(Box::new(second));
        observers.on_move(&mv);
        assert_eq!(observers.len(), 2);
    }

    #[test]
    fn test_noop_detection() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        assert!(committed(a, 2, a, 2).is_noop());
        assert!(!committed(a, 2, a, 1).is_noop());
        assert!(!committed(a, 0, b, 0).is_noop());
    }
}
