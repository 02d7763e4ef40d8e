use chrono::{DateTime, Utc};
use lanes_core::{LanesError, LanesResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use crate::item::{Item, ItemId};
use crate::list::{ListId, OrderedList};

pub type BoardId = Uuid;

/// All lists of one board, in column order.
///
/// Every item id appears at most once across the whole board. The only
/// operations that move items between lists are [`Board::append`] and the
/// crate-private relocation used by the move coordinator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    lists: Vec<OrderedList>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Board {
    pub fn new(name: String, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            lists: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn from_json(content: &str) -> LanesResult<Self> {
        let board: Board =
            serde_json::from_str(content).map_err(|e| LanesError::Serialization(e.to_string()))?;
        board.validate()?;
        Ok(board)
    }

    pub fn to_json_pretty(&self) -> LanesResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| LanesError::Serialization(e.to_string()))
    }

    pub fn add_list(&mut self, name: String) -> ListId {
        let list = OrderedList::new(name);
        let id = list.id;
        self.lists.push(list);
        self.updated_at = Utc::now();
        id
    }

    /// Attach a pre-populated list, rejecting ids already on the board.
    pub fn insert_list(&mut self, list: OrderedList) -> LanesResult<ListId> {
        if self.list(list.id).is_some() {
            return Err(LanesError::Validation(format!(
                "list {} already on board",
                list.id
            )));
        }
        if let Some(item) = list.items().iter().find(|item| self.contains_item(item.id)) {
            return Err(LanesError::Validation(format!(
                "item {} already on board",
                item.id
            )));
        }
        if let Some(id) = list.duplicate_id() {
            return Err(LanesError::Validation(format!(
                "item {} appears twice in list '{}'",
                id, list.name
            )));
        }
        let id = list.id;
        self.lists.push(list);
        self.updated_at = Utc::now();
        Ok(id)
    }

    pub fn lists(&self) -> &[OrderedList] {
        &self.lists
    }

    pub fn list_ids(&self) -> Vec<ListId> {
        self.lists.iter().map(|list| list.id).collect()
    }

    pub fn list(&self, id: ListId) -> Option<&OrderedList> {
        self.lists.iter().find(|list| list.id == id)
    }

    pub fn list_by_name(&self, name: &str) -> Option<&OrderedList> {
        self.lists.iter().find(|list| list.name == name)
    }

    pub fn list_index(&self, id: ListId) -> Option<usize> {
        self.lists.iter().position(|list| list.id == id)
    }

    pub(crate) fn list_mut(&mut self, id: ListId) -> Option<&mut OrderedList> {
        self.lists.iter_mut().find(|list| list.id == id)
    }

    /// Find the list and index currently holding `item_id`.
    pub fn locate(&self, item_id: ItemId) -> Option<(ListId, usize)> {
        self.lists
            .iter()
            .find_map(|list| list.position_of(item_id).map(|index| (list.id, index)))
    }

    pub fn contains_item(&self, item_id: ItemId) -> bool {
        self.locate(item_id).is_some()
    }

    pub fn total_items(&self) -> usize {
        self.lists.iter().map(OrderedList::len).sum()
    }

    /// Create an item at the end of `list_id`.
    pub fn append(&mut self, list_id: ListId, title: String) -> LanesResult<Item> {
        let list = self
            .list_mut(list_id)
            .ok_or_else(|| LanesError::NotFound(format!("list {}", list_id)))?;
        let item = Item::new(title);
        list.push(item.clone());
        self.updated_at = Utc::now();
        Ok(item)
    }

    /// Check list ids and item ids are unique across the board.
    pub fn validate(&self) -> LanesResult<()> {
        let mut list_ids = HashSet::new();
        let mut item_ids = HashSet::new();
        for list in &self.lists {
            if !list_ids.insert(list.id) {
                return Err(LanesError::Validation(format!(
                    "list {} appears twice",
                    list.id
                )));
            }
            for item in list.items() {
                if !item_ids.insert(item.id) {
                    return Err(LanesError::Validation(format!(
                        "item {} appears more than once on the board",
                        item.id
                    )));
                }
            }
        }
        Ok(())
    }

    /// Move one item between (or within) lists in a single step.
    ///
    /// Both lists and the origin index are checked before anything is
    /// touched, so an error leaves the board unchanged. The insertion index
    /// is clamped against the target length measured after the removal.
    pub(crate) fn relocate(
        &mut self,
        origin_list_id: ListId,
        origin_index: usize,
        target_list_id: ListId,
        insertion_index: usize,
    ) -> LanesResult<usize> {
        let origin_pos = self
            .list_index(origin_list_id)
            .ok_or_else(|| LanesError::NotFound(format!("list {}", origin_list_id)))?;
        let target_pos = self
            .list_index(target_list_id)
            .ok_or_else(|| LanesError::NotFound(format!("list {}", target_list_id)))?;

        let item = self.lists[origin_pos].take(origin_index).ok_or_else(|| {
            LanesError::NotFound(format!(
                "index {} in list {}",
                origin_index, origin_list_id
            ))
        })?;
        let at = self.lists[target_pos].insert_clamped(insertion_index, item);
        self.updated_at = Utc::now();
        Ok(at)
    }
}
