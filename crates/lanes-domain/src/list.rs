use chrono::{DateTime, Utc};
use lanes_core::{LanesError, LanesResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use crate::item::{Item, ItemId};

pub type ListId = Uuid;

/// An ordered column of items with ids unique inside the list.
///
/// Mutation of the sequence is crate-private: items only enter or leave a
/// list through [`crate::Board`], which keeps ids unique board-wide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderedList {
    pub id: ListId,
    pub name: String,
    #[serde(default)]
    items: Vec<Item>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderedList {
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_items(name: String, items: Vec<Item>) -> LanesResult<Self> {
        let mut list = Self::new(name);
        list.items = items;
        if let Some(id) = list.duplicate_id() {
            return Err(LanesError::Validation(format!(
                "item {} appears twice in list '{}'",
                id, list.name
            )));
        }
        Ok(list)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn position_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.position_of(id).is_some()
    }

    pub fn ids(&self) -> Vec<ItemId> {
        self.items.iter().map(|item| item.id).collect()
    }

    pub fn titles(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.title.as_str()).collect()
    }

    /// Payload edits only; identity and order stay put.
    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    pub fn rename(&mut self, name: String) {
        self.name = name;
        self.updated_at = Utc::now();
    }

    pub(crate) fn duplicate_id(&self) -> Option<ItemId> {
        let mut seen = HashSet::with_capacity(self.items.len());
        self.items
            .iter()
            .find(|item| !seen.insert(item.id))
            .map(|item| item.id)
    }

    pub(crate) fn push(&mut self, item: Item) {
        self.items.push(item);
        self.updated_at = Utc::now();
    }

    pub(crate) fn take(&mut self, index: usize) -> Option<Item> {
        if index < self.items.len() {
            self.updated_at = Utc::now();
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Insert at `index` clamped to `[0, len]`; returns the index used.
    pub(crate) fn insert_clamped(&mut self, index: usize, item: Item) -> usize {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
        self.updated_at = Utc::now();
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(titles: &[&str]) -> OrderedList {
        let items = titles.iter().map(|t| Item::new(t.to_string())).collect();
        OrderedList::with_items("Todo".to_string(), items).unwrap()
    }

    #[test]
    fn test_position_lookup() {
        let list = list(&["A", "B", "C"]);
        let b = list.get(1).unwrap().id;
        assert_eq!(list.position_of(b), Some(1));
        assert!(list.contains(b));
        assert_eq!(list.position_of(Uuid::new_v4()), None);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let item = Item::new("A".to_string());
        let result = OrderedList::with_items("Todo".to_string(), vec![item.clone(), item]);
        assert!(matches!(result, Err(LanesError::Validation(_))));
    }

    #[test]
    fn test_insert_clamps_past_end() {
        let mut list = list(&["A", "B"]);
        let at = list.insert_clamped(99, Item::new("Z".to_string()));
        assert_eq!(at, 2);
        assert_eq!(list.titles(), vec!["A", "B", "Z"]);
    }

    #[test]
    fn test_take_out_of_range() {
        let mut list = list(&["A"]);
        assert!(list.take(1).is_none());
        assert_eq!(list.take(0).unwrap().title, "A");
        assert!(list.is_empty());
    }

    #[test]
    fn test_item_mut_edits_payload_only() {
        let mut list = list(&["A", "B"]);
        let b = list.get(1).unwrap().id;
        list.item_mut(b).unwrap().update_title("Bee".to_string());
        assert_eq!(list.titles(), vec!["A", "Bee"]);
        assert_eq!(list.position_of(b), Some(1));
    }
}
