use serde::{Deserialize, Serialize};

use crate::models::{StorageItem, ValidationErrors, WorkloadDraft, WorkloadItem};

/// Compute and storage items collected by the calculator.
///
/// Collections are replaced wholesale on every change; items are never
/// edited in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workload {
    #[serde(default)]
    pub items: Vec<WorkloadItem>,
    #[serde(default)]
    pub storage: Vec<StorageItem>,
}

impl Workload {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.storage.is_empty()
    }

    /// Validate a draft and append it. Returns the new item's index.
    pub fn add_item(&mut self, draft: &WorkloadDraft) -> Result<usize, ValidationErrors> {
        let item = draft.validate()?;
        self.items = self.items.iter().cloned().chain(std::iter::once(item)).collect();
        tracing::debug!(count = self.items.len(), "workload item added");
        Ok(self.items.len() - 1)
    }

    pub fn remove_item(&mut self, index: usize) -> Option<WorkloadItem> {
        let removed = self.items.get(index).cloned()?;
        self.items = without(&self.items, index);
        Some(removed)
    }

    pub fn add_storage(&mut self, item: StorageItem) -> usize {
        self.storage = self.storage.iter().cloned().chain(std::iter::once(item)).collect();
        self.storage.len() - 1
    }

    pub fn remove_storage(&mut self, index: usize) -> Option<StorageItem> {
        let removed = self.storage.get(index).cloned()?;
        self.storage = without(&self.storage, index);
        Some(removed)
    }

    pub fn clear(&mut self) {
        *self = Workload::default();
    }
}

fn without<T: Clone>(items: &[T], index: usize) -> Vec<T> {
    items
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, item)| item.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(region: &str) -> WorkloadDraft {
        WorkloadDraft {
            region: Some(region.into()),
            compute_instance_id: Some("c1".into()),
            os_image_id: Some("os1".into()),
            ..Default::default()
        }
    }

    #[test]
    fn add_and_remove_by_index() {
        let mut w = Workload::default();
        assert_eq!(w.add_item(&draft("a")).unwrap(), 0);
        assert_eq!(w.add_item(&draft("b")).unwrap(), 1);
        let removed = w.remove_item(0).unwrap();
        assert_eq!(removed.region, "a");
        assert_eq!(w.items.len(), 1);
        assert_eq!(w.items[0].region, "b");
        assert!(w.remove_item(5).is_none());
    }

    #[test]
    fn invalid_draft_leaves_collection_untouched() {
        let mut w = Workload::default();
        let err = w.add_item(&WorkloadDraft::default()).unwrap_err();
        assert_eq!(err.get("region"), Some("Region is required"));
        assert!(w.is_empty());
    }
}
