//! 메모리 기반 상품 저장소.
//! > 실무라면 DB 를 쓰겠지만, 예제에서는 `RwLock<HashMap>` 으로 충분하다.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        PoisonError, RwLock,
    },
};

use crate::item::{Item, ItemParams};

#[derive(Debug, Default)]
pub struct ItemRepository {
    store: RwLock<HashMap<u64, Item>>,
    sequence: AtomicU64,
}

impl ItemRepository {
    /// 다음 id 를 부여해 저장 (1 부터 시작)
    pub fn save(&self, mut item: Item) -> Item {
        let id = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        item.id = Some(id);

        self.store
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, item.clone());

        tracing::debug!(id, item_name = %item.item_name, "saved item");
        item
    }

    pub fn find_by_id(&self, id: u64) -> Option<Item> {
        self.store
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    /// id 오름차순
    pub fn find_all(&self) -> Vec<Item> {
        let mut items: Vec<Item> = self
            .store
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        items.sort_by_key(|item| item.id);
        items
    }

    /// 이름, 가격, 수량을 통째로 덮어쓴다. 없는 id 면 `None`.
    pub fn update(&self, id: u64, params: ItemParams) -> Option<Item> {
        let mut store = self.store.write().unwrap_or_else(PoisonError::into_inner);
        let item = store.get_mut(&id)?;

        item.item_name = params.item_name;
        item.price = params.price;
        item.quantity = params.quantity;

        Some(item.clone())
    }

    pub fn clear_store(&self) {
        self.store
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_assigns_increasing_ids() {
        let repository = ItemRepository::default();

        let item_a = repository.save(Item::new("itemA", 10000, 10));
        let item_b = repository.save(Item::new("itemB", 20000, 20));

        assert_eq!(item_a.id, Some(1));
        assert_eq!(item_b.id, Some(2));
        assert_eq!(repository.find_by_id(1), Some(item_a));
    }

    #[test]
    fn find_all_is_ordered_by_id() {
        let repository = ItemRepository::default();
        for n in 0..5 {
            repository.save(Item::new(format!("item{n}"), 1000 * n, n));
        }

        let ids: Vec<_> = repository
            .find_all()
            .into_iter()
            .filter_map(|item| item.id)
            .collect();

        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn update_overwrites_every_field() {
        let repository = ItemRepository::default();
        let saved = repository.save(Item::new("itemA", 10000, 10));
        let id = saved.id.unwrap();

        let updated = repository
            .update(
                id,
                ItemParams {
                    item_name: "itemB".to_owned(),
                    price: Some(20000),
                    quantity: None,
                },
            )
            .unwrap();

        assert_eq!(updated.id, Some(id));
        assert_eq!(updated.item_name, "itemB");
        assert_eq!(updated.price, Some(20000));
        assert_eq!(updated.quantity, None);
        assert_eq!(repository.find_by_id(id), Some(updated));
    }

    #[test]
    fn update_of_missing_item_is_none() {
        let repository = ItemRepository::default();

        let updated = repository.update(
            42,
            ItemParams {
                item_name: "ghost".to_owned(),
                price: None,
                quantity: None,
            },
        );

        assert!(updated.is_none());
    }

    #[test]
    fn clear_store_removes_everything() {
        let repository = ItemRepository::default();
        repository.save(Item::new("itemA", 10000, 10));

        repository.clear_store();

        assert!(repository.find_all().is_empty());
        assert_eq!(repository.find_by_id(1), None);
    }
}
