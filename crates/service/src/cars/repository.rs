use async_trait::async_trait;

use super::domain::{AddCar, Car, DealerId};
use crate::errors::ServiceError;

/// Persistence seam for cars. Every method is scoped by `dealer_id`: a row
/// owned by another dealer behaves exactly like a missing row.
#[async_trait]
pub trait CarRepository: Send + Sync {
    async fn list_by_dealer(&self, dealer_id: DealerId) -> Result<Vec<Car>, ServiceError>;
    async fn find(&self, id: i32, dealer_id: DealerId) -> Result<Option<Car>, ServiceError>;
    async fn insert(&self, dealer_id: DealerId, car: &AddCar) -> Result<Car, ServiceError>;
    /// Overwrite `stock` in a single write; `false` when no row matched.
    async fn set_stock(&self, id: i32, stock: i32, dealer_id: DealerId) -> Result<bool, ServiceError>;
    async fn delete(&self, id: i32, dealer_id: DealerId) -> Result<bool, ServiceError>;
    /// `make` and `model` arrive trimmed; comparison is case-insensitive.
    async fn search(&self, dealer_id: DealerId, make: &str, model: &str) -> Result<Vec<Car>, ServiceError>;
}

/// In-memory repository for tests and doc examples
pub mod memory {
    use super::*;
    use crate::cars::domain::search_key;
    use std::collections::BTreeMap;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct Table {
        next_id: i32,
        rows: BTreeMap<i32, Car>,
    }

    #[derive(Default)]
    pub struct InMemoryCarRepository {
        table: Mutex<Table>,
    }

    impl InMemoryCarRepository {
        /// Seed rows as-is (ids included); later inserts continue after the highest id.
        pub async fn with_cars(cars: impl IntoIterator<Item = Car>) -> Self {
            let repo = Self::default();
            {
                let mut t = repo.table.lock().await;
                for car in cars {
                    t.next_id = t.next_id.max(car.id);
                    t.rows.insert(car.id, car);
                }
            }
            repo
        }
    }

    #[async_trait]
    impl CarRepository for InMemoryCarRepository {
        async fn list_by_dealer(&self, dealer_id: DealerId) -> Result<Vec<Car>, ServiceError> {
            let t = self.table.lock().await;
            Ok(t.rows.values().filter(|c| c.dealer_id == dealer_id).cloned().collect())
        }

        async fn find(&self, id: i32, dealer_id: DealerId) -> Result<Option<Car>, ServiceError> {
            let t = self.table.lock().await;
            Ok(t.rows.get(&id).filter(|c| c.dealer_id == dealer_id).cloned())
        }

        async fn insert(&self, dealer_id: DealerId, car: &AddCar) -> Result<Car, ServiceError> {
            let mut t = self.table.lock().await;
            t.next_id += 1;
            let created = Car {
                id: t.next_id,
                make: car.make.clone(),
                model: car.model.clone(),
                year: car.year,
                stock: car.stock,
                dealer_id,
            };
            t.rows.insert(created.id, created.clone());
            Ok(created)
        }

        async fn set_stock(&self, id: i32, stock: i32, dealer_id: DealerId) -> Result<bool, ServiceError> {
            let mut t = self.table.lock().await;
            match t.rows.get_mut(&id) {
                Some(c) if c.dealer_id == dealer_id => {
                    c.stock = stock;
                    Ok(true)
                }
                _ => Ok(false),
            }
        }

        async fn delete(&self, id: i32, dealer_id: DealerId) -> Result<bool, ServiceError> {
            let mut t = self.table.lock().await;
            if t.rows.get(&id).is_some_and(|c| c.dealer_id == dealer_id) {
                t.rows.remove(&id);
                return Ok(true);
            }
            Ok(false)
        }

        async fn search(&self, dealer_id: DealerId, make: &str, model: &str) -> Result<Vec<Car>, ServiceError> {
            let (make, model) = (search_key(make), search_key(model));
            let t = self.table.lock().await;
            Ok(t.rows
                .values()
                .filter(|c| c.dealer_id == dealer_id && search_key(&c.make) == make && search_key(&c.model) == model)
                .cloned()
                .collect())
        }
    }
}
