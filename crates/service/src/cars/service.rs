use std::sync::Arc;

use async_trait::async_trait;
use models::car::{validate_label, validate_stock, validate_year};
use tracing::{info, instrument};

use super::domain::{AddCar, Car, DealerId};
use super::repository::CarRepository;
use crate::errors::ServiceError;

/// Dealer-scoped car operations consumed by the HTTP layer.
///
/// Absence is never an error: a missing car, or one owned by another dealer,
/// comes back as `None`, `false` or an empty list.
#[async_trait]
pub trait CarService: Send + Sync {
    async fn list_cars(&self, dealer_id: DealerId) -> Result<Vec<Car>, ServiceError>;
    async fn get_car(&self, id: i32, dealer_id: DealerId) -> Result<Option<Car>, ServiceError>;
    async fn add_car(&self, input: AddCar, dealer_id: DealerId) -> Result<Car, ServiceError>;
    async fn update_car_stock(&self, id: i32, stock: i32, dealer_id: DealerId) -> Result<bool, ServiceError>;
    async fn delete_car(&self, id: i32, dealer_id: DealerId) -> Result<bool, ServiceError>;
    async fn search_cars(&self, dealer_id: DealerId, make: &str, model: &str) -> Result<Vec<Car>, ServiceError>;
}

/// `CarService` backed by any `CarRepository`.
pub struct InventoryService<R: CarRepository> {
    repo: Arc<R>,
}

impl<R: CarRepository> InventoryService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }
}

#[async_trait]
impl<R: CarRepository> CarService for InventoryService<R> {
    #[instrument(skip(self))]
    async fn list_cars(&self, dealer_id: DealerId) -> Result<Vec<Car>, ServiceError> {
        self.repo.list_by_dealer(dealer_id).await
    }

    #[instrument(skip(self))]
    async fn get_car(&self, id: i32, dealer_id: DealerId) -> Result<Option<Car>, ServiceError> {
        self.repo.find(id, dealer_id).await
    }

    /// Validate and store a new car owned by `dealer_id`.
    ///
    /// # Examples
    /// ```
    /// use service::cars::{AddCar, CarService, InventoryService};
    /// use service::cars::repository::memory::InMemoryCarRepository;
    /// use std::sync::Arc;
    /// let svc = InventoryService::new(Arc::new(InMemoryCarRepository::default()));
    /// let input = AddCar { make: " Toyota ".into(), model: "Corolla".into(), year: 2020, stock: 5 };
    /// let car = tokio_test::block_on(svc.add_car(input, 7)).unwrap();
    /// assert_eq!(car.make, "Toyota");
    /// assert_eq!(car.dealer_id, 7);
    /// ```
    #[instrument(skip(self, input), fields(make = %input.make, model = %input.model))]
    async fn add_car(&self, input: AddCar, dealer_id: DealerId) -> Result<Car, ServiceError> {
        let input = AddCar {
            make: validate_label("make", &input.make)?,
            model: validate_label("model", &input.model)?,
            year: input.year,
            stock: input.stock,
        };
        validate_year(input.year)?;
        validate_stock(input.stock)?;

        let car = self.repo.insert(dealer_id, &input).await?;
        info!(car_id = car.id, dealer_id, "car_added");
        Ok(car)
    }

    #[instrument(skip(self))]
    async fn update_car_stock(&self, id: i32, stock: i32, dealer_id: DealerId) -> Result<bool, ServiceError> {
        validate_stock(stock)?;
        let updated = self.repo.set_stock(id, stock, dealer_id).await?;
        if updated {
            info!(car_id = id, dealer_id, stock, "car_stock_updated");
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete_car(&self, id: i32, dealer_id: DealerId) -> Result<bool, ServiceError> {
        let deleted = self.repo.delete(id, dealer_id).await?;
        if deleted {
            info!(car_id = id, dealer_id, "car_deleted");
        }
        Ok(deleted)
    }

    /// Exact match on both `make` and `model`, ignoring case and surrounding
    /// whitespace. A blank term matches nothing.
    #[instrument(skip(self))]
    async fn search_cars(&self, dealer_id: DealerId, make: &str, model: &str) -> Result<Vec<Car>, ServiceError> {
        let (make, model) = (make.trim(), model.trim());
        if make.is_empty() || model.is_empty() {
            return Ok(Vec::new());
        }
        self.repo.search(dealer_id, make, model).await
    }
}
