use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use models::car;

use crate::cars::domain::{search_key, AddCar, Car, DealerId};
use crate::cars::repository::CarRepository;
use crate::errors::ServiceError;

pub struct SeaOrmCarRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmCarRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl CarRepository for SeaOrmCarRepository {
    async fn list_by_dealer(&self, dealer_id: DealerId) -> Result<Vec<Car>, ServiceError> {
        let rows = car::Entity::find()
            .filter(car::Column::DealerId.eq(dealer_id))
            .order_by_asc(car::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Car::from).collect())
    }

    async fn find(&self, id: i32, dealer_id: DealerId) -> Result<Option<Car>, ServiceError> {
        let row = car::Entity::find_by_id(id)
            .filter(car::Column::DealerId.eq(dealer_id))
            .one(&self.db)
            .await?;
        Ok(row.map(Car::from))
    }

    async fn insert(&self, dealer_id: DealerId, input: &AddCar) -> Result<Car, ServiceError> {
        let created = car::create(&self.db, dealer_id, &input.make, &input.model, input.year, input.stock).await?;
        Ok(created.into())
    }

    async fn set_stock(&self, id: i32, stock: i32, dealer_id: DealerId) -> Result<bool, ServiceError> {
        // One conditional UPDATE: ownership check and write cannot interleave.
        let res = car::Entity::update_many()
            .col_expr(car::Column::Stock, Expr::value(stock))
            .filter(car::Column::Id.eq(id))
            .filter(car::Column::DealerId.eq(dealer_id))
            .exec(&self.db)
            .await?;
        Ok(res.rows_affected > 0)
    }

    async fn delete(&self, id: i32, dealer_id: DealerId) -> Result<bool, ServiceError> {
        let res = car::Entity::delete_many()
            .filter(car::Column::Id.eq(id))
            .filter(car::Column::DealerId.eq(dealer_id))
            .exec(&self.db)
            .await?;
        Ok(res.rows_affected > 0)
    }

    async fn search(&self, dealer_id: DealerId, make: &str, model: &str) -> Result<Vec<Car>, ServiceError> {
        let rows = car::Entity::find()
            .filter(car::Column::DealerId.eq(dealer_id))
            .filter(car::Column::MakeKey.eq(search_key(make)))
            .filter(car::Column::ModelKey.eq(search_key(model)))
            .order_by_asc(car::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Car::from).collect())
    }
}
