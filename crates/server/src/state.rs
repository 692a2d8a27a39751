use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::auth::TokenConfig;
use service::cars::repo::seaorm::SeaOrmCarRepository;
use service::cars::{CarService, InventoryService};

#[derive(Clone)]
pub struct ServerState {
    pub cars: Arc<dyn CarService>,
    pub tokens: Arc<TokenConfig>,
}

impl ServerState {
    pub fn new(cars: Arc<dyn CarService>, tokens: TokenConfig) -> Self {
        Self { cars, tokens: Arc::new(tokens) }
    }

    /// Production wiring: `InventoryService` over the SeaORM repository.
    pub fn from_db(db: DatabaseConnection, tokens: TokenConfig) -> Self {
        let repo = SeaOrmCarRepository::new(db);
        Self::new(Arc::new(InventoryService::new(Arc::new(repo))), tokens)
    }
}
