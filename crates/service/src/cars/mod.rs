//! Car inventory: domain types, persistence seam (`CarRepository`) and the
//! tenant-scoped business service (`CarService`).

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use domain::{AddCar, Car, DealerId, UpdateCarStock};
pub use service::{CarService, InventoryService};
