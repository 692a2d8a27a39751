use axum::{extract::{Path, Query, State}, http::{header, StatusCode}, response::IntoResponse, Json};
use common::types::Message;
use serde::Deserialize;
use service::cars::{AddCar, Car, UpdateCarStock};
use tracing::info;

use crate::{auth::AuthDealer, errors::JsonApiError, state::ServerState};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    pub make: String,
    pub model: String,
}

/// Target of the `Location` header returned on creation (`get_car_by_id`).
pub fn car_location(id: i32) -> String {
    format!("/cars/{id}")
}

#[utoipa::path(
    get, path = "/cars", tag = "cars",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Cars of the calling dealer", body = [crate::openapi::CarDoc]),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Dealer has no cars")
    )
)]
pub async fn list_cars(State(state): State<ServerState>, AuthDealer(dealer_id): AuthDealer) -> Result<Json<Vec<Car>>, JsonApiError> {
    let cars = state.cars.list_cars(dealer_id).await.map_err(|e| JsonApiError::from_service("list cars", e))?;
    // An empty inventory is reported like a missing resource.
    if cars.is_empty() {
        return Err(JsonApiError::not_found("no cars found for this dealer"));
    }
    info!(dealer_id, count = cars.len(), "list cars");
    Ok(Json(cars))
}

#[utoipa::path(
    get, path = "/cars/{id}", tag = "cars",
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Car ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::CarDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_car_by_id(State(state): State<ServerState>, AuthDealer(dealer_id): AuthDealer, Path(id): Path<i32>) -> Result<Json<Car>, JsonApiError> {
    match state.cars.get_car(id, dealer_id).await {
        Ok(Some(car)) => Ok(Json(car)),
        Ok(None) => Err(JsonApiError::not_found(format!("car {id} not found"))),
        Err(e) => Err(JsonApiError::from_service("get car", e)),
    }
}

#[utoipa::path(
    post, path = "/cars", tag = "cars",
    security(("bearer" = [])),
    request_body = crate::openapi::AddCarDoc,
    responses(
        (status = 201, description = "Created; Location points at the new car", body = crate::openapi::CarDoc),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn add_car(State(state): State<ServerState>, AuthDealer(dealer_id): AuthDealer, Json(input): Json<AddCar>) -> Result<impl IntoResponse, JsonApiError> {
    let car = state.cars.add_car(input, dealer_id).await.map_err(|e| JsonApiError::from_service("add car", e))?;
    info!(id = car.id, dealer_id, make = %car.make, model = %car.model, "created car");
    Ok((StatusCode::CREATED, [(header::LOCATION, car_location(car.id))], Json(car)))
}

#[utoipa::path(
    put, path = "/cars/{id}/stock", tag = "cars",
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Car ID")),
    request_body = crate::openapi::UpdateCarStockDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::MessageDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_car_stock(
    State(state): State<ServerState>,
    AuthDealer(dealer_id): AuthDealer,
    Path(id): Path<i32>,
    Json(input): Json<UpdateCarStock>,
) -> Result<Json<Message>, JsonApiError> {
    match state.cars.update_car_stock(id, input.stock, dealer_id).await {
        Ok(true) => Ok(Json(Message::new("stock updated"))),
        Ok(false) => Err(JsonApiError::not_found(format!("car {id} not found"))),
        Err(e) => Err(JsonApiError::from_service("update car stock", e)),
    }
}

#[utoipa::path(
    delete, path = "/cars/{id}", tag = "cars",
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Car ID")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_car(State(state): State<ServerState>, AuthDealer(dealer_id): AuthDealer, Path(id): Path<i32>) -> Result<Json<Message>, JsonApiError> {
    match state.cars.delete_car(id, dealer_id).await {
        Ok(true) => Ok(Json(Message::new("car deleted"))),
        Ok(false) => Err(JsonApiError::not_found(format!("car {id} not found"))),
        Err(e) => Err(JsonApiError::from_service("delete car", e)),
    }
}

#[utoipa::path(
    get, path = "/cars/search", tag = "cars",
    security(("bearer" = [])),
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching cars", body = [crate::openapi::CarDoc]),
        (status = 404, description = "No matches")
    )
)]
pub async fn search_cars(State(state): State<ServerState>, AuthDealer(dealer_id): AuthDealer, Query(q): Query<SearchQuery>) -> Result<Json<Vec<Car>>, JsonApiError> {
    let cars = state
        .cars
        .search_cars(dealer_id, &q.make, &q.model)
        .await
        .map_err(|e| JsonApiError::from_service("search cars", e))?;
    if cars.is_empty() {
        return Err(JsonApiError::not_found("no cars match the search"));
    }
    Ok(Json(cars))
}
