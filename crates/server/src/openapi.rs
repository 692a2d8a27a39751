use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct CarDoc {
    pub id: i32,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub stock: i32,
    pub dealer_id: i32,
}

#[derive(ToSchema)]
pub struct AddCarDoc {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub stock: i32,
}

#[derive(ToSchema)]
pub struct UpdateCarStockDoc { pub stock: i32 }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String, pub detail: Option<String> }

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::cars::list_cars,
        crate::routes::cars::get_car_by_id,
        crate::routes::cars::add_car,
        crate::routes::cars::update_car_stock,
        crate::routes::cars::delete_car,
        crate::routes::cars::search_cars,
    ),
    components(
        schemas(
            HealthResponse,
            CarDoc,
            AddCarDoc,
            UpdateCarStockDoc,
            MessageDoc,
            ErrorDoc,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "cars")
    )
)]
pub struct ApiDoc;
