use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        cache::{cache_stats, clear_cache},
        catalogs::{
            create_catalog, delete_catalogs, get_catalog, get_catalog_properties, list_catalogs,
            update_catalogs,
        },
        categories::{
            create_categories, create_category, delete_categories, get_categories, get_category,
            update_categories,
        },
        health::{healthz, livez},
        items::{
            create_item, create_items, delete_items, get_item, get_item_by_code, get_items,
            get_items_by_codes, update_items,
        },
        properties::{
            create_property, delete_properties, get_property, list_properties,
            search_dictionary_values, update_properties,
        },
        search::search,
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        // Item routes
        .route(
            "/items",
            get(get_items)
                .post(create_item)
                .put(update_items)
                .delete(delete_items),
        )
        .route("/items/batch", post(create_items))
        .route("/items/by-codes", get(get_items_by_codes))
        .route("/items/by-code/{code}", get(get_item_by_code))
        .route("/items/{id}", get(get_item))
        // Search
        .route("/search", post(search))
        // Property routes
        .route(
            "/properties",
            get(list_properties)
                .post(create_property)
                .put(update_properties)
                .delete(delete_properties),
        )
        .route("/properties/{id}", get(get_property))
        .route("/properties/{id}/values", get(search_dictionary_values))
        // Category routes
        .route(
            "/categories",
            get(get_categories)
                .post(create_category)
                .put(update_categories)
                .delete(delete_categories),
        )
        .route("/categories/batch", post(create_categories))
        .route("/categories/{id}", get(get_category))
        // Catalog routes
        .route(
            "/catalogs",
            get(list_catalogs)
                .post(create_catalog)
                .put(update_catalogs)
                .delete(delete_catalogs),
        )
        .route("/catalogs/{id}", get(get_catalog))
        .route("/catalogs/{id}/properties", get(get_catalog_properties))
        // Cache control
        .route("/cache/clear", post(clear_cache))
        .route("/cache/stats", get(cache_stats))
        .layer(cors);

    Router::new()
        .route("/livez", get(livez))
        .route("/healthz", get(healthz))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}
