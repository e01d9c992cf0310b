//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::info;

use crate::domain::{AirportCode, FlightId, Price};
use crate::inventory::BookingError;
use crate::planner::{PlanRequest, UnknownAirport, shortest_path};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/routes/shortest", get(shortest_route))
        .route("/flights/search", get(search_flight))
        .route("/itinerary/plan", post(plan_itinerary))
        .route("/flights/book", post(book_flight))
        .route("/flights/cancel", post(cancel_flight))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Shortest route between two airports.
async fn shortest_route(
    State(state): State<AppState>,
    Query(req): Query<ShortestRouteQuery>,
) -> Result<Json<RouteResponse>, AppError> {
    let origin = parse_airport(&req.origin)?;
    let destination = parse_airport(&req.destination)?;

    let response = match shortest_path(&state.graph, origin, destination)? {
        Some(path) => RouteResponse::found(&path),
        None => RouteResponse::unreachable(origin, destination),
    };
    Ok(Json(response))
}

/// Nearest-price flight on a route.
async fn search_flight(
    State(state): State<AppState>,
    Query(req): Query<FlightSearchQuery>,
) -> Result<Json<FlightSearchResponse>, AppError> {
    let origin = parse_airport(&req.origin)?;
    let destination = parse_airport(&req.destination)?;
    let price = Price::parse(&req.price).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    let flight = state.catalog.nearest(origin, destination, price).map(|flight| {
        let seats_remaining = state.inventory.seats_remaining(&flight.id);
        FlightResult::from_record(&flight, seats_remaining)
    });

    Ok(Json(FlightSearchResponse { flight }))
}

/// Plan a full itinerary and book every leg.
async fn plan_itinerary(
    State(state): State<AppState>,
    Json(req): Json<PlanItineraryRequest>,
) -> Result<Json<ItineraryResponse>, AppError> {
    let request = PlanRequest {
        origin: parse_airport(&req.origin)?,
        destination: parse_airport(&req.destination)?,
        target_price: Price::from_major(req.target_price).map_err(|e| AppError::BadRequest {
            message: e.to_string(),
        })?,
    };

    let itinerary = state.builder.plan(&request)?;
    info!(
        origin = %itinerary.origin(),
        destination = %itinerary.destination(),
        status = %itinerary.status(),
        "plan request served"
    );

    Ok(Json(ItineraryResponse::from(&itinerary)))
}

/// Book one seat on a specific flight.
async fn book_flight(
    State(state): State<AppState>,
    Json(req): Json<BookFlightRequest>,
) -> Result<Json<BookingResponse>, AppError> {
    let flight_id = parse_flight_id(&req.flight_id)?;
    let confirmation = state.inventory.book(&flight_id)?;

    Ok(Json(BookingResponse {
        flight_id: confirmation.flight_id.to_string(),
        seats_remaining: confirmation.seats_remaining,
    }))
}

/// Cancel one booking on a specific flight.
async fn cancel_flight(
    State(state): State<AppState>,
    Json(req): Json<CancelFlightRequest>,
) -> Result<Json<BookingResponse>, AppError> {
    let flight_id = parse_flight_id(&req.flight_id)?;
    let seats_remaining = state.inventory.cancel(&flight_id)?;

    Ok(Json(BookingResponse {
        flight_id: flight_id.to_string(),
        seats_remaining,
    }))
}

fn parse_airport(raw: &str) -> Result<AirportCode, AppError> {
    AirportCode::parse_normalized(raw).map_err(|_| AppError::BadRequest {
        message: format!("invalid airport code: {raw}"),
    })
}

fn parse_flight_id(raw: &str) -> Result<FlightId, AppError> {
    FlightId::parse(raw.trim()).map_err(|_| AppError::BadRequest {
        message: format!("invalid flight id: {raw}"),
    })
}

/// Web-layer error with an HTTP status mapping.
#[derive(Debug)]
pub enum AppError {
    /// Malformed input (400)
    BadRequest { message: String },
    /// Unknown airport or flight (404)
    NotFound { message: String },
    /// Valid request refused by current state, e.g. sold out (409)
    Conflict { message: String },
}

impl From<UnknownAirport> for AppError {
    fn from(e: UnknownAirport) -> Self {
        AppError::NotFound {
            message: e.to_string(),
        }
    }
}

impl From<BookingError> for AppError {
    fn from(e: BookingError) -> Self {
        match e {
            BookingError::UnknownFlight { .. } => AppError::NotFound {
                message: e.to_string(),
            },
            BookingError::SoldOut { .. } | BookingError::NothingBooked { .. } => {
                AppError::Conflict {
                    message: e.to_string(),
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
