use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        airplanes::{
            CreateAirplaneRequest, CreateAirplaneTypeRequest, UpdateAirplaneRequest,
            UpdateAirplaneTypeRequest,
        },
        airports::{CreateAirportRequest, UpdateAirportRequest},
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        crews::{CreateCrewRequest, UpdateCrewRequest},
        flights::{CreateFlightRequest, FlightDetail, FlightListItem, UpdateFlightRequest},
        orders::{
            CreateOrderRequest, OrderDetail, OrderListItem, OrderUserDetail, OrderUserSummary,
            OrderWithTickets, TicketRequest,
        },
        routes::{CreateRouteRequest, RouteDetail, RouteListItem, UpdateRouteRequest},
        tickets::TicketListItem,
    },
    models::{Airplane, AirplaneType, Airport, AuditLog, Crew, Flight, Order, Route, Ticket, User},
    response::{ApiResponse, Meta},
    routes::{
        admin, air_routes, airplanes, airports, auth, crews, flights, health, orders, params,
        tickets,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Airport API", description = "Flights, seat booking and orders"),
    paths(
        health::health_check,
        auth::register,
        auth::login,
        airports::list_airports,
        airports::get_airport,
        airports::create_airport,
        airports::update_airport,
        airports::delete_airport,
        air_routes::list_routes,
        air_routes::get_route,
        air_routes::create_route,
        air_routes::update_route,
        air_routes::delete_route,
        airplanes::list_airplane_types,
        airplanes::get_airplane_type,
        airplanes::create_airplane_type,
        airplanes::update_airplane_type,
        airplanes::delete_airplane_type,
        airplanes::list_airplanes,
        airplanes::get_airplane,
        airplanes::create_airplane,
        airplanes::update_airplane,
        airplanes::delete_airplane,
        crews::list_crews,
        crews::get_crew,
        crews::create_crew,
        crews::update_crew,
        crews::delete_crew,
        flights::list_flights,
        flights::get_flight,
        flights::create_flight,
        flights::update_flight,
        flights::delete_flight,
        orders::list_orders,
        orders::create_order,
        orders::get_order,
        orders::delete_order,
        tickets::list_tickets,
        admin::list_audit_logs
    ),
    components(
        schemas(
            User,
            Airport,
            Route,
            AirplaneType,
            Airplane,
            Crew,
            Flight,
            Order,
            Ticket,
            AuditLog,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            CreateAirportRequest,
            UpdateAirportRequest,
            CreateRouteRequest,
            UpdateRouteRequest,
            RouteListItem,
            RouteDetail,
            CreateAirplaneTypeRequest,
            UpdateAirplaneTypeRequest,
            CreateAirplaneRequest,
            UpdateAirplaneRequest,
            CreateCrewRequest,
            UpdateCrewRequest,
            CreateFlightRequest,
            UpdateFlightRequest,
            FlightListItem,
            FlightDetail,
            CreateOrderRequest,
            TicketRequest,
            OrderWithTickets,
            OrderUserSummary,
            OrderUserDetail,
            OrderListItem,
            OrderDetail,
            TicketListItem,
            params::SortOrder,
            Meta,
            ApiResponse<OrderWithTickets>,
            ApiResponse<FlightDetail>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Registration and token login"),
        (name = "Airports", description = "Airport endpoints"),
        (name = "Routes", description = "Routes between airports"),
        (name = "Airplanes", description = "Airplane types and airplanes"),
        (name = "Crews", description = "Crew endpoints"),
        (name = "Flights", description = "Flights and seat availability"),
        (name = "Orders", description = "Orders and ticket booking"),
        (name = "Tickets", description = "Booked tickets"),
        (name = "Admin", description = "Staff only endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_resource_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/api/auth/login",
            "/api/airports/{id}",
            "/api/routes",
            "/api/airplane_types",
            "/api/airplanes/{id}",
            "/api/crews",
            "/api/flights/{id}",
            "/api/orders",
            "/api/orders/{id}",
            "/api/tickets",
            "/api/admin/audit-logs",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{path} missing");
        }
    }
}
