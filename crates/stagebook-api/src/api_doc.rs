//! OpenAPI document for the HTTP surface.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::auth::register,
        crate::handlers::auth::login,
        crate::handlers::submit_form::submit_form,
        crate::handlers::bookings::my_bookings,
        crate::handlers::bookings::get_booking,
    ),
    components(schemas(
        crate::handlers::auth::RegisterRequest,
        crate::handlers::auth::RegisterResponse,
        crate::handlers::auth::LoginRequest,
        crate::handlers::auth::LoginResponse,
        crate::handlers::submit_form::SubmitFormResponse,
        crate::error::ErrorResponse,
        stagebook_core::models::Booking,
        stagebook_core::models::BookingOwner,
        stagebook_core::models::BookingWithOwner,
        stagebook_core::models::PublicUser,
        stagebook_core::models::SubmissionFields,
    )),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "submissions", description = "Booking form submission"),
        (name = "bookings", description = "Booking retrieval"),
    )
)]
pub struct ApiDoc;
