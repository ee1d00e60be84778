use rocket::http::{Header, Method, Status};
use rocket::response::{self, Responder};
use rocket::route::{Handler, Outcome};
use rocket::serde::json::Json;
use rocket::{Data, Request, Response, Route};
use serde_json::json;

pub mod bookings;
pub mod events;

pub fn api_routes() -> Vec<Route> {
    let mut all = rocket::routes![
        events::create_event,
        events::get_events,
        events::get_event,
        bookings::create_booking,
        bookings::get_bookings,
    ];
    all.extend(method_guards());
    all
}

/// Explicit 405 responses, with an `Allow` header, for methods the API does
/// not support on its resource paths.
fn method_guards() -> Vec<Route> {
    let paths: [(&str, &[Method], &str); 3] = [
        ("/events", &[Method::Put, Method::Delete, Method::Patch], "GET, POST"),
        (
            "/events/<id>",
            &[Method::Post, Method::Put, Method::Delete, Method::Patch],
            "GET",
        ),
        ("/bookings", &[Method::Put, Method::Delete, Method::Patch], "GET, POST"),
    ];

    let mut guards = Vec::new();
    for (path, methods, allow) in paths {
        for method in methods {
            guards.push(Route::new(*method, path, MethodNotAllowed { allow }));
        }
    }
    guards
}

#[derive(Clone)]
struct MethodNotAllowed {
    allow: &'static str,
}

#[rocket::async_trait]
impl Handler for MethodNotAllowed {
    async fn handle<'r>(&self, req: &'r Request<'_>, _data: Data<'r>) -> Outcome<'r> {
        Outcome::from(req, NotAllowedResponse { allow: self.allow })
    }
}

struct NotAllowedResponse {
    allow: &'static str,
}

impl<'r> Responder<'r, 'static> for NotAllowedResponse {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let body = Json(json!({ "error": "Method not allowed" }));
        Response::build_from(body.respond_to(req)?)
            .status(Status::MethodNotAllowed)
            .header(Header::new("Allow", self.allow))
            .ok()
    }
}
