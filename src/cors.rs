//! Permissive CORS so browser clients on any origin can call the API.

use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::{options, Request, Response};

pub const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type";

/// Reflects the request's `Origin` back on every response.
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "CORS",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, request: &'r Request<'_>, response: &mut Response<'r>) {
        let origin = match request.headers().get_one("Origin") {
            Some(origin) => origin.to_owned(),
            None => return,
        };

        response.set_header(Header::new("Access-Control-Allow-Origin", origin));
        response.set_header(Header::new("Vary", "Origin"));
        response.set_header(Header::new("Access-Control-Allow-Methods", ALLOWED_METHODS));
        response.set_header(Header::new("Access-Control-Allow-Headers", ALLOWED_HEADERS));
    }
}

/// Answers preflight requests for any path.
#[options("/<_..>")]
pub fn preflight() -> Status {
    Status::NoContent
}
