use rocket::get;
use rocket::serde::{json::Json, Deserialize, Serialize};

#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Debug)]
#[serde(crate = "rocket::serde")]
pub struct Pong {
    pub pong: bool,
}

#[get("/ping")]
pub fn ping() -> Json<Pong> {
    Json(Pong { pong: true })
}
