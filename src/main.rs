use log::{error, info};
use rocket::fairing::AdHoc;
use rocket::{catchers, routes, Build, Rocket};

mod config;
mod cors;
mod database;
mod error;
mod health;
mod leaderboard;
mod play;
mod stats;
#[cfg(test)]
mod tests;

use config::ServerConfig;

#[rocket::main]
async fn main() {
    if let Err(error) = rocket().launch().await {
        error!("{}", error);
        std::process::exit(1);
    }
}

pub fn rocket() -> Rocket<Build> {
    build(ServerConfig::from_env())
}

pub fn build(config: ServerConfig) -> Rocket<Build> {
    rocket::custom(config.figment())
        .mount(
            "/",
            routes![health::ping, play::answer, stats::top, cors::preflight],
        )
        .register("/", catchers![error::not_found, error::default_catcher])
        .attach(cors::Cors)
        .attach(database::connect_fairing(config.database_url))
        .attach(database::shutdown_fairing())
        .attach(AdHoc::on_liftoff("Announce", |rocket| {
            Box::pin(async move {
                let config = rocket.config();
                let persistence = match rocket.state::<database::Database>() {
                    Some(database) if database.is_enabled() => "on",
                    _ => "off",
                };
                info!(
                    "API running at http://{}:{} (persistence {})",
                    config.address, config.port, persistence
                );
            })
        }))
}
