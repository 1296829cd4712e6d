//! Single binary web server exposing the tournament REST API.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! Log level via RUST_LOG (default info).

use actix_web::{middleware::Logger, App, HttpServer};
use tournament_engine::{api, config::ServerConfig};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let bind = config.bind_addr();
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    // State lives in memory only; tournaments are gone after a restart.
    let state = api::new_state();

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .app_data(state.clone())
            .configure(api::configure)
    })
    .bind(bind)?
    .run()
    .await
}
