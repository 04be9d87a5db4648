use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::info;
use std::io;

use pow_ledger::api::{self, AppState};
use pow_ledger::blockchain::CancelFlag;
use pow_ledger::config::NodeConfig;

#[actix_web::main]
async fn main() -> io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let config =
        NodeConfig::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let (host, port) = (config.host.clone(), config.port);

    println!("⛓️ Starting ledger node {} at http://{host}:{port}", config.node_id);
    info!("config: {config:?}");

    // Ctrl-C stops any proof search still running on the blocking pool.
    let cancel = CancelFlag::new();
    {
        let cancel = cancel.clone();
        actix_web::rt::spawn(async move {
            if actix_web::rt::signal::ctrl_c().await.is_ok() {
                info!("shutdown requested, cancelling proof-of-work");
                cancel.cancel();
            }
        });
    }

    let state = AppState::new(&config, cancel)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let state = web::Data::new(state);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
