mod chain;
mod health;
pub mod models;
mod nodes;
mod tx;

use actix_web::HttpResponse;
use actix_web::web::ServiceConfig;

use crate::error::LedgerError;

pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(health::health_check)
        .service(chain::get_chain)
        .service(chain::validate_chain)
        .service(chain::mine_block)
        .service(tx::post_transaction)
        .service(tx::get_pending)
        .service(nodes::register_nodes)
        .service(nodes::list_nodes)
        .service(nodes::resolve_conflicts);
}

/// Map a ledger error onto an HTTP response.
pub(crate) fn error_response(err: &LedgerError) -> HttpResponse {
    let body = err.to_string();
    match err {
        LedgerError::InvalidPeerAddress { .. } => HttpResponse::BadRequest().body(body),
        LedgerError::StaleTip => HttpResponse::Conflict().body(body),
        LedgerError::ProofCancelled | LedgerError::ProofExhausted { .. } => {
            HttpResponse::ServiceUnavailable().body(body)
        }
        LedgerError::EmptyChain | LedgerError::Config(_) => {
            HttpResponse::InternalServerError().body(body)
        }
    }
}
