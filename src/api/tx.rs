use actix_web::{HttpResponse, Responder, get, post, web};
use log::debug;

use super::models::{AppState, NewTxRequest, NewTxResponse, PendingResponse};

/// Queue a transaction for the next mined block. No validation of the
/// parties or the amount is done.
#[post("/transactions/new")]
pub async fn post_transaction(
    state: web::Data<AppState>,
    body: web::Json<NewTxRequest>,
) -> impl Responder {
    let NewTxRequest {
        sender,
        recipient,
        amount,
    } = body.into_inner();

    let (index, pending) = {
        let mut ledger = state.ledger.lock().expect("mutex poisoned");
        let index = ledger.new_transaction(sender, recipient, amount);
        (index, ledger.pending().len())
    };
    debug!("POST /transactions/new - queued for block {index} (pool size {pending})");

    HttpResponse::Created().json(NewTxResponse {
        message: format!("Transaction will be added to Block {index}"),
        index,
    })
}

/// List the pending pool.
#[get("/transactions/pending")]
pub async fn get_pending(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(PendingResponse {
        size: ledger.pending().len(),
        transactions: ledger.pending(),
    })
}
