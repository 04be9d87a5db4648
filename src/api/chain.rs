use actix_web::{HttpResponse, Responder, get, post, web};
use log::{debug, info, warn};
use std::time::Instant;

use super::error_response;
use super::models::{AppState, ChainResponse, MineResponse, ValidateResponse};

/// Get the full chain (also what peers fetch during consensus).
#[get("/chain")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(ChainResponse {
        chain: ledger.chain(),
        length: ledger.len(),
    })
}

/// Validate the whole chain.
#[get("/validate")]
pub async fn validate_chain(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(ValidateResponse {
        valid: ledger.is_valid(),
        length: ledger.len(),
    })
}

/// Mine a new block:
/// - Snapshot the tip (proof + hash)
/// - Search the next proof on a blocking thread, ledger unlocked
/// - Reward this node and seal the pending pool on top of the same tip
#[post("/mine")]
pub async fn mine_block(state: web::Data<AppState>) -> impl Responder {
    let job = state.ledger.lock().expect("mutex poisoned").mining_job();
    debug!("MINER - job last_proof={} prev={}", job.last_proof, job.previous_hash);

    let t0 = Instant::now();
    let pow = state.pow;
    let cancel = state.cancel.clone();
    let last_proof = job.last_proof;
    let proof = match web::block(move || pow.search(last_proof, &cancel)).await {
        Ok(Ok(proof)) => proof,
        Ok(Err(e)) => {
            warn!("MINER - no proof: {e}");
            return error_response(&e);
        }
        Err(e) => {
            warn!("MINER - proof search aborted: {e}");
            return HttpResponse::InternalServerError().body("proof search aborted");
        }
    };
    debug!(
        "MINER - proof {} found in {} ms",
        proof,
        t0.elapsed().as_millis()
    );

    let mut ledger = state.ledger.lock().expect("mutex poisoned");
    match ledger.seal_mined(&job, proof, &state.node_id) {
        Ok(block) => {
            info!("MINER - block #{} sealed by {}", block.index, state.node_id);
            HttpResponse::Ok().json(MineResponse {
                message: "New Block Forged",
                index: block.index,
                transactions: block.transactions.clone(),
                proof: block.proof,
                previous_hash: block.previous_hash.clone(),
            })
        }
        Err(e) => {
            warn!("MINER - block not sealed: {e}");
            error_response(&e)
        }
    }
}
