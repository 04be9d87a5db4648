use actix_web::{HttpResponse, Responder, get, post, web};
use log::{info, warn};

use super::error_response;
use super::models::{AppState, NodesResponse, RegisterNodesRequest, ResolveResponse};

const MISSING_NODES: &str = "Error: Please supply a valid list of nodes";

/// Register one or more peers.
#[post("/nodes/register")]
pub async fn register_nodes(
    state: web::Data<AppState>,
    body: web::Json<RegisterNodesRequest>,
) -> impl Responder {
    let Some(list) = body.nodes.as_ref() else {
        return HttpResponse::BadRequest().body(MISSING_NODES);
    };
    let addresses = list.addresses();
    if addresses.is_empty() {
        return HttpResponse::BadRequest().body(MISSING_NODES);
    }

    let mut peers = state.peers.lock().expect("mutex poisoned");
    if let Err(e) = peers.register_all(addresses) {
        warn!("POST /nodes/register - rejected: {e}");
        return error_response(&e);
    }

    HttpResponse::Created().json(NodesResponse {
        message: Some("New nodes have been added"),
        total_nodes: peers.peers(),
    })
}

/// List known peers.
#[get("/nodes")]
pub async fn list_nodes(state: web::Data<AppState>) -> impl Responder {
    let peers = state.peers.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(NodesResponse {
        message: None,
        total_nodes: peers.peers(),
    })
}

/// Run consensus against every known peer.
#[get("/nodes/resolve")]
pub async fn resolve_conflicts(state: web::Data<AppState>) -> impl Responder {
    let peers = state.peers.lock().expect("mutex poisoned").peers();
    let outcome = state.resolver.resolve(&peers, &state.ledger).await;

    let message = if outcome.replaced {
        "Our chain was replaced"
    } else {
        "Our chain is authoritative"
    };
    info!(
        "GET /nodes/resolve - {} peers asked: {message} ({} blocks)",
        peers.len(),
        outcome.chain.len()
    );

    HttpResponse::Ok().json(ResolveResponse {
        message,
        replaced: outcome.replaced,
        chain: outcome.chain,
    })
}
