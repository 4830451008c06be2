//! Vote API handlers.
//!
//! ```text
//! POST /api/v1/vote/addVote             {"walletAddress":"0xABC","voteType":"upvote","hash":"Qm..."}
//! GET  /api/v1/vote/hash/{hash}
//! GET  /api/v1/vote/hash/{hash}/summary
//! GET  /api/v1/vote/user/{walletAddress}
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Vote, VoteAction, VoteSummary, VoteType};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ApiError;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/v1/vote/addVote`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    #[schema(example = "0x71C7656EC7ab88b098defB751B7401B5f6d8976F")]
    pub wallet_address: String,
    pub vote_type: VoteType,
    #[schema(example = "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG")]
    pub hash: String,
}

/// Outcome of a vote toggle.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct VoteResponse {
    pub action: VoteAction,
}

/// Cast, switch or withdraw a vote.
#[utoipa::path(
    post,
    path = "/api/v1/vote/addVote",
    request_body = VoteRequest,
    responses(
        (status = 200, description = "Vote recorded", body = VoteResponse),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 404, description = "Unknown voter", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["votes"],
    operation_id = "addVote"
)]
#[post("/vote/addVote")]
pub async fn add_vote(
    state: web::Data<HttpState>,
    payload: web::Json<VoteRequest>,
) -> ApiResult<web::Json<VoteResponse>> {
    let VoteRequest {
        wallet_address,
        vote_type,
        hash,
    } = payload.into_inner();
    let action = state
        .votes
        .handle_vote(&wallet_address, vote_type, &hash)
        .await?;
    Ok(web::Json(VoteResponse { action }))
}

/// List the votes cast on a content hash.
#[utoipa::path(
    get,
    path = "/api/v1/vote/hash/{hash}",
    params(("hash" = String, Path, description = "Content hash")),
    responses(
        (status = 200, description = "Votes, possibly empty", body = [Vote]),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["votes"],
    operation_id = "getVotesByHash"
)]
#[get("/vote/hash/{hash}")]
pub async fn votes_by_hash(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Vote>>> {
    let votes = state.votes.get_votes_by_hash(&path).await?;
    Ok(web::Json(votes))
}

/// Aggregate the votes cast on a content hash.
#[utoipa::path(
    get,
    path = "/api/v1/vote/hash/{hash}/summary",
    params(("hash" = String, Path, description = "Content hash")),
    responses(
        (status = 200, description = "Vote totals", body = VoteSummary),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["votes"],
    operation_id = "getVoteSummary"
)]
#[get("/vote/hash/{hash}/summary")]
pub async fn vote_summary(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<VoteSummary>> {
    let summary = state.votes.get_vote_summary(&path).await?;
    Ok(web::Json(summary))
}

/// List the votes cast by a wallet.
#[utoipa::path(
    get,
    path = "/api/v1/vote/user/{walletAddress}",
    params(("walletAddress" = String, Path, description = "Wallet address")),
    responses(
        (status = 200, description = "Votes, possibly empty", body = [Vote]),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["votes"],
    operation_id = "getVotesByWalletAddress"
)]
#[get("/vote/user/{wallet_address}")]
pub async fn votes_by_wallet(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Vote>>> {
    let votes = state.votes.get_votes_by_wallet_address(&path).await?;
    Ok(web::Json(votes))
}

/// Register vote routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(add_vote)
        .service(vote_summary)
        .service(votes_by_hash)
        .service(votes_by_wallet);
}
