//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the request, response and error bodies they exchange. The document is
//! served by Swagger UI in debug builds and exported through
//! `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::domain::{Avatar, NewUser, User, UserChanges, Vote, VoteAction, VoteSummary, VoteType};
use crate::inbound::http::error::{ApiError, ErrorCode};
use crate::inbound::http::health::ProbeReport;
use crate::inbound::http::users::{LoginRequest, UserIdResponse};
use crate::inbound::http::votes::{VoteRequest, VoteResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Wallet backend API",
        description = "Wallet-identified user accounts and content voting."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::login_user,
        crate::inbound::http::users::search_users,
        crate::inbound::http::users::random_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::get_user_id,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::get_user_avatar,
        crate::inbound::http::votes::add_vote,
        crate::inbound::http::votes::votes_by_hash,
        crate::inbound::http::votes::vote_summary,
        crate::inbound::http::votes::votes_by_wallet,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        NewUser,
        UserChanges,
        Avatar,
        LoginRequest,
        UserIdResponse,
        Vote,
        VoteType,
        VoteAction,
        VoteSummary,
        VoteRequest,
        VoteResponse,
        ApiError,
        ErrorCode,
        ProbeReport
    )),
    tags(
        (name = "users", description = "Wallet-identified accounts"),
        (name = "votes", description = "Up and down votes on content hashes"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated OpenAPI document.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/api/v1/users")]
    #[case("/api/v1/users/login")]
    #[case("/api/v1/users/search")]
    #[case("/api/v1/users/random")]
    #[case("/api/v1/users/{walletAddress}")]
    #[case("/api/v1/users/{walletAddress}/id")]
    #[case("/api/v1/users/{walletAddress}/avatar")]
    #[case("/api/v1/vote/addVote")]
    #[case("/api/v1/vote/hash/{hash}")]
    #[case("/api/v1/vote/hash/{hash}/summary")]
    #[case("/api/v1/vote/user/{walletAddress}")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    #[case("User", "walletAddress")]
    #[case("Vote", "voteType")]
    #[case("ApiError", "code")]
    #[case("ApiError", "message")]
    #[case("VoteSummary", "score")]
    fn schemas_use_camel_case_fields(#[case] name: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).expect("schema registered");
        assert_object_schema_has_field(schema, field);
    }
}
