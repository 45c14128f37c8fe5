//! Test fixtures and response shapes
//!
//! Seeds users and definitions straight into the in-memory store and mints
//! access tokens for them.

use anyhow::Result;
use qamous_common::JwtService;
use qamous_core::entities::{Definition, User};
use qamous_core::traits::{DefinitionRepository, UserRepository};
use qamous_db::MemoryStore;
use serde::{Deserialize, Serialize};

/// A user together with a valid bearer token
#[derive(Debug, Clone)]
pub struct TestUser {
    pub user: User,
    pub token: String,
}

impl TestUser {
    pub async fn create(store: &MemoryStore, jwt: &JwtService, username: &str) -> Result<Self> {
        let user = UserRepository::create(store, username).await?;
        let token = jwt.issue_access_token(user.id)?.access_token;
        Ok(Self { user, token })
    }
}

/// Author (id 1), reader (id 2), admin (id 3), and one definition by the author
#[derive(Debug, Clone)]
pub struct Seed {
    pub author: TestUser,
    pub reader: TestUser,
    pub admin: TestUser,
    pub definition: Definition,
}

impl Seed {
    pub async fn create(store: &MemoryStore, jwt: &JwtService) -> Result<Self> {
        let author = TestUser::create(store, jwt, "author").await?;
        let reader = TestUser::create(store, jwt, "reader").await?;
        let admin = TestUser::create(store, jwt, "admin").await?;
        let definition = DefinitionRepository::create(
            store,
            author.user.id,
            1,
            "a word's meaning",
            Some("used in a sentence"),
            true,
        )
        .await?;

        Ok(Self {
            author,
            reader,
            admin,
            definition,
        })
    }

    /// `/api/v1/reactions/{definition_id}/{action}`
    pub fn reaction_path(&self, action: &str) -> String {
        format!(
            "/api/v1/reactions/{}/{action}",
            self.definition.id
        )
    }
}

/// Switch request body
#[derive(Debug, Serialize)]
pub struct SwitchRequest {
    pub to: &'static str,
}

/// Mutation response body
#[derive(Debug, Deserialize)]
pub struct ReactionBody {
    pub success: bool,
    pub message: String,
}

/// Counters response body
#[derive(Debug, Deserialize)]
pub struct CountsBody {
    pub definition_id: i64,
    pub like_count: i64,
    pub dislike_count: i64,
}

/// Ledger count response body
#[derive(Debug, Deserialize)]
pub struct CountBody {
    pub kind: String,
    pub count: i64,
}

/// Ledger row response body
#[derive(Debug, Deserialize)]
pub struct ReactionItemBody {
    pub user_id: i64,
    pub kind: String,
}

/// Own reaction response body
#[derive(Debug, Deserialize)]
pub struct StateBody {
    pub state: String,
}

/// Recalculation response body
#[derive(Debug, Deserialize)]
pub struct RecalculateBody {
    pub updated: Vec<RecalculatedBody>,
    pub failed_batches: usize,
}

#[derive(Debug, Deserialize)]
pub struct RecalculatedBody {
    pub definition_id: i64,
    pub likes: i64,
    pub dislikes: i64,
}

/// Reset response body
#[derive(Debug, Deserialize)]
pub struct ResetBody {
    pub reactions_deleted: u64,
}

/// Error response
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
