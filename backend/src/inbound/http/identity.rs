//! Caller identity for HTTP handlers.
//!
//! An upstream gateway authenticates the caller and forwards the user id in
//! the [`AUTHENTICATED_USER_HEADER`]. The [`Actor`] extractor resolves that
//! id to a stored [`User`] so handlers only ever see a known caller.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use serde_json::json;
use tracing::debug;

use crate::domain::{Error, ErrorCode, Role, User, UserId};
use crate::inbound::http::state::HttpState;

/// Request header carrying the authenticated user's id.
pub const AUTHENTICATED_USER_HEADER: &str = "X-Authenticated-User";

/// The authenticated caller of a request.
#[derive(Debug, Clone)]
pub struct Actor(User);

impl Actor {
    /// Stored identifier of the caller.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.0.id()
    }

    /// Require the caller to hold `role`, otherwise `403 forbidden`.
    pub fn require_role(&self, role: Role) -> Result<(), Error> {
        if self.0.role() == role {
            return Ok(());
        }
        Err(Error::forbidden(format!("{role} role required")).with_details(json!({
            "required": role.as_str(),
            "actual": self.0.role().as_str(),
            "code": "role_required",
        })))
    }
}

fn header_user_id(req: &HttpRequest) -> Result<UserId, Error> {
    let raw = req
        .headers()
        .get(AUTHENTICATED_USER_HEADER)
        .ok_or_else(|| Error::unauthorized("authentication required"))?;
    raw.to_str()
        .ok()
        .and_then(|value| value.trim().parse::<UserId>().ok())
        .ok_or_else(|| {
            Error::unauthorized("malformed authenticated user header").with_details(json!({
                "header": AUTHENTICATED_USER_HEADER,
            }))
        })
}

impl FromRequest for Actor {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let id = header_user_id(req);
        let users = req
            .app_data::<web::Data<HttpState>>()
            .map(|state| state.users.clone());

        Box::pin(async move {
            let id = id?;
            let users = users.ok_or_else(|| Error::internal("HTTP state not configured"))?;
            match users.find_user(id).await {
                Ok(user) => Ok(Self(user)),
                Err(error) if error.code() == ErrorCode::NotFound => {
                    debug!(user_id = %id, "authenticated user header names no stored user");
                    Err(Error::unauthorized("unknown user").into())
                }
                Err(error) => Err(error.into()),
            }
        })
    }
}
