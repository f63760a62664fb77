//! Bearer-token extraction for gated endpoints.
//!
//! The extractor never rejects a request by itself: an absent or malformed
//! `Authorization` header yields an empty token and the handler decides what
//! that means. This keeps unauthenticated endpoints free to ignore the
//! header entirely.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};

use crate::domain::{Error, UserId};
use crate::domain::ports::TokenService;

/// Raw bearer token lifted from the `Authorization` header, if any.
#[derive(Debug, Clone, Default)]
pub struct BearerToken(Option<String>);

impl BearerToken {
    /// The raw token string, when one was presented.
    pub fn token(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Verify the presented token and decode the acting user's identifier.
    ///
    /// A missing token fails exactly like an unverifiable one, so callers
    /// cannot distinguish the two cases.
    pub fn require_subject(&self, tokens: &dyn TokenService) -> Result<UserId, Error> {
        let raw = self
            .token()
            .ok_or_else(|| Error::unauthorized("token missing or invalid"))?;
        tokens.verify(raw)
    }
}

fn parse_header(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.trim().splitn(2, ' ');
    let scheme = parts.next()?;
    let token = parts.next()?.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then(|| token.to_owned())
}

impl FromRequest for BearerToken {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self(parse_header(req))))
    }
}
