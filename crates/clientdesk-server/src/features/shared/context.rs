//! Request provenance extractor

use axum::{
    async_trait,
    extract::{ConnectInfo, FromRequestParts},
    http::{header, request::Parts, HeaderMap},
};
use std::convert::Infallible;
use std::net::SocketAddr;
use uuid::Uuid;

use crate::audit::{AuditOrigin, MAX_SOURCE_IP_LENGTH, MAX_USER_AGENT_LENGTH};

const FORWARDED_FOR: &str = "x-forwarded-for";

/// Source IP and user agent of the current request.
///
/// The IP is the first hop of `X-Forwarded-For` when present, otherwise the
/// socket peer address. Both values are truncated to their audit column limits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub source_ip: Option<String>,
    pub user_agent: Option<String>,
}

impl RequestContext {
    pub fn from_parts(headers: &HeaderMap, peer: Option<SocketAddr>) -> Self {
        let forwarded = headers
            .get(FORWARDED_FOR)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        let source_ip = forwarded.or_else(|| peer.map(|addr| addr.ip().to_string()));

        let user_agent = headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        Self {
            source_ip: source_ip.map(|ip| truncate_chars(ip, MAX_SOURCE_IP_LENGTH)),
            user_agent: user_agent.map(|ua| truncate_chars(ua, MAX_USER_AGENT_LENGTH)),
        }
    }

    /// Combine with the acting user into an audit origin
    pub fn origin(&self, actor_id: Option<Uuid>) -> AuditOrigin {
        AuditOrigin::new(actor_id)
            .with_source_ip(self.source_ip.clone())
            .with_user_agent(self.user_agent.clone())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        Ok(Self::from_parts(&parts.headers, peer))
    }
}

fn truncate_chars(mut value: String, max_chars: usize) -> String {
    if let Some((idx, _)) = value.char_indices().nth(max_chars) {
        value.truncate(idx);
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn peer() -> Option<SocketAddr> {
        Some("192.168.1.20:51234".parse().unwrap())
    }

    #[test]
    fn test_forwarded_for_first_hop_wins() {
        let mut headers = HeaderMap::new();
        headers.insert(FORWARDED_FOR, HeaderValue::from_static("203.0.113.7, 10.0.0.1"));

        let ctx = RequestContext::from_parts(&headers, peer());
        assert_eq!(ctx.source_ip.as_deref(), Some("203.0.113.7"));
    }

    #[test]
    fn test_falls_back_to_peer_address() {
        let ctx = RequestContext::from_parts(&HeaderMap::new(), peer());
        assert_eq!(ctx.source_ip.as_deref(), Some("192.168.1.20"));
        assert!(ctx.user_agent.is_none());
    }

    #[test]
    fn test_user_agent_truncated() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_str(&"x".repeat(400)).unwrap(),
        );

        let ctx = RequestContext::from_parts(&headers, None);
        assert_eq!(ctx.user_agent.unwrap().len(), MAX_USER_AGENT_LENGTH);
        assert!(ctx.source_ip.is_none());
    }

    #[test]
    fn test_origin_carries_actor() {
        let actor = Uuid::new_v4();
        let ctx = RequestContext {
            source_ip: Some("::1".into()),
            user_agent: Some("test".into()),
        };

        let origin = ctx.origin(Some(actor));
        assert_eq!(origin.actor_id, Some(actor));
        assert_eq!(origin.source_ip.as_deref(), Some("::1"));
    }
}
