//! Response hardening.
//!
//! Documents are sanitized markdown served as plain HTML with one
//! stylesheet, so every response can forbid scripts and framing outright.

use axum::http::HeaderValue;
use axum::http::header;
use tower::layer::util::Stack;
use tower_http::set_header::SetResponseHeaderLayer;

/// Pages carry no scripts. Document images may be remote.
const CONTENT_POLICY: &str = "default-src 'self'; \
                              script-src 'none'; \
                              style-src 'self'; \
                              img-src 'self' data: https:; \
                              object-src 'none'; \
                              base-uri 'self'; \
                              frame-ancestors 'none'";

type HeaderLayer = SetResponseHeaderLayer<HeaderValue>;

/// Layer setting every security header, overriding handler values.
pub(crate) type SecurityHeadersLayer = Stack<HeaderLayer, Stack<HeaderLayer, HeaderLayer>>;

/// Build the security header layer for the router.
pub(crate) fn security_headers() -> SecurityHeadersLayer {
    let [policy, sniffing, framing] = [
        (header::CONTENT_SECURITY_POLICY, CONTENT_POLICY),
        (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
        (header::X_FRAME_OPTIONS, "DENY"),
    ]
    .map(|(name, value)| SetResponseHeaderLayer::overriding(name, HeaderValue::from_static(value)));
    Stack::new(policy, Stack::new(sniffing, framing))
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use axum::body::Body;
    use axum::http::{Request, Response};
    use tower::{ServiceBuilder, ServiceExt};

    use super::*;

    #[test]
    fn test_content_policy_blocks_scripts_and_framing() {
        assert!(CONTENT_POLICY.contains("script-src 'none'"));
        assert!(CONTENT_POLICY.contains("frame-ancestors 'none'"));
        assert!(HeaderValue::from_str(CONTENT_POLICY).is_ok());
    }

    #[tokio::test]
    async fn test_security_headers_override_handler_values() {
        let service = ServiceBuilder::new()
            .layer(security_headers())
            .service_fn(|_: Request<Body>| async {
                Ok::<_, Infallible>(
                    Response::builder()
                        .header(header::X_FRAME_OPTIONS, "SAMEORIGIN")
                        .body(Body::empty())
                        .unwrap(),
                )
            });

        let response = service.oneshot(Request::new(Body::empty())).await.unwrap();

        assert_eq!(response.headers()[header::CONTENT_SECURITY_POLICY], CONTENT_POLICY);
        assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
        assert_eq!(response.headers()[header::X_FRAME_OPTIONS], "DENY");
    }
}
