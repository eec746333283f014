//! Pre-send header transform.
//!
//! Every dispatch, retries included, goes through [`attach_auth_headers`].
//! The client composes it with the raw transport and wraps the result in the
//! refresh-and-retry decorator:
//!
//! ```text
//! send = retry_on_auth_expiry(attach_auth_headers(transport))
//! ```

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};

use vibes_core::{AccessToken, Result};

use crate::request::{ApiRequest, RequestBody, header_value};

pub const APPLICATION_JSON: &str = "application/json";

/// Build the headers for one dispatch of `request`.
///
/// 1. With a token, `Authorization: Bearer <token>` is set, replacing any
///    caller-supplied value.
/// 2. Without an explicit `Content-Type`, raw bytes get their own content
///    type if they carry one; other non-binary bodies get
///    `application/json`. Multipart bodies are left for the transport,
///    which owns the boundary.
pub fn attach_auth_headers(request: &ApiRequest, token: Option<&AccessToken>) -> Result<HeaderMap> {
    let mut headers = request.options.headers.clone();

    if let Some(token) = token {
        headers.insert(
            AUTHORIZATION,
            header_value(AUTHORIZATION.as_str(), &token.bearer())?,
        );
    }

    if !headers.contains_key(CONTENT_TYPE) {
        match &request.body {
            RequestBody::Bytes {
                content_type: Some(content_type),
                ..
            } => {
                headers.insert(
                    CONTENT_TYPE,
                    header_value(CONTENT_TYPE.as_str(), content_type)?,
                );
            }
            body if !body.is_binary() => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
            }
            _ => {}
        }
    }

    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{FilePayload, Method, RequestOptions};
    use bytes::Bytes;
    use serde_json::json;

    #[test]
    fn bearer_header_when_token_set() {
        let request = ApiRequest::new(Method::Get, "/me");
        let token = AccessToken::new("T1");
        let headers = attach_auth_headers(&request, Some(&token)).unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer T1");
    }

    #[test]
    fn no_authorization_without_token() {
        let request = ApiRequest::new(Method::Get, "/me");
        let headers = attach_auth_headers(&request, None).unwrap();
        assert!(headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn json_default_for_structured_body() {
        let request = ApiRequest::new(Method::Post, "/items").body(json!({"a": 1}));
        let headers = attach_auth_headers(&request, None).unwrap();
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), APPLICATION_JSON);
    }

    #[test]
    fn explicit_content_type_wins() {
        let options = RequestOptions::new()
            .header("content-type", "text/csv")
            .unwrap();
        let request = ApiRequest::new(Method::Post, "/import")
            .body(json!("a,b"))
            .options(options);
        let headers = attach_auth_headers(&request, None).unwrap();
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "text/csv");
    }

    #[test]
    fn multipart_gets_no_json_default() {
        let request = ApiRequest::new(Method::Post, "/upload").body(RequestBody::Multipart {
            file: FilePayload::new("photo.jpg", Bytes::from_static(b"\xff\xd8")),
            on_progress: None,
        });
        let headers = attach_auth_headers(&request, None).unwrap();
        assert!(headers.get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn raw_bytes_use_their_own_content_type() {
        let request = ApiRequest::new(Method::Put, "/avatar").body(RequestBody::Bytes {
            data: Bytes::from_static(b"\x89PNG"),
            content_type: Some("image/png".into()),
        });
        let headers = attach_auth_headers(&request, None).unwrap();
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "image/png");

        let untyped = ApiRequest::new(Method::Put, "/avatar").body(RequestBody::Bytes {
            data: Bytes::from_static(b"\x89PNG"),
            content_type: None,
        });
        let headers = attach_auth_headers(&untyped, None).unwrap();
        assert!(headers.get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn token_replaces_caller_authorization() {
        let options = RequestOptions::new()
            .header("authorization", "Bearer stale")
            .unwrap();
        let request = ApiRequest::new(Method::Get, "/me").options(options);
        let token = AccessToken::new("fresh");
        let headers = attach_auth_headers(&request, Some(&token)).unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer fresh");
        assert_eq!(headers.get_all(AUTHORIZATION).iter().count(), 1);
    }
}
