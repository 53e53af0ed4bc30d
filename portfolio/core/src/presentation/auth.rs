// Copyright (c) 2026 Portfolio Playground Contributors
// SPDX-License-Identifier: AGPL-3.0
//! HTTP Basic credential extraction.
//!
//! A missing, non-Basic or undecodable `Authorization` header yields `None`;
//! the auth gate then rejects the write as unauthenticated.

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::domain::auth::Credentials;

pub fn credentials_from_headers(headers: &HeaderMap) -> Option<Credentials> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some(Credentials::new(username, password))
}

/// `Authorization` header value for a credential pair.
pub fn basic_authorization(credentials: &Credentials) -> String {
    let raw = format!("{}:{}", credentials.username, credentials.password);
    format!("Basic {}", STANDARD.encode(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_basic_header_roundtrip() {
        let credentials = Credentials::new("admin", "pa:ss word");
        let parsed = credentials_from_headers(&headers(&basic_authorization(&credentials)));
        assert_eq!(parsed, Some(credentials));
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        // "admin:secret"
        let parsed = credentials_from_headers(&headers("basic YWRtaW46c2VjcmV0")).unwrap();
        assert_eq!(parsed.username, "admin");
        assert_eq!(parsed.password, "secret");
    }

    #[test]
    fn test_malformed_headers_are_absent() {
        assert!(credentials_from_headers(&HeaderMap::new()).is_none());
        assert!(credentials_from_headers(&headers("Bearer abc")).is_none());
        assert!(credentials_from_headers(&headers("Basic !!!notbase64")).is_none());
        // "nocolon"
        assert!(credentials_from_headers(&headers("Basic bm9jb2xvbg==")).is_none());
    }
}
