// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn dns_response_success_only_no_error() {
    assert!(DnsResponse::NoError.is_success());
    assert!(!DnsResponse::Refused("nope".to_string()).is_success());
}

#[test]
fn update_error_message_contains_underlying_reason() {
    let err = DnsError::from(DnsResponse::Refused("dns failure".to_string()));
    assert!(err.message().contains("dns failure"));
}

#[test]
fn resolve_error_message_contains_name_and_zone() {
    let err = DnsError::Resolve {
        name: "host".to_string(),
        zone: "example.com.".to_string(),
        reason: "timeout".to_string(),
    };
    let msg = err.message();
    assert!(msg.contains("host"));
    assert!(msg.contains("example.com."));
    assert!(msg.contains("timeout"));
}

#[test]
fn handler_error_wraps_anyhow() {
    let err = HandlerError::from(anyhow::anyhow!("write failed"));
    assert!(err.to_string().contains("write failed"));
}
