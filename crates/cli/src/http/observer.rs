//! Diagnostic request logging

use super::{OutgoingRequest, RawResponse, TransportError};

/// Sees every request and its outcome. Observers only log; they cannot
/// change what the client does.
pub trait RequestObserver {
    fn on_request(&self, request: &OutgoingRequest);
    fn on_response(&self, request: &OutgoingRequest, response: &RawResponse);
    fn on_transport_error(&self, request: &OutgoingRequest, error: &TransportError);
}

/// Emits `tracing` events: `debug` for traffic, `warn` for failures.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl RequestObserver for TracingObserver {
    fn on_request(&self, request: &OutgoingRequest) {
        let headers: Vec<String> = request
            .headers
            .iter()
            .map(|(k, v)| format!("{}: {}", k, log_value(k, v)))
            .collect();
        tracing::debug!(
            method = %request.method,
            url = %request.url,
            query = ?request.query,
            headers = ?headers,
            "request"
        );
    }

    fn on_response(&self, request: &OutgoingRequest, response: &RawResponse) {
        if (200..300).contains(&response.status) {
            tracing::debug!(
                method = %request.method,
                url = %request.url,
                status = response.status,
                "response"
            );
        } else {
            tracing::warn!(
                method = %request.method,
                url = %request.url,
                status = response.status,
                body = %response.body,
                "error response"
            );
        }
    }

    fn on_transport_error(&self, request: &OutgoingRequest, error: &TransportError) {
        tracing::warn!(
            method = %request.method,
            url = %request.url,
            error = %error,
            "no response"
        );
    }
}

fn log_value(header: &str, value: &str) -> String {
    if header.eq_ignore_ascii_case("content-type") {
        value.to_string()
    } else {
        mask_secret(value)
    }
}

/// Keeps the first and last four characters of a secret. Short secrets and
/// the `Bearer` prefix survive; everything else is starred.
pub fn mask_secret(value: &str) -> String {
    let (prefix, secret) = match value.strip_prefix("Bearer ") {
        Some(rest) => ("Bearer ", rest),
        None => ("", value),
    };
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return format!("{}****", prefix);
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}...{}", prefix, head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_bearer_tokens() {
        assert_eq!(
            mask_secret("Bearer eyJhbGciOiJIUzI1NiJ9.payload.sig"),
            "Bearer eyJh....sig"
        );
    }

    #[test]
    fn short_secrets_are_fully_hidden() {
        assert_eq!(mask_secret("abc"), "****");
        assert_eq!(mask_secret("sample-api-key"), "samp...-key");
    }
}
