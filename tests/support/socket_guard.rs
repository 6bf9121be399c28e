//! Localhost socket helpers for tests that talk to a real HTTP endpoint.

use std::net::TcpListener;
use std::panic::Location;

use wiremock::MockServer;

const REQUIRE_ENV: &str = "RIPPER_REQUIRE_SOCKET_TESTS";

fn sockets_required() -> bool {
    std::env::var(REQUIRE_ENV)
        .is_ok_and(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
}

/// Starts a mock acquisition service, or returns `None` when this
/// environment cannot bind localhost sockets.
///
/// # Panics
///
/// Panics instead of skipping when `RIPPER_REQUIRE_SOCKET_TESTS` is set.
#[track_caller]
pub fn start_mock_server_or_skip() -> impl Future<Output = Option<MockServer>> {
    let caller = Location::caller();
    let bindable = TcpListener::bind("127.0.0.1:0").is_ok();
    if !bindable {
        assert!(
            !sockets_required(),
            "mock service needed at {caller} but localhost sockets are unavailable"
        );
        eprintln!("skipping service test at {caller}: localhost sockets are unavailable");
    }
    async move {
        if bindable {
            Some(MockServer::start().await)
        } else {
            None
        }
    }
}

/// Returns a service URL on a localhost port nothing listens on.
#[must_use]
pub fn unreachable_service_url() -> String {
    let port = TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .map_or(9, |addr| addr.port());
    format!("http://127.0.0.1:{port}")
}
