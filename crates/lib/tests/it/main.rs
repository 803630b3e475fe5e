/*! Integration tests for Roster.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - store: Tests for the DocumentStore trait and its implementations
 * - user: Tests for the user repository and the authentication service
 * - api: Tests for the HTTP routes, driven through the router without a socket
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("roster=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod api;
mod helpers;
mod store;
