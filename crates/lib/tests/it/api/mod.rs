//! HTTP API integration tests
//!
//! Requests are sent straight into the router with `tower::ServiceExt::oneshot`.

mod helpers;
