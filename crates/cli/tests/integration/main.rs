//! Integration tests running appmf against a mock control plane.

mod common;
mod create_app_manifest_tests;
mod quota_tests;
