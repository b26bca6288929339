//! appmf-lib: Core types and logic for appmf
//!
//! This crate rebuilds a deployable application manifest from the live state
//! of an application on the platform:
//! - `resource`: maps raw control-plane payloads into typed models
//! - `manifest`: renders models into the canonical manifest document and writes it
//! - `api`: the control-plane seam and its HTTP implementation
//! - `session`: the targeted endpoint, org, space and user
//! - `create`: the end-to-end `create-app-manifest` pipeline

pub mod api;
pub mod consts;
pub mod create;
pub mod manifest;
pub mod models;
pub mod platform;
pub mod resource;
pub mod session;
