//! Integration tests
//!
//! These tests use wiremock to stand in for the code-hosting, payments and
//! CRM APIs and run the audits end-to-end against them.

mod common;
mod github_tests;
mod member_export_tests;
mod project_audit_tests;
