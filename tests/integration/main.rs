//! Integration test harness; run against a live server with
//! cargo test -- --ignored

mod api_tests;
mod workflow_tests;
