//! Integration tests for Jobwatch
//!
//! These tests use wiremock to stand in for the job board and run the
//! full pipeline end to end, from HTTP fetch to the persisted snapshot.

mod pipeline_tests;
