//! Tests for Anthropic Provider Implementation
//!
//! Request building and response extraction are tested here; HTTP behavior
//! lives in tests/anthropic_provider_integration_tests.rs.
