//! Provider Tests Module
//!
//! Unit tests for the HTTP plumbing shared by every adapter. Adapter-specific
//! request building is tested next to each adapter; HTTP round trips use
//! wiremock in the integration tests under `tests/`.

mod ollama;
