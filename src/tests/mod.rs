// Test modules for pagesum crate
//
// Test organization follows the template pattern where each source file
// has a corresponding test file that focuses on business logic verification.

// Test helper utilities
pub mod helpers;

pub mod content;
pub mod registry;
pub mod settings;

// NOTE: Token tests live in tests/token_integration_tests.rs
// They load the tokenizer model and are slow, so they don't belong in unit tests
