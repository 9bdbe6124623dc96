//! Tests for OpenAI-Shared Utilities
//!
//! Unit tests for the chat-completions client shared by OpenAI and Groq.
