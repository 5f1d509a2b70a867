//! Cross-crate integration tests for the Tessera workspace live in `tests/`.
