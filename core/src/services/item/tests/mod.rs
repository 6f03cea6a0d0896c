//! Tests for the item service
