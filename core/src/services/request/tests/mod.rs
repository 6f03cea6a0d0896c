//! Tests for the item request service
