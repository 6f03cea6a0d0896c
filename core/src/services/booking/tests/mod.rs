//! Tests for the booking lifecycle service

#[cfg(test)]
mod service_tests;
