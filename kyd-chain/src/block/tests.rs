//! Tests for KYD blocks
