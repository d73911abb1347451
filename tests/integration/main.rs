//! Integration test harness — one binary, shared mocks.

mod gate_service_tests;
mod mock_hw;
