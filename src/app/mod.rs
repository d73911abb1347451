//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the gate controller:
//! phase orchestration, sensor sampling policy, intrusion evaluation, and
//! display coordination. All interaction with hardware happens through
//! **port traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
