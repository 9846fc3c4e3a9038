//! ChipWise Academy - Lead-to-Access Backend
//!
//! This crate implements the lead-to-access pipeline for the ChipWise
//! Academy VLSI training programs: registration intake, payment
//! processing, and gated dashboard resources.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
