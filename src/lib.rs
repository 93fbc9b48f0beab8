//! Ticket Desk - ticket tracking REST backend
//!
//! Users register, sign in and work a shared list of tickets. Every
//! committed mutation is mirrored on a best-effort basis to a second,
//! independent ticket service; see [`adapters::sync`].

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
