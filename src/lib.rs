//! # Connect Four
//!
//! A Connect Four engine with a fixed-depth minimax computer player, a
//! terminal UI built with Ratatui, and a headless self-play runner.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, sides, modes, session state
//! - [`ai`] — Agent trait, minimax search, static evaluation, random agent
//! - [`ui`] — Terminal UI: game view with human and computer turns
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod ui;
