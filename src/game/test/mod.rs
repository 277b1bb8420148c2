//! Test module for the Mafia game engine
//!
//! Organised into one submodule per part of the engine, sharing the helpers in `test_utils`.

#![cfg(test)]
#![allow(clippy::bool_assert_comparison)]

pub mod lobby;
pub mod state_transitions;
