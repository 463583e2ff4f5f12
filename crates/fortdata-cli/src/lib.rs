//! fortdata CLI Library
//!
//! Reads backend JSON documents from disk and prints their typed form
//! (or a short summary) as JSON on stdout.

pub mod commands;
pub mod inspect_cmd;
pub mod output;
pub mod profile_cmd;
