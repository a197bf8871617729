//! End-to-end tests.

#![cfg(test)]
#![allow(clippy::needless_raw_string_hashes)]

mod chain;
mod identity;
mod logic;
mod repo;
