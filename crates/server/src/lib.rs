//! Eternal chess server: plays random games forever and streams them live.

pub mod config;
pub mod error;
pub mod hub;
pub mod routes;
