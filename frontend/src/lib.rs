//! RideWave browser client: post ride offers, browse the listing and send
//! seat requests to drivers.

pub mod components;
pub mod controllers;
pub mod hooks;
pub mod services;
pub mod state;
