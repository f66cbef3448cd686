//! RM Dashboard Library
//!
//! Headless core of the Rick and Morty dashboard: the paged GraphQL sources,
//! the eager and block loaders, the client-side and infinite row models, and
//! the page controllers the command line front-end drives.

pub mod app;
pub mod cli;
pub mod components;
pub mod constants;
pub mod domain;
pub mod error;
pub mod features;
pub mod helpers;
pub mod loaders;
pub mod services;
pub mod states;
