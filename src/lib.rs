//! Surveillance effort planning for mango growers.
//!
//! Estimates how long a grower's routine pest and disease surveillance
//! takes, from tree attributes, location stocking density and visit
//! frequency.
//!
//! Layers, innermost first: [`domain`] (pure rules), [`application`]
//! (services over an inventory repository), [`infrastructure`] (TOML
//! inventory, DI container), [`cli`].

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
