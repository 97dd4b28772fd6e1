pub mod config;
pub mod logging;
pub mod settings;

pub mod album_ref;
pub mod api;
pub mod fetch;
pub mod model;
pub mod naming;
pub mod worker;
