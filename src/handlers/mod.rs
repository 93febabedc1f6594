pub mod assets;
pub mod categories;
pub mod layers;
pub mod logos;
pub mod service;
pub mod users;
pub mod utils;
