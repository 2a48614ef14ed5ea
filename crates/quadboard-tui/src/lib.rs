pub mod app;
pub mod board;
pub mod components;
pub mod config;
pub mod drag;
pub mod persist;
pub mod surface;

#[cfg(test)]
mod test_support;
