pub mod components;
pub mod contracts;
pub mod form;
pub mod id;
pub mod motion;
pub mod prelude;
pub mod provider;
pub mod style;
pub mod theme;
pub mod tokens;
pub mod views;
pub mod widgets;

pub use provider::HostelProvider;

#[cfg(test)]
mod test_public_api;
