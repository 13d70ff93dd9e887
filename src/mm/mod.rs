pub mod bot;
pub mod config;
pub mod quoter;
pub mod state;

#[cfg(test)]
pub mod testing;
