pub mod abbrev_map;
pub mod codec;
pub mod diagnostics;
pub mod format;
pub mod interfaces;
pub mod listener;
pub mod transfer;

#[cfg(test)]
mod tests;
