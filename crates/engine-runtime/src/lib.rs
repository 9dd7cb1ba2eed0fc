pub mod error;
pub mod poller;
pub mod sink;

#[cfg(test)]
mod tests;
