pub mod clock;
pub mod corrector;
