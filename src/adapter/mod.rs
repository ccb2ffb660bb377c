pub mod recruit;
