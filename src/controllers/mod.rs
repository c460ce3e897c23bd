pub mod audit;
pub mod batch;
pub mod health;
