pub mod audit;
pub mod batch;
pub mod environment;
pub mod synthesis;
