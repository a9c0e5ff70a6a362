pub mod cadence;
pub mod derived;
pub mod request;
pub mod series;
pub mod table;
pub mod window;
