pub mod flow;
pub mod payload;
pub mod settings;
pub mod stock;
pub mod violation;
