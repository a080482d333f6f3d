pub mod inventory_service;
pub mod validation_service;
