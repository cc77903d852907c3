pub mod company_controller;
pub mod driver_controller;
pub mod file_controller;
pub mod search_controller;
pub mod vehicle_controller;
