pub mod cards;
pub mod controls;
pub mod debug;
pub mod sidebar;
