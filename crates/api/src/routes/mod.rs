pub mod health;
pub mod migrations;
