pub mod battle;
pub mod monster;
