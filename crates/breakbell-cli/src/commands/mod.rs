pub mod config;
pub mod interval;
pub mod run;
pub mod theme;
