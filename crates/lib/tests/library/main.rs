mod common;

mod config_tests;
mod orchestration_tests;
mod schedule_tests;
