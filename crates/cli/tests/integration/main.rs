mod common;

mod inspect_tests;
mod run_tests;
