/// Unit test entry point
mod basic_tests;
