//! REST API endpoint tests

mod health_tests;
mod menu_tests;
mod restaurant_tests;
mod vote_tests;
