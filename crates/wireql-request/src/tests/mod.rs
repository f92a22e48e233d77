mod cache_tests;
mod socket_tests;
