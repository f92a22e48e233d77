mod block_string_tests;
mod parser_error_tests;
mod parser_selection_tests;
mod parser_value_tests;
mod property_tests;
mod unescape_tests;
mod utils;
