mod store_tests;
mod upload_tests;
