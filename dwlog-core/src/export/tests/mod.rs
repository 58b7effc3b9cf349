mod job_tests;
mod writer_tests;
