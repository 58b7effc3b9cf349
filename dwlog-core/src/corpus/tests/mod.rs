mod duration_tests;
