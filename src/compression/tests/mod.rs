mod predictor_tests;
mod t4_tests;
mod factory_tests;
mod strip_tests;
