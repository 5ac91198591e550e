mod fakes;
mod revocation_tests;
