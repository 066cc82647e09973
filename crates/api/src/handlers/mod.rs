pub mod computers;
