pub mod accuracy;
pub mod compare;
pub mod dataset;
pub mod forecast;
pub mod overview;
