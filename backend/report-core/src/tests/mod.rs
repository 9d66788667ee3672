mod config;
mod endpoint;
mod interpret;
mod prompt;
mod reading;
mod validate;
