pub mod prettify;
