mod client;
mod engine;
