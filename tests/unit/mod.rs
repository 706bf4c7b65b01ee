mod config;
mod merge;
mod models;
