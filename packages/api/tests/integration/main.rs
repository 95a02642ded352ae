mod common;
mod cors;
mod listing;
