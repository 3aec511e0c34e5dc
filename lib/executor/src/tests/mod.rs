mod batching;
mod non_null;
mod operations;
