// Infrastructure layer module
// Contains store backends and external service integrations

pub mod stores;
