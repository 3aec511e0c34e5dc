pub mod logging;

pub use logging::{init_logging, logging_layer_from_config, LoggingInitError};
