mod resolver;

pub use resolver::{coerce_value, default_config_path, env_key, Config};
