use common::Environment;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub model_path: String,
    pub labels_path: String,
    pub environment: Environment,
}

/// Build settings from defaults overridden by `BREED_API_*` environment
/// variables. The defaults reproduce the original deployment, so the
/// service runs with no configuration at all.
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let config = config::Config::builder()
        .set_default("host", "0.0.0.0")?
        .set_default("port", "8000")?
        .set_default("model_path", "models/final_model.onnx")?
        .set_default("labels_path", "models/class_names.json")?
        .set_default("environment", "development")?
        .add_source(
            config::Environment::with_prefix("BREED_API")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let settings: Settings = config.try_deserialize::<Settings>()?;

    Ok(settings)
}
