use serde::Deserialize;
use toml::Value;

/// One configured strategy entry, e.g. a `[[strategies]]` table in TOML.
#[derive(Deserialize, Debug, Clone)]
pub struct StrategyConfig {
    /// The registry key the strategy is executed under.
    pub name: String,
    /// The strategy type to build. Defaults to `name`.
    #[serde(default)]
    pub kind: Option<String>,
    // This will hold the `params = { ... }` table from the TOML
    #[serde(default = "default_params")]
    pub params: Value,
}

impl StrategyConfig {
    pub fn kind(&self) -> &str {
        self.kind.as_deref().unwrap_or(&self.name)
    }
}

fn default_params() -> Value {
    Value::Table(toml::map::Map::new())
}
