use crate::macd_divergence::MacdDivergence;
use crate::momentum_divergence::MomentumDivergence;
use crate::types::{MacdDivergenceSettings, MomentumDivergenceSettings};
use crate::{Error, Result, Strategy, StrategyRegistry};
use core_types::StrategyConfig;

/// Builds one strategy from its configuration entry.
pub fn create_strategy(config: &StrategyConfig) -> Result<Box<dyn Strategy>> {
    let strategy: Box<dyn Strategy> = match config.kind() {
        "macd_divergence" => {
            let settings: MacdDivergenceSettings = config.params.clone().try_into()?;
            Box::new(MacdDivergence::new(settings)?)
        }
        "momentum_divergence" => {
            let settings: MomentumDivergenceSettings = config.params.clone().try_into()?;
            Box::new(MomentumDivergence::new(settings)?)
        }
        unknown => return Err(Error::UnknownStrategy(unknown.to_string())),
    };
    Ok(strategy)
}

/// Builds a registry holding every configured strategy under its `name`.
///
/// Fails on the first entry whose kind is unknown or whose params do not
/// deserialize. A repeated name keeps the first entry.
pub fn build_registry(configs: &[StrategyConfig]) -> Result<StrategyRegistry> {
    let mut registry = StrategyRegistry::new();
    for config in configs {
        let strategy = create_strategy(config)?;
        tracing::debug!(name = %config.name, kind = config.kind(), strategy = strategy.name(), "Built strategy from config.");
        registry.register_strategy(config.name.clone(), strategy);
    }
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(toml_src: &str) -> StrategyConfig {
        toml::from_str(toml_src).unwrap()
    }

    #[test]
    fn params_fill_in_defaults() {
        let cfg = config(
            r#"
            name = "fast_macd"
            kind = "macd_divergence"
            params = { fast_period = 5, stop_loss = 0.0005 }
            "#,
        );
        let strategy = create_strategy(&cfg).unwrap();
        assert_eq!(strategy.name(), "MacdDivergence");
    }

    #[test]
    fn kind_defaults_to_name() {
        let cfg = config(r#"name = "momentum_divergence""#);
        assert_eq!(cfg.kind(), "momentum_divergence");
        assert_eq!(create_strategy(&cfg).unwrap().name(), "MomentumDivergence");
    }

    #[test]
    fn unknown_kind_is_reported() {
        let cfg = config(r#"name = "ma_crossover""#);
        assert!(matches!(create_strategy(&cfg), Err(Error::UnknownStrategy(k)) if k == "ma_crossover"));
    }

    #[test]
    fn malformed_params_are_invalid_settings() {
        let cfg = config(
            r#"
            name = "macd_divergence"
            params = { fast_period = "twelve" }
            "#,
        );
        assert!(matches!(create_strategy(&cfg), Err(Error::InvalidSettings(_))));
    }

    #[test]
    fn registry_keeps_first_of_duplicate_names() {
        let configs = vec![
            config(r#"name = "sig"
kind = "macd_divergence""#),
            config(r#"name = "sig"
kind = "momentum_divergence""#),
        ];
        let registry = build_registry(&configs).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("sig"));
    }
}
