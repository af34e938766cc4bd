//! Example demonstrating prompt crafting and context window budgeting.
//!
//! Pass a JSON engine config as the first argument to use it instead of the
//! built-in math engine. `CODEPROMPT_MAX_TOKENS` and `CODEPROMPT_TRUNCATION`
//! override its budget.

use anyhow::{Context, Result};
use codeprompt::config::EngineConfig;
use codeprompt::{BudgetConfig, CodeEngine, Interaction, TruncationPolicy};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    println!("=== codeprompt: NL-to-Code Example ===\n");

    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::from_path(&path)
            .with_context(|| format!("loading {path}"))?,
        None => default_config()?,
    };
    let config = config.with_env_overrides()?;

    // Example 1: Priming context only
    let mut engine = config.build_engine()?;
    demonstrate_priming(&mut engine)?;

    // Example 2: Growing and undoing the conversation
    demonstrate_history(&mut engine)?;

    // Example 3: Budget-driven truncation under both policies
    demonstrate_truncation(&config)?;

    Ok(())
}

fn default_config() -> Result<EngineConfig> {
    Ok(EngineConfig {
        description: Some("Natural Language Commands to Math Code".to_owned()),
        examples: vec![
            Interaction::new("what's 10 plus 18", "console.log(10 + 18);")?,
            Interaction::new("what's 10 times 18", "console.log(10 * 18);")?,
        ],
        ..EngineConfig::default()
    })
}

fn demonstrate_priming(engine: &mut CodeEngine) -> Result<()> {
    println!("--- Example 1: Priming Context ---\n");

    let context = engine.build_context();
    println!("Context ({} tokens):\n{context}", engine.estimate(&context));

    let prompt = engine.craft_prompt("what's 18 divided by 10")?;
    println!("Prompt:\n{prompt}");
    Ok(())
}

fn demonstrate_history(engine: &mut CodeEngine) -> Result<()> {
    println!("--- Example 2: Conversation History ---\n");

    engine.add_interactions([
        Interaction::new("what's 18 divided by 10", "console.log(18 / 10);")?,
        Interaction::new("what's 18 modulo 10", "console.log(18 % 10);")?,
    ])?;
    println!("History entries: {}", engine.history().len());

    if let Some(undone) = engine.remove_last_interaction() {
        println!("Undid: {}", undone.input());
    }

    let prompt = engine.craft_prompt("what's 18 to the power of 10")?;
    println!("Prompt:\n{prompt}");
    Ok(())
}

fn demonstrate_truncation(config: &EngineConfig) -> Result<()> {
    println!("--- Example 3: Token Budget ---\n");

    let history = [
        Interaction::new("what's 18 divided by 10", "console.log(18 / 10);")?,
        Interaction::new("what's 18 modulo 10", "console.log(18 % 10);")?,
    ];

    for truncation in [TruncationPolicy::Transient, TruncationPolicy::Commit] {
        let mut config = config.clone();
        config.budget = BudgetConfig {
            max_tokens: config.budget.max_tokens.or(Some(260)),
            truncation,
        };
        let mut engine = config.build_engine()?;
        engine.add_interactions(history.clone())?;

        for round in 1..=2 {
            let rendered = engine.craft("what's 18 to the power of 10")?;
            println!(
                "{truncation:?} round {round}: {} tokens, dropped {}, over budget: {}, history left: {}",
                rendered.estimated_tokens(),
                rendered.dropped(),
                rendered.is_over_budget(),
                engine.history().len()
            );
        }
    }

    Ok(())
}
