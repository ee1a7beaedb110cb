//! Print agents and routing bindings

use anyhow::Result;

use super::block_on;
use openclaw_manager::backend::{Backend, LocalBackend};

pub fn agents_command(backend: &LocalBackend, json: bool) -> Result<()> {
    let config = block_on(backend.get_agents_config())??;

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    if config.agents.is_empty() {
        println!("No agents configured.");
    }
    for agent in &config.agents {
        match &agent.model {
            Some(model) => println!("{}  ({})", agent.id, model),
            None => println!("{}", agent.id),
        }
    }

    if !config.bindings.is_empty() {
        println!();
        println!("Bindings:");
        for (index, binding) in config.bindings.iter().enumerate() {
            println!(
                "  #{} {} <- {}",
                index + 1,
                binding.agent_id,
                binding.match_rule.summary()
            );
        }
    }
    Ok(())
}
