use anyhow::Result;
use calboard_core::config::CalboardConfig;
use owo_colors::OwoColorize;

pub fn run(config: &CalboardConfig) -> Result<()> {
    let config_path = CalboardConfig::config_path()?;

    println!("{}", "Paths".bold());
    println!("  Config:       {}", config_path.display());
    println!("  Events:       {}", config.events_path().display());
    println!("  Submissions:  {}", config.abstracts_path().display());
    println!();
    println!("{}", "Settings".bold());
    println!("  Request timeout:  {}s", config.request_timeout_secs);
    println!("  Log level:        {}", config.log_level);

    Ok(())
}
