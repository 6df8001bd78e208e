use anyhow::Result;
use colored::Colorize;
use floorpath::WayfindingOptions;
use floorpath::config::Config;

use crate::cli::ConfigCommands;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load_or_default();
            config.set(&key, &value)?;
            let path = config.save()?;
            println!(
                "{}",
                format!("Set {key} = {value} in {}", path.display()).green()
            );
            Ok(())
        }
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let config = Config::load_or_default();
    let effective = WayfindingOptions::with_config(&config);

    println!("{} {}", "Config file:".bold(), path.display());
    if !path.exists() {
        println!("{}", "(not created yet, showing defaults)".dimmed());
    }
    println!();
    println!("{}", "path".bold());
    println!("  color:  {}", effective.path.color);
    println!("  radius: {}", effective.path.radius);
    println!("  speed:  {} ms/unit", effective.path.speed);
    println!("  width:  {}", effective.path.width);
    println!("{}", "route".bold());
    println!("  accessible:    {}", effective.accessible_route);
    println!("  zoom:          {}", effective.zoom_to_route);
    println!("  zoom_padding:  {}", effective.zoom_padding);
    println!("  pause:         {} ms", effective.pause);
    println!("  show_location: {}", effective.show_location);
    Ok(())
}
