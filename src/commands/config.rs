use anyhow::Result;
use colored::Colorize;

use crate::{
    cli::ConfigCmd,
    config::{Config, config_path},
    types::{OutputFmt, emit},
};

pub fn handle(cmd: ConfigCmd, fmt: OutputFmt) -> Result<()> {
    let path = config_path()?;
    let mut cfg = Config::load(&path)?;

    match cmd {
        ConfigCmd::List => {
            emit(fmt, &cfg, || {
                if cfg.map.is_empty() {
                    println!("{}", "(no config set)".dimmed());
                } else {
                    println!("{}", "Config:".cyan().bold());
                    for (k, v) in &cfg.map {
                        println!("  {} = {}", k.green(), v);
                    }
                }
            });
        }

        ConfigCmd::Get { key } => match cfg.map.get(&key) {
            Some(val) => emit(fmt, val, || println!("{}", val)),
            None => println!("{} key `{}` not found", "warning:".yellow().bold(), key),
        },

        ConfigCmd::Set { key, val } => {
            cfg.map.insert(key.clone(), val.clone());
            cfg.save(&path)?;
            println!("{} set `{}` = `{}`", "info:".blue().bold(), key.green(), val);
        }

        ConfigCmd::Unset { key } => {
            if cfg.map.remove(&key).is_some() {
                cfg.save(&path)?;
                println!("{} removed `{}`", "info:".blue().bold(), key.green());
            } else {
                println!("{} key `{}` not found", "warning:".yellow().bold(), key);
            }
        }
    }

    Ok(())
}
