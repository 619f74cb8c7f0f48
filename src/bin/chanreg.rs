//! chanreg CLI - Inspect channel enablement
//!
//! Loads a channel settings document, resolves the enablement of the channel
//! names given on the command line and prints the verdicts. Useful for
//! checking what a settings file actually does before shipping it.
//!
//! Usage:
//!     chanreg --settings channels.json net ui audio
//!     chanreg --settings channels.json --list
//!     chanreg --settings channels.json --json net ui

use std::path::PathBuf;
use std::process;

use clap::Parser;

use chanreg::{ChannelRegistry, ProjectSettings};

#[derive(Parser, Debug)]
#[command(name = "chanreg")]
#[command(about = "Resolve log-channel enablement for a settings file")]
#[command(version)]
struct Args {
    /// Channel names to resolve
    channels: Vec<String>,

    /// Path to a settings JSON file (default: a fresh registry)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Output as JSON instead of text
    #[arg(long)]
    json: bool,

    /// List every registered channel with its state and color
    #[arg(long)]
    list: bool,
}

fn main() {
    let args = Args::parse();

    let mut registry = ChannelRegistry::new();
    if let Some(path) = &args.settings {
        let settings = match ProjectSettings::from_file(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading settings: {}", e);
                process::exit(1);
            }
        };
        settings.apply(&mut registry);
    }

    if args.list {
        print_listing(&registry, args.json);
        return;
    }

    let names: Vec<String> = args
        .channels
        .iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();
    if names.is_empty() {
        eprintln!("No channel names given (use --list to enumerate the registry)");
        process::exit(1);
    }

    print_resolutions(&mut registry, &names, args.json);
}

fn print_listing(registry: &ChannelRegistry, json: bool) {
    if json {
        let channels: Vec<_> = registry.iter().collect();
        match serde_json::to_string_pretty(&channels) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("Error serializing listing: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    if registry.is_empty() {
        println!("(no channels registered)");
        return;
    }
    let default = registry.all_channels_enabled_by_default();
    for channel in registry {
        let verdict = if channel.is_enabled(default) { "enabled" } else { "disabled" };
        println!(
            "{:<24} {:<9} {:?}  color={}",
            channel.name, verdict, channel.enabled, channel.color_tag
        );
    }
}

fn print_resolutions(registry: &mut ChannelRegistry, names: &[String], json: bool) {
    if json {
        let verdicts: Vec<serde_json::Value> = names
            .iter()
            .map(|name| {
                serde_json::json!({
                    "name": name,
                    "enabled": registry.is_enabled(name),
                    "state": registry.force_enabled_state(name),
                    "color": registry.channel_color(name),
                })
            })
            .collect();
        let out = serde_json::json!({
            "channels": verdicts,
            "message_shown": registry.should_show_message_with_channels(names),
        });
        match serde_json::to_string_pretty(&out) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error serializing verdicts: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    for name in names {
        let verdict = if registry.is_enabled(name) { "enabled" } else { "disabled" };
        println!("{} {}", registry.rich_text_prefix(name), verdict);
    }
    let shown = registry.should_show_message_with_channels(names);
    println!(
        "message tagged with all of the above: {}",
        if shown { "shown" } else { "suppressed" }
    );
}
