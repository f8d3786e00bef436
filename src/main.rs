// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use anyhow::{anyhow, Result};
use std::env;
use tonal::config::TheoryConfig;
use tonal::containers::Note;
use tonal::music::{intervals, keys, Key};
use tracing::info;

fn print_usage() {
    println!("Tonal - Interval and Key-Signature Engine");
    println!();
    println!("Usage: tonal [--config <PATH>] <COMMAND>");
    println!();
    println!("Commands:");
    println!("  --scale [KEY]                      Show the diatonic scale of KEY");
    println!("  --signature [KEY]                  Show the key signature of KEY");
    println!("  --interval <N1> <N2> [--shorthand] [--down]");
    println!("                                     Name the interval between two notes");
    println!("  --transpose <NOTE> <INTERVAL> [--down]");
    println!("                                     Transpose a note (e.g. C#-4 b3)");
    println!("  --hertz <NOTE|HZ>                  Show the frequency of a note, or the");
    println!("                                     note nearest a frequency");
    println!("  --meter [N/D]                      Classify a time signature");
    println!("  --help                             Show this help message");
    println!();
    println!("Keys are upper case for major and lower case for minor (C, Eb, f#).");
}

/// Remove `--config <path>` from the arguments and load it
fn take_config(args: &mut Vec<String>) -> Result<TheoryConfig> {
    let Some(pos) = args.iter().position(|a| a == "--config") else {
        return Ok(TheoryConfig::default());
    };
    if pos + 1 >= args.len() {
        return Err(anyhow!("--config requires a path"));
    }
    let path = args.remove(pos + 1);
    args.remove(pos);
    info!(path = %path, "Loading configuration");
    TheoryConfig::load(&path)
}

/// Remove a boolean flag from the arguments, returning whether it was present
fn take_flag(args: &mut Vec<String>, flag: &str) -> bool {
    match args.iter().position(|a| a == flag) {
        Some(pos) => {
            args.remove(pos);
            true
        }
        None => false,
    }
}

fn parse_note(text: &str, config: &TheoryConfig) -> Result<Note> {
    let mut note = Note::default();
    note.set_note(text, config.default_octave)?;
    Ok(note)
}

fn show_scale(key: &str) -> Result<()> {
    let key = Key::new(key)?;
    let scale = key.notes()?;
    println!("{}: {}", key, scale);
    Ok(())
}

fn show_signature(key: &str) -> Result<()> {
    let key = Key::new(key)?;
    let accidentals = keys::get_key_signature_accidentals(key.key())?;
    println!("{}: {}", key, key.signature());
    if !accidentals.is_empty() {
        println!("Accidentals: {}", accidentals.join(" "));
    }
    println!("Relative: {}", key.relative()?);
    Ok(())
}

fn show_interval(
    note1: &str,
    note2: &str,
    shorthand: bool,
    up: bool,
    config: &TheoryConfig,
) -> Result<()> {
    let name = intervals::determine(note1, note2, shorthand, up)?;
    println!("{}", name);
    let consonance = if intervals::is_consonant(note1, note2, config.include_fourths)? {
        "consonant"
    } else {
        "dissonant"
    };
    println!("{} semitones, {}", intervals::measure(note1, note2)?, consonance);
    Ok(())
}

fn show_transpose(note: &str, shorthand: &str, up: bool, config: &TheoryConfig) -> Result<()> {
    let mut note = parse_note(note, config)?;
    let start = note.clone();
    note.transpose(shorthand, up)?;
    info!(from = %start, to = %note, "Transposed");
    println!("{}", note);
    Ok(())
}

fn show_hertz(note: &str, config: &TheoryConfig) -> Result<()> {
    if let Ok(hertz) = note.parse::<f64>() {
        let nearest = config.note_at(hertz)?;
        println!(
            "{} Hz: {} ({:.2} Hz)",
            hertz,
            nearest,
            nearest.to_hertz(config.standard_pitch)
        );
        return Ok(());
    }

    let note = parse_note(note, config)?;
    println!(
        "{}: {:.2} Hz (A-4 = {} Hz)",
        note,
        note.to_hertz(config.standard_pitch),
        config.standard_pitch
    );
    Ok(())
}

fn show_meter(text: Option<&str>, config: &TheoryConfig) -> Result<()> {
    let meter = config.meter_or_default(text)?;
    let kind = if meter.is_compound()? { "compound" } else { "simple" };
    let symmetry = if meter.is_asymmetrical()? {
        "asymmetrical"
    } else {
        "symmetrical"
    };
    println!("{}: {}, {}", meter, kind, symmetry);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut args: Vec<String> = env::args().collect();
    let config = take_config(&mut args)?;
    config.validate()?;

    if args.len() < 2 {
        println!("Tonal - Interval and Key-Signature Engine");
        println!("Run with --help for usage information");
        return Ok(());
    }

    let down = take_flag(&mut args, "--down");
    let shorthand = take_flag(&mut args, "--shorthand");

    match args[1].as_str() {
        "--scale" => {
            let key = args.get(2).unwrap_or(&config.default_key);
            show_scale(key)?;
        }
        "--signature" => {
            let key = args.get(2).unwrap_or(&config.default_key);
            show_signature(key)?;
        }
        "--interval" => {
            if args.len() < 4 {
                eprintln!("Error: --interval requires two notes");
                std::process::exit(1);
            }
            show_interval(&args[2], &args[3], shorthand, !down, &config)?;
        }
        "--transpose" => {
            if args.len() < 4 {
                eprintln!("Error: --transpose requires a note and an interval shorthand");
                std::process::exit(1);
            }
            show_transpose(&args[2], &args[3], !down, &config)?;
        }
        "--hertz" => {
            if args.len() < 3 {
                eprintln!("Error: --hertz requires a note");
                std::process::exit(1);
            }
            show_hertz(&args[2], &config)?;
        }
        "--meter" => {
            show_meter(args.get(2).map(String::as_str), &config)?;
        }
        "--help" | "-h" => {
            print_usage();
        }
        _ => {
            eprintln!("Unknown option: {}", args[1]);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}
