// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use anyhow::{anyhow, bail, Result};
use harmony::config::HarmonyConfig;
use harmony::music::{
    Accidental, Chord, ChordQuality, KeySignature, KeyType, OvertoneSeries, Pitch, PitchClass,
    Scale, Tuning, SEMITONES_IN_OCTAVE,
};
use std::env;
use tracing::{debug, Level};

fn print_usage() {
    println!("HARMONY - Music theory calculator");
    println!();
    println!("Usage: harmony [--config <path>] [--verbose] <COMMAND>");
    println!();
    println!("Commands:");
    println!("  --scale <ROOT> <NAME>                 List a scale (e.g. C dorian, F# whole-tone)");
    println!("  --key <TONIC> <TYPE>                  Show a key signature (major, minor, harmonic_minor)");
    println!("  --chord <ROOT> <OCTAVE> <QUALITY>     Build a chord (e.g. A 3 m7)");
    println!("  --freq <PITCH CLASS> <OCTAVE>         Frequency of a pitch in the configured tuning");
    println!("  --overtones <PITCH CLASS> <OCTAVE> [N] First N partials and their nearest pitches");
    println!("  --interval <FROM> <TO>                Interval between two pitches (e.g. C4 E5)");
    println!("  --help                                Show this help message");
    println!();
    println!("In tunings other than 12 steps per octave, pitch classes are step indices.");
    println!("--scale, --key, --chord and --interval need a 12-step tuning.");
}

fn require_args(args: &[String], count: usize, usage: &str) {
    if args.len() < count + 1 {
        eprintln!("Error: {} requires {}", args[0], usage);
        std::process::exit(1);
    }
}

fn parse_pitch_class(s: &str, steps: u32) -> Result<PitchClass> {
    if steps == SEMITONES_IN_OCTAVE {
        return Ok(s.parse()?);
    }
    let index: i64 = s
        .parse()
        .map_err(|_| anyhow!("Invalid step index for a {}-step octave: {}", steps, s))?;
    Ok(PitchClass::with_octave_size(index, steps)?)
}

/// Note names and spelled intervals only exist in twelve steps
fn require_twelve_tone(command: &str, tuning: &Tuning) -> Result<()> {
    if tuning.steps_per_octave() != SEMITONES_IN_OCTAVE {
        bail!(
            "{} needs a {}-step tuning, but the configuration divides the octave into {} steps",
            command,
            SEMITONES_IN_OCTAVE,
            tuning.steps_per_octave()
        );
    }
    Ok(())
}

fn parse_octave(s: &str) -> Result<i32> {
    s.parse().map_err(|_| anyhow!("Invalid octave: {}", s))
}

fn pitch_name(pitch: &Pitch, accidental: Accidental) -> String {
    match pitch.pitch_class().name_with(accidental) {
        Ok(name) => format!("{}{}", name, pitch.octave()),
        Err(_) => pitch.to_string(),
    }
}

fn class_name(pitch_class: PitchClass, accidental: Accidental) -> String {
    pitch_class
        .name_with(accidental)
        .map(str::to_string)
        .unwrap_or_else(|_| pitch_class.to_string())
}

fn show_scale(root: &str, name: &str, config: &HarmonyConfig) -> Result<()> {
    let scale = Scale::parse(root, name)?;
    let accidental = scale
        .key_signature()
        .and_then(|key| key.accidental())
        .unwrap_or(config.notation.accidental);

    println!("{}", scale);
    let names: Vec<String> = scale
        .pitch_classes()
        .into_iter()
        .map(|pc| class_name(pc, accidental))
        .collect();
    println!("Notes:     {}", names.join(" "));
    let degrees: Vec<String> = scale.intervals().iter().map(|i| i.to_string()).collect();
    println!("Degrees:   {}", degrees.join(" "));
    let steps: Vec<String> = scale.steps().iter().map(|i| i.semitones().to_string()).collect();
    println!("Steps:     {}", steps.join(" "));
    if let Some(key) = scale.key_signature() {
        println!("Signature: {}", describe_signature(&key));
    }
    Ok(())
}

fn describe_signature(key: &KeySignature) -> String {
    match key.accidental() {
        Some(Accidental::Sharp) => format!("{} sharps ({})", key.num_sharps(), key),
        Some(Accidental::Flat) => format!("{} flats ({})", key.num_flats(), key),
        None => format!("no accidentals ({})", key),
    }
}

fn show_key(tonic: &str, key_type: &str) -> Result<()> {
    let key_type: KeyType = key_type.parse()?;
    let key = KeySignature::new(tonic.parse()?, key_type)?;
    let accidental = key.accidental().unwrap_or_default();

    println!("{}", key);
    println!("Signature: {}", describe_signature(&key));
    let names: Vec<String> = key
        .scale()
        .pitch_classes()
        .into_iter()
        .map(|pc| class_name(pc, accidental))
        .collect();
    println!("Notes:     {}", names.join(" "));
    println!("Relative:  {}", key.relative_key());
    println!("Parallel:  {}", key.parallel_key());
    println!("Dominant:  {}", key.dominant_key());
    if let Some(enharmonic) = key.enharmonic_key() {
        println!("Enharmonic: {}", enharmonic);
    }
    Ok(())
}

fn show_chord(root: &str, octave: &str, quality: &str, config: &HarmonyConfig) -> Result<()> {
    let quality: ChordQuality = quality.parse()?;
    let root = Pitch::new(root.parse()?, parse_octave(octave)?);
    let chord = Chord::with_quality(root, quality)?;
    let accidental = config.notation.accidental;

    println!("{}", chord);
    let pitches: Vec<String> = chord.pitches().iter().map(|p| pitch_name(p, accidental)).collect();
    println!("Pitches:   {}", pitches.join(" "));
    let midi: Vec<String> = chord
        .pitches()
        .iter()
        .map(|p| p.midi_note().map(|n| n.to_string()).unwrap_or_else(|_| "-".to_string()))
        .collect();
    println!("MIDI:      {}", midi.join(" "));
    let intervals: Vec<String> = chord.intervals_from_root().iter().map(|i| i.to_string()).collect();
    println!("Intervals: {}", intervals.join(" "));
    let vector: Vec<String> = chord.interval_class_vector().iter().map(|n| n.to_string()).collect();
    println!("IC vector: <{}>", vector.join(""));
    Ok(())
}

fn show_frequency(pitch_class: &str, octave: &str, config: &HarmonyConfig, tuning: &Tuning) -> Result<()> {
    let pc = parse_pitch_class(pitch_class, tuning.steps_per_octave())?;
    let pitch = Pitch::new(pc, parse_octave(octave)?);
    let freq = pitch.frequency_in(tuning)?;
    print!("{}: {:.3} Hz", pitch_name(&pitch, config.notation.accidental), freq);
    if let Ok(note) = pitch.midi_note() {
        print!(" (MIDI {})", note);
    }
    println!();
    Ok(())
}

fn show_overtones(
    pitch_class: &str,
    octave: &str,
    count: Option<&String>,
    config: &HarmonyConfig,
    tuning: &Tuning,
) -> Result<()> {
    let pc = parse_pitch_class(pitch_class, tuning.steps_per_octave())?;
    let fundamental = Pitch::new(pc, parse_octave(octave)?);
    let count = match count {
        Some(s) => s.parse().map_err(|_| anyhow!("Invalid partial count: {}", s))?,
        None => config.notation.overtone_partials,
    };
    let series = OvertoneSeries::with_tuning(fundamental, count, *tuning)?;

    println!(
        "Overtones of {} ({:.3} Hz)",
        pitch_name(&fundamental, config.notation.accidental),
        series.fundamental_frequency()
    );
    for approximate in series.nearest_pitches() {
        let approximate = approximate?;
        println!(
            "{:>3}  {:>10.3} Hz  {:<6} {:+7.2} cents",
            approximate.partial.number,
            approximate.partial.frequency,
            pitch_name(&approximate.pitch, config.notation.accidental),
            approximate.cents_deviation
        );
    }
    Ok(())
}

fn show_interval(from: &str, to: &str) -> Result<()> {
    let from: Pitch = from.parse()?;
    let to: Pitch = to.parse()?;
    let compound = from.compound_interval_to(&to)?;
    let direction = if compound.is_descending() { "down" } else { "up" };
    println!(
        "{} -> {}: {} {} ({} semitones)",
        from,
        to,
        compound,
        direction,
        compound.semitones()
    );
    println!("Simple:    {}", compound.simple_interval().description(false));
    Ok(())
}

fn main() -> Result<()> {
    let mut args: Vec<String> = env::args().collect();

    let mut config_path = None;
    let mut verbose = false;
    let mut rest = Vec::new();
    let mut iter = args.drain(1..);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                config_path = Some(
                    iter.next()
                        .ok_or_else(|| anyhow!("--config requires a file path"))?,
                );
            }
            "--verbose" | "-v" => verbose = true,
            _ => rest.push(arg),
        }
    }

    tracing_subscriber::fmt()
        .with_max_level(if verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    if rest.is_empty() {
        println!("HARMONY - Music theory calculator");
        println!("Run with --help for usage information");
        return Ok(());
    }

    let config = match &config_path {
        Some(path) => HarmonyConfig::load(path)?,
        None => HarmonyConfig::default(),
    };
    let tuning = config.tuning.to_tuning()?;
    debug!(command = %rest[0], "dispatching");
    if matches!(rest[0].as_str(), "--scale" | "--key" | "--chord" | "--interval") {
        require_twelve_tone(&rest[0], &tuning)?;
    }

    match rest[0].as_str() {
        "--scale" => {
            require_args(&rest, 2, "a root and a scale name");
            show_scale(&rest[1], &rest[2], &config)?;
        }
        "--key" => {
            require_args(&rest, 2, "a tonic and a key type");
            show_key(&rest[1], &rest[2])?;
        }
        "--chord" => {
            require_args(&rest, 3, "a root, an octave and a quality");
            show_chord(&rest[1], &rest[2], &rest[3], &config)?;
        }
        "--freq" => {
            require_args(&rest, 2, "a pitch class and an octave");
            show_frequency(&rest[1], &rest[2], &config, &tuning)?;
        }
        "--overtones" => {
            require_args(&rest, 2, "a pitch class and an octave");
            show_overtones(&rest[1], &rest[2], rest.get(3), &config, &tuning)?;
        }
        "--interval" => {
            require_args(&rest, 2, "two pitches");
            show_interval(&rest[1], &rest[2])?;
        }
        "--help" | "-h" => {
            print_usage();
        }
        _ => {
            eprintln!("Unknown option: {}", rest[0]);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_commands_need_twelve_steps() {
        assert!(require_twelve_tone("--scale", &Tuning::default()).is_ok());

        let config = HarmonyConfig::from_yaml("tuning:\n  steps_per_octave: 24\n  reference_step: 18\n").unwrap();
        let tuning = config.tuning.to_tuning().unwrap();
        let err = require_twelve_tone("--chord", &tuning).unwrap_err();
        assert!(err.to_string().contains("--chord needs a 12-step tuning"));
        assert!(err.to_string().contains("24 steps"));
    }

    #[test]
    fn test_parse_pitch_class_uses_step_indices() {
        assert_eq!(parse_pitch_class("G", 12).unwrap(), PitchClass::new(7));
        let quarter = parse_pitch_class("19", 24).unwrap();
        assert_eq!(quarter.index(), 19);
        assert_eq!(quarter.octave_size(), 24);
        assert!(parse_pitch_class("G", 24).is_err());
    }
}
