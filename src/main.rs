use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use tiatune::{compute, ClockProfile, Computation, Settings};

/// Print tuning tables for Atari 2600 TIA tones against a microtonal piano
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the notes of the reference keyboard
    Notes {
        #[command(flatten)]
        options: Options,
    },
    /// List every tone of the requested control values
    Tones {
        #[command(flatten)]
        options: Options,
    },
    /// List each keyboard note with the closest tone
    Table {
        #[command(flatten)]
        options: Options,
    },
}

#[derive(clap::Args, Debug)]
struct Options {
    /// YAML settings file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Frequency of the reference A in Hz
    #[arg(long)]
    a4_frequency: Option<f64>,

    /// Key number of the reference A
    #[arg(long)]
    a4_key: Option<i32>,

    /// Transpose in cents
    #[arg(long, allow_hyphen_values = true)]
    transpose: Option<i32>,

    /// Micro tones per semitone
    #[arg(long)]
    micro_tones: Option<i32>,

    /// Largest deviation in cents counted as in tune
    #[arg(long)]
    sensitivity: Option<f64>,

    /// Video timing: ntsc or pal
    #[arg(long)]
    video: Option<ClockProfile>,

    /// AUDC control value to enumerate, repeatable
    #[arg(long = "tone")]
    tones: Vec<u8>,

    /// First key number of the keyboard
    #[arg(long)]
    first_key: Option<i32>,

    /// Last key number of the keyboard
    #[arg(long)]
    last_key: Option<i32>,

    /// Clip the keyboard to the keys the tones reach
    #[arg(long)]
    stretch_fit: bool,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

impl Options {
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };

        if let Some(frequency) = self.a4_frequency {
            settings.tuning.a4_frequency = frequency;
        }
        if let Some(key_number) = self.a4_key {
            settings.tuning.a4_key_number = key_number;
        }
        if let Some(cents) = self.transpose {
            settings.tuning.cent_transpose = cents;
        }
        if let Some(count) = self.micro_tones {
            settings.tuning.micro_tones_per_semitone = count;
        }
        if let Some(cents) = self.sensitivity {
            settings.tuning.tuning_sensitivity_cents = cents;
        }
        if let Some(profile) = self.video {
            settings.video_format = profile;
        }
        if !self.tones.is_empty() {
            settings.tones = self.tones.clone();
        }
        if let Some(first) = self.first_key {
            settings.first_key = first;
        }
        if let Some(last) = self.last_key {
            settings.last_key = last;
        }
        settings.stretch_fit |= self.stretch_fit;

        settings.validate().context("Invalid options")?;
        Ok(settings)
    }

    fn compute(&self) -> Result<Computation> {
        let settings = self.settings()?;
        let result = compute(&settings.tuning, &settings.request()?)?;

        info!(
            "{} notes, {} tones ({} matched, {} unmatched)",
            result.reference.len(),
            result.tones.len(),
            result.table.matched().len(),
            result.table.unmatched().len()
        );
        Ok(result)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Commands::Notes { options } => {
            let result = options.compute()?;
            let model = result.reference.model();

            if options.json {
                println!("{}", serde_json::to_string_pretty(result.reference.notes())?);
                return Ok(());
            }

            for note in &result.reference {
                println!(
                    "{:<10} key {:>3}  midi {:>3}  micro id {:>4}  {} Hz",
                    note.label(),
                    note.key_number,
                    note.midi_number,
                    note.micro_id,
                    model.round_frequency(note.frequency)
                );
            }
        }
        Commands::Tones { options } => {
            let result = options.compute()?;
            let model = result.tones.model();

            if options.json {
                println!("{}", serde_json::to_string_pretty(result.tones.tones())?);
                return Ok(());
            }

            for tone in &result.tones {
                match tone.nearest {
                    Some(note) if !tone.is_silent() => println!(
                        "{:<6} {:>10} Hz  {:<10} {:+} cents",
                        tone.label(),
                        model.round_frequency(tone.frequency),
                        note.label(),
                        model.round_cents(tone.cents)
                    ),
                    _ => println!("{:<6} silent", tone.label()),
                }
            }
        }
        Commands::Table { options } => {
            let result = options.compute()?;
            let rows = result.table.flattened_table();

            if options.json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
                return Ok(());
            }

            for row in &rows {
                match (&row.tone_label, row.best_frequency_rounded, row.cents_rounded) {
                    (Some(label), Some(frequency), Some(cents)) => println!(
                        "{:<10} {:>10} Hz  {:<6} {:>10} Hz  {:+} cents{}",
                        row.pivot.label(),
                        row.pivot_frequency_rounded,
                        label,
                        frequency,
                        cents,
                        if row.within_tolerance { "" } else { "  (out of tune)" }
                    ),
                    _ => println!(
                        "{:<10} {:>10} Hz  -",
                        row.pivot.label(),
                        row.pivot_frequency_rounded
                    ),
                }
            }
        }
    }

    Ok(())
}
