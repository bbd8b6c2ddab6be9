use std::{fs::File, io::BufWriter, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use indicatif::ProgressBar;

use ledmap::{
    preview::swatch, read_keymap, rewrite_file, rewrite_source, RewriteOptions, RewriteReport,
};

/// Compacts the LED color table of an ErgoDox EZ keymap.c
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Input keymap.c
    keymap_in: PathBuf,

    /// Output keymap.c, the input is rewritten in place when omitted
    keymap_out: Option<PathBuf>,

    /// Run the whole rewrite but leave every file untouched
    #[arg(long)]
    dry_run: bool,

    /// Estimate keymap sizes under alternative encodings
    #[arg(long)]
    layout_stats: bool,

    /// Show every distinct color as a terminal swatch
    #[arg(long)]
    preview: bool,

    /// Save the run report as JSON
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,

    /// Keep the uint16_t layer_state_set_user signature
    #[arg(long)]
    no_legacy_fix: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let options = RewriteOptions {
        layout_stats: args.layout_stats,
        legacy_signature_fix: !args.no_legacy_fix,
    };

    let spinner = ProgressBar::new_spinner();
    let result = if args.dry_run {
        read_keymap(&args.keymap_in).and_then(|source| {
            rewrite_source(&source, &options, |stage| spinner.set_message(stage.as_str()))
                .map(|rewrite| rewrite.report)
        })
    } else {
        let keymap_out = args.keymap_out.as_deref().unwrap_or(args.keymap_in.as_path());
        rewrite_file(&args.keymap_in, keymap_out, &options, |stage| {
            spinner.set_message(stage.as_str())
        })
    };
    spinner.finish_and_clear();
    let report = result.with_context(|| format!("While rewriting {}", args.keymap_in.display()))?;

    print_summary(&report);

    if args.preview {
        if let Some(ledmap) = &report.ledmap {
            for (index, color) in ledmap.distinct_colors.iter().enumerate() {
                println!("{}", swatch(index, *color));
            }
        }
    }

    if let Some(path) = &args.report {
        let file = File::create(path)
            .with_context(|| format!("While creating {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &report)
            .context("While writing report")?;
    }

    if args.dry_run {
        println!("{}", "dry run, nothing written".yellow());
    }

    Ok(())
}

fn print_summary(report: &RewriteReport) {
    if let Some(layout) = &report.layout {
        for (index, layer) in layout.layers.iter().enumerate() {
            println!(
                "{} {}: {} keys, {} distinct",
                "Layer".bold(),
                index,
                layer.keys,
                layer.distinct_keys
            );
            println!(
                "  default {}b, bitcode {}b (dict {}b), sparse {}b ({} keys)",
                layer.default_size,
                layer.bitcode_total(),
                layer.dictionary_size,
                layer.sparse_size,
                layer.non_transparent_keys
            );
        }
        println!(
            "{} default {}b, bitcode {}b, sparse {}b",
            "Keymap".bold(),
            layout.totals.default_size,
            layout.totals.bitcode_size,
            layout.totals.sparse_size
        );
    }

    if let Some(ledmap) = &report.ledmap {
        println!(
            "{} {} layers, {} distinct colors, {} lit leds",
            "Ledmap".bold(),
            ledmap.layers,
            ledmap.distinct_colors.len(),
            ledmap.sparse_entries
        );
        println!(
            "  {}b -> {}",
            ledmap.dense_size,
            format!("{}b", ledmap.compact_size).green()
        );
    }
}
