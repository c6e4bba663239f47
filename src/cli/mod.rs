// ============================================================
// Layer 1: CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and prints results. All the real
// work is delegated to Layer 2 (application).
//
//   inspect - show packed examples at an index
//   stats   - corpus and packing statistics
//   export  - write packed examples to JSONL
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, ExportArgs, InspectArgs, StatsArgs};

use crate::application::{
    export_use_case::ExportUseCase,
    inspect_use_case::{ExampleView, InspectUseCase},
    open_dataset,
};

#[derive(Parser, Debug)]
#[command(
    name = "bookcorpus-albert",
    version,
    about = "Pack BookCorpus text into fixed-length ALBERT/BERT pretraining examples."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Dispatch to the matching use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Inspect(args) => run_inspect(args),
            Commands::Stats(args)   => run_stats(args),
            Commands::Export(args)  => run_export(args),
        }
    }
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let cfg     = args.corpus.packer_config()?;
    let dataset = open_dataset(&args.corpus.corpus_dir, &args.corpus.tokenizer, cfg)?;
    let views   = InspectUseCase::new(dataset).views(args.index, args.count)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&views)?);
    } else {
        for view in &views {
            print_view(view);
        }
    }
    Ok(())
}

fn print_view(view: &ExampleView) {
    println!(
        "── example {} ({} real tokens, {} separators) ──",
        view.index, view.real_tokens, view.sep_count
    );
    println!("input_ids:   {:?}", view.input_ids);
    println!("segment_ids: {:?}", view.segment_ids);
    for (label, text) in ["A", "B"].iter().zip(&view.segments) {
        println!("segment {label}: {text}");
    }
    println!();
}

fn run_stats(args: StatsArgs) -> Result<()> {
    let cfg     = args.corpus.packer_config()?;
    let seq_len = cfg.seq_len;
    let dataset = open_dataset(&args.corpus.corpus_dir, &args.corpus.tokenizer, cfg)?;
    let stats   = InspectUseCase::new(dataset).stats(args.sample)?;

    println!("lines:                {}", stats.lines);
    println!("documents:            {}", stats.documents);
    println!("longest document:     {} lines", stats.max_document_lines);
    println!("tokens:               {}", stats.total_tokens);
    println!("tokens per line:      {:.2} mean, {} max", stats.mean_line_tokens, stats.max_line_tokens);
    println!("lines over budget:    {} (seq_len {})", stats.lines_over_budget, seq_len);
    println!("sampled examples:     {}", stats.sampled_examples);
    println!("two-segment examples: {}", stats.two_segment_examples);
    println!("mean fill:            {:.1}%", stats.mean_fill * 100.0);
    Ok(())
}

fn run_export(args: ExportArgs) -> Result<()> {
    let cfg     = args.corpus.packer_config()?;
    let dataset = open_dataset(&args.corpus.corpus_dir, &args.corpus.tokenizer, cfg)?;
    let summary = ExportUseCase::new(dataset, (&args).into()).execute()?;

    println!(
        "Export complete: {} train / {} val examples in '{}'",
        summary.train_examples,
        summary.val_examples,
        summary.output_dir.display()
    );
    Ok(())
}
