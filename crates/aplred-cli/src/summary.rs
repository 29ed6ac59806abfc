use std::path::Path;

use aplred_core::pipeline::{PipelineConfig, RunSummary};
use aplred_core::strategy::Strategy;
use console::Style;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    warn: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            warn: Style::new().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_run_header(config: &PipelineConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("APL Reducer"));
    println!();
    println!(
        "  {:<12}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(config.input.display())
    );
    println!(
        "  {:<12}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(config.output.display())
    );
    let strategy = match config.strategy {
        Strategy::Highlight {
            threshold_pct,
            compression,
        } => format!("highlight (threshold {threshold_pct}%, compression {compression})"),
        Strategy::Border {
            border_pct,
            darkening,
        } => format!("border (width {border_pct}%, darkening {darkening})"),
        Strategy::Zone {
            target_apl,
            zone_size,
        } => format!("zone (target APL {target_apl}%, zone size {zone_size}px)"),
    };
    println!(
        "  {:<12}{}",
        s.label.apply_to("Strategy"),
        s.value.apply_to(strategy)
    );
    println!();
}

pub fn print_run_summary(summary: &RunSummary, output: &Path) {
    let s = Styles::new();

    println!();
    if summary.cancelled {
        println!(
            "  {}",
            s.warn.apply_to(format!(
                "Cancelled after {}/{} frames",
                summary.frames_processed, summary.total_frames
            ))
        );
    }
    println!(
        "  {:<12}{}",
        s.label.apply_to("Frames"),
        s.value.apply_to(summary.frames_processed)
    );
    println!(
        "  {:<12}{}",
        s.label.apply_to("Mean APL"),
        s.value.apply_to(format!(
            "{:.1}% -> {:.1}%",
            summary.mean_apl_before, summary.mean_apl_after
        ))
    );
    println!(
        "  {:<12}{}",
        s.label.apply_to("Saved to"),
        s.path.apply_to(output.display())
    );
    println!();
}
