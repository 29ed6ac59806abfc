use std::path::PathBuf;

use anyhow::Result;
use aplred_core::consts::FRAME_BATCH_SIZE;
use aplred_core::io::ser::SerReader;
use aplred_core::metric::apl;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

#[derive(Args)]
pub struct MeasureArgs {
    /// Input SER file
    pub file: PathBuf,

    /// Show the N brightest frames
    #[arg(long, default_value = "10")]
    pub top: usize,
}

pub fn run(args: &MeasureArgs) -> Result<()> {
    let reader = SerReader::open(&args.file)?;
    let total = reader.frame_count();

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    pb.set_message("Measuring APL");

    // Batched read + parallel measurement, one batch in memory at a time.
    let mut apls: Vec<(usize, f64)> = Vec::with_capacity(total);
    for batch_start in (0..total).step_by(FRAME_BATCH_SIZE) {
        let batch_end = (batch_start + FRAME_BATCH_SIZE).min(total);
        let batch = (batch_start..batch_end)
            .map(|i| reader.read_frame(i))
            .collect::<aplred_core::error::Result<Vec<_>>>()?;
        let batch_apls: Vec<(usize, f64)> = batch
            .par_iter()
            .enumerate()
            .map(|(offset, frame)| (batch_start + offset, apl(frame)))
            .collect();
        apls.extend(batch_apls);
        pb.set_position(batch_end as u64);
    }
    pb.finish_and_clear();

    if apls.is_empty() {
        println!("No frames.");
        return Ok(());
    }

    let mean = apls.iter().map(|(_, a)| a).sum::<f64>() / apls.len() as f64;
    let min = apls.iter().map(|(_, a)| *a).fold(f64::INFINITY, f64::min);
    let max = apls.iter().map(|(_, a)| *a).fold(f64::NEG_INFINITY, f64::max);

    println!("Frames:    {}", total);
    println!("APL mean:  {:.2}%", mean);
    println!("APL min:   {:.2}%", min);
    println!("APL max:   {:.2}%", max);

    let mut ranked = apls;
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    println!("\nTop {} brightest frames:", args.top.min(total));
    println!("{:>5}  {:>12}  {:>8}", "Rank", "Frame #", "APL %");
    println!("{}", "-".repeat(30));
    for (rank, (idx, a)) in ranked.iter().take(args.top).enumerate() {
        println!("{:>5}  {:>12}  {:>8.2}", rank + 1, idx, a);
    }

    Ok(())
}
