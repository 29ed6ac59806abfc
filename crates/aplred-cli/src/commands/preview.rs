use std::path::PathBuf;

use anyhow::Result;
use aplred_core::io::image_io::save_frame;
use aplred_core::io::ser::SerReader;
use aplred_core::metric::apl;
use clap::Args;

use super::StrategyOpts;

#[derive(Args)]
pub struct PreviewArgs {
    /// Input SER file
    pub file: PathBuf,

    /// Frame index to extract
    #[arg(long, default_value = "0")]
    pub frame: usize,

    #[command(flatten)]
    pub strategy: StrategyOpts,

    /// Save the untransformed frame instead of applying the strategy
    #[arg(long)]
    pub original: bool,

    /// Output image path
    #[arg(short, long, default_value = "preview.png")]
    pub output: PathBuf,
}

pub fn run(args: &PreviewArgs) -> Result<()> {
    let reader = SerReader::open(&args.file)?;
    let frame = reader.read_frame(args.frame)?;
    let before = apl(&frame);

    if args.original {
        save_frame(&frame, &args.output)?;
        println!(
            "Frame {}: APL {:.1}% -> {}",
            args.frame,
            before,
            args.output.display()
        );
    } else {
        let strategy = args.strategy.to_strategy();
        strategy.validate()?;
        let out = strategy.apply(&frame);
        let after = apl(&out);
        save_frame(&out, &args.output)?;
        println!(
            "Frame {}: APL {:.1}% -> {:.1}% ({}) -> {}",
            args.frame,
            before,
            after,
            strategy.name(),
            args.output.display()
        );
    }

    Ok(())
}
