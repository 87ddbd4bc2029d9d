//! Defines all the CLI arguments.

/// `Config`
#[derive(clap::Parser, Debug)]
#[command(version, about)]
pub struct Config {
    /// The image to brighten. Anything the `image` crate can decode is accepted, but only
    /// 3-channel images can be processed unless `--convert` is given.
    #[arg(long, value_name = "Path to the input image", default_value = "input/input.jpg")]
    pub input: std::path::PathBuf,
    /// The offset added to every channel of every pixel. Negative values darken. Results are
    /// clamped to 0..=255.
    #[arg(
        long,
        value_name = "Signed brightness offset",
        default_value_t = 50,
        allow_negative_numbers = true
    )]
    pub brightness: i32,
    /// The number of measured runs of each strategy. The reported durations are the mean of
    /// these.
    #[arg(
        long,
        value_name = "Measured runs per strategy",
        default_value_t = 100,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub iterations: u32,
    /// The number of discarded runs of each strategy before measuring starts. Gives the CPU a
    /// chance to settle its clock and caches.
    #[arg(long, value_name = "Discarded runs per strategy", default_value_t = 5)]
    pub warmup: u32,
    /// Save a 2x2 grid of the original and each strategy's output to this path. Tiles run
    /// left to right, top to bottom: Original, Baseline, Wide, Narrow. The format is taken from
    /// the file extension.
    #[arg(long, value_name = "Path to save the comparison image to")]
    pub comparison: Option<std::path::PathBuf>,
    /// Convert the input to 8-bit RGB instead of rejecting images that don't have exactly 3
    /// channels.
    #[arg(long)]
    pub convert: bool,
}
