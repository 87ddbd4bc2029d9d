//! The benchmark harness. Every strategy gets the same frame and offset, is warmed up, then timed
//! over a fixed number of iterations.

use brightness_kernel::{Frame, Strategy};
use color_eyre::eyre::{ContextCompat as _, Result};

/// An accelerated strategy disagreed with the baseline.
#[derive(Debug)]
pub struct Mismatch {
    /// The strategy that got it wrong.
    pub strategy: Strategy,
    /// Index of the first differing byte.
    pub index: usize,
    /// What the baseline produced.
    pub expected: u8,
    /// What the strategy produced.
    pub actual: u8,
}

impl core::fmt::Display for Mismatch {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} output differs from the baseline at byte {}: expected {}, got {}",
            self.strategy, self.index, self.expected, self.actual
        )
    }
}

impl std::error::Error for Mismatch {}

/// Timing for a single strategy.
#[derive(Debug, Clone, Copy)]
pub struct Measurement {
    /// What was measured.
    pub strategy: Strategy,
    /// The sum of all the measured runs.
    pub total: std::time::Duration,
    /// How many runs were measured.
    pub iterations: u32,
}

impl Measurement {
    /// Arithmetic mean of a single run in microseconds.
    #[expect(
        clippy::as_conversions,
        clippy::cast_precision_loss,
        reason = "Nobody is going to benchmark for 2^53 nanoseconds"
    )]
    pub fn mean_micros(&self) -> f64 {
        let nanos_per_micro = 1000.0;
        self.total.as_nanos() as f64 / nanos_per_micro / f64::from(self.iterations.max(1))
    }
}

/// The results of a whole benchmark.
#[derive(Debug, Clone)]
pub struct Report {
    /// One measurement per strategy, in the order of `Strategy::ALL`.
    pub measurements: Vec<Measurement>,
}

impl Report {
    /// Mean duration of a single run in microseconds.
    pub fn mean_micros(&self, strategy: Strategy) -> f64 {
        self.measurements
            .iter()
            .find(|measurement| measurement.strategy == strategy)
            .map_or(0.0, Measurement::mean_micros)
    }

    /// How many times faster the strategy is than the baseline.
    pub fn speedup(&self, strategy: Strategy) -> f64 {
        let accelerated = self.mean_micros(strategy);
        if accelerated > 0.0 {
            self.mean_micros(Strategy::Baseline) / accelerated
        } else {
            f64::INFINITY
        }
    }
}

impl core::fmt::Display for Report {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for strategy in Strategy::ALL {
            writeln!(
                f,
                "{:<27}{:.3} microseconds",
                format!("{strategy} Average Duration:"),
                self.mean_micros(strategy)
            )?;
        }
        for strategy in [Strategy::Wide, Strategy::Narrow] {
            writeln!(
                f,
                "{:<29}{:.3}x",
                format!("Speedup (Baseline / {strategy}):"),
                self.speedup(strategy)
            )?;
        }
        Ok(())
    }
}

/// Everything a benchmark run produces.
pub struct Outcome {
    /// The timings.
    pub report: Report,
    /// The output of each strategy's final run, in the order of `Strategy::ALL`.
    pub outputs: Vec<(Strategy, Frame)>,
}

/// Handles a whole benchmark.
pub struct Bench<'bench> {
    /// The untouched input. Every run clones it.
    frame: &'bench Frame,
    /// The brightness offset.
    offset: i32,
    /// Measured runs per strategy.
    iterations: u32,
    /// Discarded runs per strategy.
    warmup: u32,
}

impl<'bench> Bench<'bench> {
    /// Instantiate.
    pub fn new(frame: &'bench Frame, offset: i32, iterations: u32, warmup: u32) -> Result<Self> {
        if iterations == 0 {
            color_eyre::eyre::bail!("At least one measured iteration is needed");
        }

        // Fail before any timing rather than part way through.
        frame.ensure_supported()?;

        Ok(Self {
            frame,
            offset,
            iterations,
            warmup,
        })
    }

    /// Warm up, measure and check that every strategy agrees with the baseline.
    pub fn run(&self) -> Result<Outcome> {
        self.warm_up()?;
        let (report, outputs) = self.measure()?;
        Self::verify(&outputs)?;
        Ok(Outcome { report, outputs })
    }

    /// Run everything a few times without measuring.
    fn warm_up(&self) -> Result<()> {
        tracing::info!("Warming up with {} run(s) per strategy", self.warmup);
        for _ in 0..self.warmup {
            for strategy in Strategy::ALL {
                std::hint::black_box(strategy.apply(self.frame, self.offset)?);
            }
        }
        Ok(())
    }

    /// The timed runs. Strategies are interleaved within each iteration so that any drift in CPU
    /// clock speed affects them all equally.
    fn measure(&self) -> Result<(Report, Vec<(Strategy, Frame)>)> {
        tracing::info!(
            "Measuring {} run(s) per strategy with offset {}",
            self.iterations,
            self.offset
        );

        let mut totals = [std::time::Duration::ZERO; Strategy::ALL.len()];
        let mut latest: [Option<Frame>; Strategy::ALL.len()] = [None, None, None];

        for _ in 0..self.iterations {
            for ((strategy, total), slot) in Strategy::ALL
                .into_iter()
                .zip(totals.iter_mut())
                .zip(latest.iter_mut())
            {
                let start = std::time::Instant::now();
                let output = strategy.apply(self.frame, self.offset)?;
                *total += start.elapsed();
                *slot = Some(output);
            }
        }

        let mut measurements = Vec::with_capacity(Strategy::ALL.len());
        let mut outputs = Vec::with_capacity(Strategy::ALL.len());
        for ((strategy, total), slot) in Strategy::ALL.into_iter().zip(totals).zip(latest) {
            tracing::debug!("{strategy}: {total:?} over {} run(s)", self.iterations);
            measurements.push(Measurement {
                strategy,
                total,
                iterations: self.iterations,
            });
            outputs.push((
                strategy,
                slot.context(format!("{strategy} never produced any output"))?,
            ));
        }

        Ok((Report { measurements }, outputs))
    }

    /// Every accelerated strategy must match the baseline byte for byte.
    fn verify(outputs: &[(Strategy, Frame)]) -> Result<()> {
        let baseline = outputs
            .iter()
            .find(|(strategy, _)| *strategy == Strategy::Baseline)
            .map(|(_, frame)| frame)
            .context("No baseline output to verify against")?;

        for (strategy, frame) in outputs {
            if let Some((index, (&expected, &actual))) = baseline
                .as_bytes()
                .iter()
                .zip(frame.as_bytes())
                .enumerate()
                .find(|(_, (expected, actual))| expected != actual)
            {
                return Err(Mismatch {
                    strategy: *strategy,
                    index,
                    expected,
                    actual,
                }
                .into());
            }
            tracing::debug!("{strategy} output matches the baseline");
        }

        Ok(())
    }
}

#[expect(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    reason = "They're just tests"
)]
