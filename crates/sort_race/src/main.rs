//! Races the parallel quicksort against the sequential one on identical
//! random inputs and prints how long each took.

use std::time::Duration;

use anyhow::{Context, ensure};
use bench::{DEFAULT_MAX, DEFAULT_MIN, DataGenerator, describe_timing, timeit};
use clap::Parser;
use quick_sort::{DEFAULT_GATE, SortConfig, parallel_sort_with, sequential_sort};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Opt {
    /// Worker counts to try, comma separated
    #[arg(short, long, env = "SORT_RACE_THREADS", value_delimiter = ',', default_value = "4")]
    threads: Vec<usize>,

    /// Input sizes to try, comma separated
    #[arg(
        short,
        long,
        env = "SORT_RACE_SIZES",
        value_delimiter = ',',
        default_value = "1000000,5000000,10000000"
    )]
    sizes: Vec<usize>,

    /// Minimum range length that is shared between workers
    #[arg(short, long, env = "SORT_RACE_GATE", default_value_t = DEFAULT_GATE)]
    gate: usize,

    /// Smallest generated value
    #[arg(long, env = "SORT_RACE_MIN", default_value_t = DEFAULT_MIN, allow_hyphen_values = true)]
    min: i32,

    /// Largest generated value
    #[arg(long, env = "SORT_RACE_MAX", default_value_t = DEFAULT_MAX, allow_hyphen_values = true)]
    max: i32,

    /// Fixed seed for reproducible inputs, random when absent
    #[arg(long, env = "SORT_RACE_SEED")]
    seed: Option<u64>,

    /// How many times each sort is repeated on a fresh copy
    #[arg(short, long, env = "SORT_RACE_LOOPS", default_value_t = 1)]
    loops: u32,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opt = Opt::parse();
    ensure!(opt.min <= opt.max, "--min {} is above --max {}", opt.min, opt.max);
    ensure!(opt.loops > 0, "--loops must be positive");

    let mut generator = match opt.seed {
        Some(seed) => DataGenerator::with_seed(opt.min, opt.max, seed),
        None => DataGenerator::new(opt.min, opt.max),
    };

    for &threads in &opt.threads {
        let config = SortConfig::builder()
            .workers(threads)
            .gate(opt.gate)
            .build()
            .with_context(|| format!("invalid thread count {threads}"))?;

        for &size in &opt.sizes {
            log::debug!("generating {size} values in [{}, {}]", opt.min, opt.max);
            let nums = generator.int_nums(size);

            let (parallel, elapsed) = time_sort(&nums, opt.loops, |data| {
                parallel_sort_with(data, &config);
            });
            println!(
                "Parallel Sorting: data num <{size}>, thread num <{threads}>, parallel_gate <{}>,  time consumption {}",
                opt.gate,
                describe_timing(elapsed, opt.loops)
            );

            let (sequential, elapsed) = time_sort(&nums, opt.loops, sequential_sort);
            println!(
                "Traditional Quick Sorting: data num <{size}>, time consumption {}",
                describe_timing(elapsed, opt.loops)
            );
            println!();

            ensure!(
                parallel.windows(2).all(|w| w[0] <= w[1]),
                "parallel sort left {size} values unsorted"
            );
            ensure!(
                parallel == sequential,
                "parallel and sequential results differ for {size} values"
            );
        }
    }

    Ok(())
}

/// Sorts a fresh copy of `nums` `loops` times. Only the sort calls are timed.
fn time_sort<F>(nums: &[i32], loops: u32, mut sort: F) -> (Vec<i32>, Duration)
where
    F: FnMut(&mut [i32]),
{
    let mut data = nums.to_vec();
    let mut total = Duration::ZERO;
    for _ in 0..loops {
        data.copy_from_slice(nums);
        total += timeit(1, || sort(&mut data));
    }
    (data, total)
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn copies_are_not_timed() {
        let nums = vec![3, 1, 2];
        let mut calls = 0;
        let (sorted, elapsed) = time_sort(&nums, 3, |data| {
            assert_eq!(*data, [3, 1, 2]);
            calls += 1;
            data.sort_unstable();
        });
        assert_eq!(calls, 3);
        assert_eq!(sorted, vec![1, 2, 3]);
        assert!(elapsed < Duration::from_secs(1));

        let (_, elapsed) = time_sort(&nums, 2, |_| thread::sleep(Duration::from_millis(10)));
        assert!(elapsed >= Duration::from_millis(20));
    }
}
