/*
 * worker.rs - the short-lived worker job spawned by the tickrun launcher.
 *
 * usage: tickrun-worker <seq>
 * Prints its start line, burns a fixed amount of CPU, prints the measured
 * workload time, and exits. The launcher parses the workload time line.
 */

use std::env;
use std::process;

use tickrun::workload;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        eprintln!("Usage: {} <seq>", args[0]);
        process::exit(1);
    }

    let seq = args[1].parse::<u32>().unwrap_or_else(|_| {
        eprintln!("Error: <seq> must be a non-negative integer");
        process::exit(1);
    });

    let started = chrono::Local::now();
    println!(
        "job {seq}: pid = {}, started at {}",
        process::id(),
        started.format("%Y-%m-%d %H:%M:%S")
    );

    let elapsed = workload::busy_work(workload::DEFAULT_ITERATIONS);
    println!("job {seq}: workload time = {:.3} sec", elapsed.as_secs_f64());
}
