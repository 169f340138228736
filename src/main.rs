//! Snake Cashout headless simulator
//!
//! The browser build is driven from `platform::web`; natively this binary
//! plays batches of rounds and prints the observed return-to-player.
//!
//! Usage:
//!   cargo run --release -- --rounds 10000 --target 1.8 --variant spike

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;
    use std::process::ExitCode;

    use clap::Parser;
    use snake_cashout::config::{GameConfig, Variant};
    use snake_cashout::consts::TICK_MS;
    use snake_cashout::simulate::{self, BUCKET_WIDTH, SimulationParams};

    #[derive(Parser, Debug)]
    #[command(author, version, about = "Headless Snake Cashout round simulator")]
    struct Args {
        /// Rounds to play
        #[arg(short, long, default_value = "1000")]
        rounds: u32,

        /// Bet per round
        #[arg(short, long, default_value = "100")]
        bet: u64,

        /// Cash-out multiplier; omit to ride every round until it crashes
        #[arg(short, long)]
        target: Option<f64>,

        /// RNG seed (random when omitted)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Bonus variant: combo or spike
        #[arg(short, long, default_value = "combo")]
        variant: String,

        /// JSON config file; overrides the variant preset
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Keep the snake going straight instead of steering toward food
        #[arg(long)]
        no_steer: bool,

        /// Force a cash-out after this many ticks in one round
        #[arg(long, default_value = "100000")]
        max_ticks: u64,
    }

    fn load_config(args: &Args) -> Result<GameConfig, String> {
        if let Some(path) = &args.config {
            let json = std::fs::read_to_string(path)
                .map_err(|e| format!("reading {}: {}", path.display(), e))?;
            return GameConfig::from_json_str(&json).map_err(|e| e.to_string());
        }
        let variant = Variant::from_str(&args.variant)
            .ok_or_else(|| format!("unknown variant '{}'", args.variant))?;
        Ok(GameConfig::from_variant(variant))
    }

    pub fn run() -> ExitCode {
        env_logger::init();
        let args = Args::parse();

        let config = match load_config(&args) {
            Ok(config) => config,
            Err(err) => {
                log::error!("Invalid configuration: {}", err);
                return ExitCode::FAILURE;
            }
        };
        if !(config.min_bet..=config.max_bet).contains(&args.bet) {
            log::error!(
                "Bet {} outside {}..={}",
                args.bet,
                config.min_bet,
                config.max_bet
            );
            return ExitCode::FAILURE;
        }

        let seed = args.seed.unwrap_or_else(rand::random);
        let params = SimulationParams {
            rounds: args.rounds,
            bet: args.bet,
            target: args.target,
            steer: !args.no_steer,
            tick_ms: TICK_MS,
            max_ticks_per_round: args.max_ticks,
        };
        log::info!(
            "Simulating {} rounds ({} variant, seed {})",
            params.rounds,
            config.variant().as_str(),
            seed
        );

        let report = match simulate::run(&config, seed, &params) {
            Ok(report) => report,
            Err(err) => {
                log::error!("Invalid configuration: {}", err);
                return ExitCode::FAILURE;
            }
        };

        println!("rounds       {}", report.rounds);
        println!("cashed out   {}", report.cashed_out);
        println!(
            "crashed      {} ({} collisions)",
            report.crashed, report.collisions
        );
        println!("wagered      {}", report.wagered);
        println!("returned     {}", report.returned);
        println!("RTP          {:.4}", report.rtp());
        println!("mean score   {:.2}", report.mean_score());
        println!("best score   {}", report.best_score);
        println!("resets       {}", report.resets);
        println!("\ncrash multiplier histogram");
        let peak = report.crash_histogram.iter().copied().max().unwrap_or(0).max(1);
        for (i, count) in report.crash_histogram.iter().enumerate() {
            let lo = 1.0 + i as f64 * BUCKET_WIDTH;
            let bar = "#".repeat((*count as usize * 50) / peak as usize);
            println!("{:>5.1}x {:>7} {}", lo, count, bar);
        }
        ExitCode::SUCCESS
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    cli::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::init, this is just to satisfy the compiler
}
