mod solver;
mod tracking;
mod tui;

use core::num::NonZeroUsize;
use std::collections::HashSet;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use bpci::{Interval, NSuccessesSample, WilsonScore};
use clap::{Args, Parser, Subcommand};
use rand::prelude::*;
use sweepbot::layout::Layout;
use sweepbot::rules::Rules;
use sweepbot::shuffler;
use sweepbot::solver::SearchResult;
use sweepbot::state::{Encode, State};

use crate::tui::print_game;

// about a gigabyte of frontier and visited table on the standard rules
const DEFAULT_LIMIT: NonZeroUsize = match NonZeroUsize::new(1_000_000) {
    Some(l) => l,
    None => panic!("limit must be positive"),
};

#[derive(Args, Clone)]
pub struct Source {
    /// File with the layout, stdin when neither a file nor a seed is given
    file: Option<PathBuf>,
    /// Deal a random layout instead of reading one
    #[arg(long, conflicts_with = "file")]
    seed: Option<u64>,
}

impl Source {
    fn load(&self, rules: Rules) -> anyhow::Result<Layout> {
        if let Some(seed) = self.seed {
            return Ok(shuffler::default_shuffle(rules, seed));
        }
        let text = match &self.file {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?,
            None => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("reading stdin")?;
                text
            }
        };
        Layout::parse(&text, rules).context("parsing layout")
    }
}

fn print_answer(res: SearchResult) -> anyhow::Result<()> {
    match res {
        SearchResult::Solved => println!("All cards can be removed."),
        SearchResult::Unsolvable => println!("Not all cards can be removed."),
        SearchResult::Terminated => {
            println!("Search terminated before an answer was found.");
            bail!("search did not terminate within available memory/time");
        }
    }
    Ok(())
}

fn solve(
    rules: Rules,
    source: &Source,
    limit: NonZeroUsize,
    verbose: bool,
    terminated: &Arc<AtomicBool>,
) -> anyhow::Result<()> {
    let layout = source.load(rules)?;
    log::info!("{:<32}{:<32}", "solving layout", format!("{} decks", rules.n_decks()));

    let now = Instant::now();
    let (res, stats) = solver::run_solve(layout, Some(limit), verbose, terminated)?;
    if verbose {
        println!("Run in {} ms", now.elapsed().as_secs_f64() * 1000f64);
        println!("Statistic\n{stats}");
    }
    log::info!("{:<32}{:<32}", "search finished", format!("{res:?}"));
    print_answer(res)
}

fn game_loop(rules: Rules, source: &Source) -> anyhow::Result<()> {
    let mut game = State::from(source.load(rules)?);

    let mut line = String::new();
    let mut history = Vec::<State>::new();
    let mut game_state = HashSet::<Encode>::new();

    loop {
        print_game(&game);
        if game.is_final() {
            println!("Solved in {} moves", history.len());
            return Ok(());
        }
        if !game_state.insert(game.encode().clone()) {
            println!("Already existed state");
        }

        let moves = game.gen_moves();
        for (i, m) in moves.iter().enumerate() {
            print!("{i}.{m}, ");
        }
        println!();

        println!("Priority: {}", game.priority());
        print!("Move: ");
        std::io::stdout().flush()?;
        line.clear();
        if std::io::stdin().read_line(&mut line)? == 0 {
            return Ok(());
        }
        let input = line.trim();
        if input == "q" {
            return Ok(());
        }
        match input.parse::<usize>().ok() {
            Some(id) if id < moves.len() => {
                if let Some(next) = game.do_move(moves[id]) {
                    history.push(core::mem::replace(&mut game, next));
                }
            }
            Some(_) => match history.pop() {
                Some(prev) => {
                    game = prev;
                    println!("Undo!!");
                }
                None => println!("Nothing to undo"),
            },
            None => println!("Invalid move"),
        }
    }
}

fn solve_loop(
    rules: Rules,
    org_seed: u64,
    count: u64,
    limit: NonZeroUsize,
    terminated: &Arc<AtomicBool>,
) -> anyhow::Result<()> {
    let mut cnt_terminated = 0u32;
    let mut cnt_solve = 0u32;
    let mut cnt_total = 0u32;

    let start = Instant::now();

    for step in 0..count {
        let seed = org_seed.wrapping_add(step);
        let layout = shuffler::default_shuffle(rules, seed);

        let now = Instant::now();
        let (res, stats) = solver::run_solve(layout, Some(limit), false, terminated)?;
        match res {
            SearchResult::Solved => cnt_solve += 1,
            SearchResult::Terminated => cnt_terminated += 1,
            SearchResult::Unsolvable => {}
        };

        cnt_total += 1;

        let lower = NSuccessesSample::new(cnt_total, cnt_solve)
            .map_or(0.0, |s| s.wilson_score(1.960).lower()); //95%
        let higher = NSuccessesSample::new(cnt_total, cnt_solve + cnt_terminated)
            .map_or(1.0, |s| s.wilson_score(1.960).upper()); //95%
        println!(
            "Run {} in {:.2} ms. {:?}: ({}-{}/{} ~ {:.4}<={:.4}<={:.4}) {} {} {}",
            seed,
            now.elapsed().as_secs_f64() * 1000f64,
            res,
            cnt_solve,
            cnt_terminated,
            cnt_total,
            lower,
            f64::from(cnt_solve) / f64::from(cnt_total),
            higher,
            stats.total_visit(),
            stats.stale_visit(),
            stats.max_depth(),
        );

        if terminated.load(Ordering::Relaxed) {
            thread::sleep(Duration::from_millis(500));
            terminated.store(false, Ordering::Relaxed);
        }
    }

    println!("Total run time: {:?}", Instant::now() - start);
    Ok(())
}

fn benchmark(rules: Rules, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut total_moves = 0u32;
    let now = Instant::now();
    for i in 0..100 {
        let mut game = State::from(shuffler::default_shuffle(rules, seed.wrapping_add(i)));
        for _ in 0..100 {
            let moves = game.gen_moves();
            let Some(next) = moves.choose(&mut rng).and_then(|m| game.do_move(*m)) else {
                break;
            };
            game = next;
            std::hint::black_box(game.encode());
            total_moves += 1;
        }
    }
    println!(
        "{} {} op/s",
        total_moves,
        f64::from(total_moves) / now.elapsed().as_secs_f64()
    );
}

fn handling_signal() -> anyhow::Result<Arc<AtomicBool>> {
    let terminated = Arc::new(AtomicBool::new(false));

    signal_hook::flag::register_conditional_shutdown(
        signal_hook::consts::signal::SIGINT,
        1,
        Arc::clone(&terminated),
    )
    .context("Can't register hook")?;

    signal_hook::flag::register(signal_hook::consts::signal::SIGINT, Arc::clone(&terminated))
        .context("Can't register hook")?;
    Ok(terminated)
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of decks on the table
    #[arg(long, global = true, default_value_t = Rules::STANDARD.n_decks())]
    decks: u8,
    /// Cards dealt to each deck, also the length of a full run
    #[arg(long, global = true, default_value_t = Rules::STANDARD.deck_size())]
    size: u8,
    /// Rank at the bottom of a full run
    #[arg(long, global = true, default_value_t = Rules::STANDARD.bottom_rank())]
    top: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Print {
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },

    Solve {
        #[command(flatten)]
        source: Source,
        /// Give up after this many distinct arrangements
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: NonZeroUsize,
        #[arg(short, long)]
        verbose: bool,
    },

    Play {
        #[command(flatten)]
        source: Source,
    },

    Rate {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 100)]
        count: u64,
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: NonZeroUsize,
    },

    Bench {
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let rules = Rules::new(cli.decks, cli.size, cli.top)?;

    match &cli.command {
        Commands::Print { seed } => {
            let layout = shuffler::default_shuffle(rules, *seed);
            print!("{layout}");
            print_game(&State::from(layout));
        }
        Commands::Solve {
            source,
            limit,
            verbose,
        } => {
            solve(rules, source, *limit, *verbose, &handling_signal()?)?;
        }
        Commands::Play { source } => {
            game_loop(rules, source)?;
        }
        Commands::Rate { seed, count, limit } => {
            solve_loop(rules, *seed, *count, *limit, &handling_signal()?)?;
        }
        Commands::Bench { seed } => {
            benchmark(rules, *seed);
        }
    }
    Ok(())
}
