use clap::{Parser, Subcommand};
use legday_core::*;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "legday")]
#[command(about = "Leg-day interval training companion", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the exercise menu (default)
    Menu,

    /// Show one exercise in detail
    Show {
        /// Exercise id from the menu
        id: u32,
    },

    /// Run an interval training session for an exercise
    Train {
        /// Exercise id from the menu
        id: u32,

        /// Countdown pace (slow, fast)
        #[arg(long)]
        speed: Option<String>,

        /// Workout volume (easy, hard)
        #[arg(long)]
        difficulty: Option<String>,

        /// Body weight in kg for the calorie estimate
        #[arg(long)]
        weight: Option<f64>,

        /// Drive the whole session without prompts (for testing)
        #[arg(long)]
        auto: bool,

        /// Tick interval in milliseconds (for testing)
        #[arg(long, default_value_t = 1000)]
        tick_ms: u64,
    },

    /// Ask the AI trainer a question
    Ask {
        /// The question; omit to pick from the quick questions
        question: Option<String>,

        /// Override the advice relay endpoint
        #[arg(long)]
        endpoint: Option<String>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    legday_core::logging::init();

    let cli = Cli::parse();

    // Determine data directory
    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());

    match cli.command {
        Some(Commands::Show { id }) => cmd_show(id),
        Some(Commands::Train {
            id,
            speed,
            difficulty,
            weight,
            auto,
            tick_ms,
        }) => cmd_train(data_dir, id, speed, difficulty, weight, auto, tick_ms, &config),
        Some(Commands::Ask { question, endpoint }) => cmd_ask(question, endpoint, &config),
        Some(Commands::Menu) | None => cmd_menu(),
    }
}

fn cmd_menu() -> Result<()> {
    let catalog = get_default_catalog();

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  CHICKEN LEGS TRAINING                  │");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Squat your way to a stronger lower body!");
    println!();

    for exercise in catalog.exercises() {
        println!("  {}. {}", exercise.id, exercise.title);
        println!("     {}", exercise.note);
        println!();
    }

    println!("  Start a session:   legday train <id>");
    println!("  Exercise details:  legday show <id>");
    println!("  Ask the trainer:   legday ask");
    println!();

    Ok(())
}

fn cmd_show(id: u32) -> Result<()> {
    let catalog = get_default_catalog();

    let Some(exercise) = catalog.lookup(id) else {
        display_placeholder(id);
        return Ok(());
    };

    println!();
    println!("  {}", exercise.title);
    println!();
    println!("  {}", exercise.note);
    println!();
    println!("  ℹ Reference: {}", exercise.reference_url);
    println!();
    println!("  Train this with `legday train {}`", id);
    println!();

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_train(
    data_dir: PathBuf,
    id: u32,
    speed: Option<String>,
    difficulty: Option<String>,
    weight: Option<f64>,
    auto: bool,
    tick_ms: u64,
    config: &Config,
) -> Result<()> {
    let catalog = get_default_catalog();
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }

    let Some(exercise) = catalog.lookup(id) else {
        display_placeholder(id);
        return Ok(());
    };

    let speed = speed
        .as_deref()
        .and_then(parse_speed)
        .unwrap_or(config.training.speed);
    let difficulty = difficulty
        .as_deref()
        .and_then(parse_difficulty)
        .unwrap_or(config.training.difficulty);
    let weight = weight.or(config.training.body_weight_kg);

    tracing::debug!(
        "Session settings: {:?} / {:?}, weight {:?}",
        speed,
        difficulty,
        weight
    );

    std::fs::create_dir_all(&data_dir)?;
    let store = SessionStore::new(speed, difficulty)
        .with_sink(Box::new(JsonFileSink::in_data_dir(&data_dir)));

    if !auto {
        store.subscribe(|state| {
            if state.is_running() {
                print!("\r   {:>2}s remaining ", state.countdown_remaining());
                let _ = io::stdout().flush();
            }
        });
    }

    let mut ticker = store.spawn_ticker(Duration::from_millis(tick_ms));

    display_session_header(exercise, speed, difficulty);

    let completed = run_session_loop(&store, auto, tick_ms)?;

    ticker.cancel();

    display_summary(&store.snapshot(), weight, completed, id);
    Ok(())
}

/// Drive the session until the workout is done or the user quits
///
/// Returns true when every set was finished.
fn run_session_loop(store: &SessionStore, auto: bool, tick_ms: u64) -> Result<bool> {
    loop {
        let state = store.snapshot();

        if state.workout_done() {
            return Ok(true);
        }

        if !auto {
            display_status(&state);
        }

        let action = if auto {
            if state.set_complete() {
                SessionAction::NextSet
            } else {
                SessionAction::Start
            }
        } else {
            prompt_session_action(&state)?
        };

        match action {
            SessionAction::Start => match store.start() {
                Ok(()) => {
                    wait_for_countdown(store, tick_ms);
                    if !auto {
                        println!("\n  ✓ Rep complete!");
                    }
                }
                Err(e) => println!("  ({})", e),
            },

            SessionAction::NextSet => match store.advance_set() {
                Ok(()) => {
                    if !auto {
                        println!("\n  Next set - let's go.");
                    }
                }
                Err(e) => println!("  ({})", e),
            },

            SessionAction::Reset => {
                store.reset();
                println!("\n  Counters reset.");
            }

            SessionAction::Quit => return Ok(false),
        }
    }
}

/// Block until the running countdown finishes
fn wait_for_countdown(store: &SessionStore, tick_ms: u64) {
    let poll = Duration::from_millis((tick_ms / 4).clamp(1, 100));
    while store.snapshot().is_running() {
        std::thread::sleep(poll);
    }
}

fn display_session_header(exercise: &Exercise, speed: Speed, difficulty: Difficulty) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  TRAINING SESSION                       │");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  {}", exercise.title);
    println!("  {}", exercise.note);
    println!("  ℹ Reference: {}", exercise.reference_url);
    println!();
    println!(
        "  Pace: {:?} ({}s per rep) - Volume: {:?} ({} reps x {} sets)",
        speed,
        speed.countdown_seconds(),
        difficulty,
        difficulty.reps_per_set(),
        difficulty.total_sets()
    );
}

fn display_status(state: &TimerState) {
    println!();
    println!(
        "  Set {}/{} - Rep {}/{}",
        state.current_set(),
        state.total_sets(),
        state.current_rep(),
        state.reps_per_set()
    );
    println!("  Session time: {}", format_time(state.session_elapsed()));
}

fn display_summary(state: &TimerState, weight: Option<f64>, completed: bool, id: u32) {
    println!();
    if completed {
        println!("╭─────────────────────────────────────────╮");
        println!("│  🎉 WORKOUT COMPLETE                    │");
        println!("╰─────────────────────────────────────────╯");
    } else {
        println!("  Session ended early.");
    }

    println!();
    println!("  Total time: {}", format_time(state.session_elapsed()));

    if let Some(weight) = weight {
        let kcal = estimate_kcal(state.session_elapsed(), weight);
        println!("  Estimated burn: {} kcal", kcal);
    }

    println!();
    println!("  Go again any time with `legday train {}`.", id);
    println!();
}

fn display_placeholder(id: u32) {
    println!();
    println!("  Loading exercise {}...", id);
    println!();
    println!("  Nothing arrived. Pick an exercise from `legday menu`.");
    println!();
}

fn cmd_ask(question: Option<String>, endpoint: Option<String>, config: &Config) -> Result<()> {
    let endpoint = endpoint.unwrap_or_else(|| config.advice.endpoint.clone());

    let question = match question {
        Some(q) => q,
        None => match prompt_question()? {
            Some(q) => q,
            None => {
                println!("  No question asked.");
                return Ok(());
            }
        },
    };

    let relay = HttpRelay::new(endpoint, config.advice.timeout())?;
    let mut client = AdviceClient::new(relay);

    println!();
    println!("  You asked: {}", question);
    println!("  The trainer is thinking...");
    println!();

    let exchange = client.ask(&question);
    println!("{}", exchange.response_text);
    println!();

    Ok(())
}

/// Offer the quick questions and read one, or free text, from stdin
fn prompt_question() -> Result<Option<String>> {
    println!();
    println!("  Quick questions:");
    for (i, quick) in QUICK_QUESTIONS.iter().enumerate() {
        println!("    {}. {}", i + 1, quick);
    }
    println!();
    println!("  Pick a number, or type your own question.");
    print!("> ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim();

    if input.is_empty() {
        return Ok(None);
    }

    if let Ok(n) = input.parse::<usize>() {
        if (1..=QUICK_QUESTIONS.len()).contains(&n) {
            return Ok(Some(QUICK_QUESTIONS[n - 1].to_string()));
        }
    }

    Ok(Some(input.to_string()))
}

enum SessionAction {
    Start,
    NextSet,
    Reset,
    Quit,
}

fn prompt_session_action(state: &TimerState) -> Result<SessionAction> {
    println!("─────────────────────────────────────────");
    if state.set_complete() {
        println!("Set complete!");
        println!("  'n' + Enter for the next set");
    } else {
        println!("Press Enter to start the countdown");
    }
    println!("  'r' + Enter to reset");
    println!("  'q' + Enter to quit");
    print!("> ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let action = match input.trim().to_lowercase().as_str() {
        "n" => SessionAction::NextSet,
        "r" => SessionAction::Reset,
        "q" => SessionAction::Quit,
        "" if state.set_complete() => SessionAction::NextSet,
        _ => SessionAction::Start,
    };

    Ok(action)
}

fn parse_speed(s: &str) -> Option<Speed> {
    match s.to_lowercase().as_str() {
        "slow" => Some(Speed::Slow),
        "fast" => Some(Speed::Fast),
        _ => {
            eprintln!("Unknown speed: {}. Using the configured default.", s);
            None
        }
    }
}

fn parse_difficulty(s: &str) -> Option<Difficulty> {
    match s.to_lowercase().as_str() {
        "easy" => Some(Difficulty::Easy),
        "hard" => Some(Difficulty::Hard),
        _ => {
            eprintln!("Unknown difficulty: {}. Using the configured default.", s);
            None
        }
    }
}

fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
