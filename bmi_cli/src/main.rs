use bmi_core::*;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bmi")]
#[command(about = "Body mass index calculator with local history", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum UnitArg {
    Metric,
    Imperial,
}

impl From<UnitArg> for UnitSystem {
    fn from(arg: UnitArg) -> Self {
        match arg {
            UnitArg::Metric => UnitSystem::Metric,
            UnitArg::Imperial => UnitSystem::Imperial,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate BMI and record it in history (default)
    Calc {
        /// Unit system for the inputs
        #[arg(long, value_enum)]
        unit: Option<UnitArg>,

        /// Weight in kg (metric) or lb (imperial)
        #[arg(long)]
        weight: Option<f64>,

        /// Height in cm (metric only)
        #[arg(long)]
        height: Option<f64>,

        /// Height feet (imperial only)
        #[arg(long)]
        feet: Option<f64>,

        /// Height inches (imperial only)
        #[arg(long)]
        inches: Option<f64>,

        /// Show the result without recording it
        #[arg(long)]
        dry_run: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List past results, most recent first
    History {
        /// Print the stored records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete all recorded results
    Clear,

    /// Write history to a CSV file
    Export {
        /// Destination file
        path: PathBuf,
    },

    /// Write the effective configuration to the config file
    InitConfig {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

struct CalcArgs {
    unit: Option<UnitArg>,
    weight: Option<f64>,
    height: Option<f64>,
    feet: Option<f64>,
    inches: Option<f64>,
    dry_run: bool,
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    bmi_core::logging::init(cli.verbose);

    let mut config = match &cli.config {
        Some(path) if path.exists() => Config::load_from(path)?,
        Some(path) => {
            tracing::info!("No config file found at {:?}, using defaults", path);
            Config::default()
        }
        None => Config::load()?,
    };
    if let Some(data_dir) = cli.data_dir {
        config.data.data_dir = data_dir;
    }

    let store = FileStore::new(&config.data.data_dir);
    tracing::debug!("Using data directory {:?}", store.dir());
    let history = HistoryStore::open(store);

    match cli.command {
        Some(Commands::Calc {
            unit,
            weight,
            height,
            feet,
            inches,
            dry_run,
            json,
        }) => cmd_calc(
            history,
            &config,
            CalcArgs {
                unit,
                weight,
                height,
                feet,
                inches,
                dry_run,
                json,
            },
        ),
        Some(Commands::History { json }) => cmd_history(&history, json),
        Some(Commands::Clear) => cmd_clear(history),
        Some(Commands::Export { path }) => cmd_export(&history, &path),
        Some(Commands::InitConfig { force }) => {
            cmd_init_config(&config, cli.config.as_deref(), force)
        }
        None => cmd_calc(
            history,
            &config,
            CalcArgs {
                unit: None,
                weight: None,
                height: None,
                feet: None,
                inches: None,
                dry_run: false,
                json: false,
            },
        ),
    }
}

fn cmd_calc(history: HistoryStore<FileStore>, config: &Config, args: CalcArgs) -> Result<()> {
    let mut state = FormState::from_defaults(&config.defaults);
    if let Some(unit) = args.unit {
        state.unit = unit.into();
    }

    // Feed command-line values through the same clamping as any other input
    let weight_field = match state.unit {
        UnitSystem::Metric => Field::WeightKg,
        UnitSystem::Imperial => Field::WeightLb,
    };
    let inputs = [
        ("--weight", weight_field, args.weight),
        ("--height", Field::HeightCm, args.height),
        ("--feet", Field::HeightFt, args.feet),
        ("--inches", Field::HeightIn, args.inches),
    ];

    let unit = state.unit;
    let mut calculator = Calculator::new(state, history);
    let mut events = Vec::new();
    for (flag, field, value) in inputs {
        let Some(value) = value else {
            continue;
        };
        if field.unit() != unit {
            eprintln!("Note: {} is ignored for {} input", flag, unit);
            continue;
        }

        let bounds = field.bounds();
        if !value.is_finite() {
            eprintln!("Note: {} {} is not a number, ignored", field.label(), value);
        } else if !bounds.contains(value) {
            eprintln!(
                "Note: {} {} is outside {}-{}, clamped",
                field.label(),
                value,
                bounds.min,
                bounds.max
            );
        }
        events.push(FormEvent::Enter(field, value));
    }
    for event in events {
        calculator.dispatch(event)?;
    }

    let measurement = calculator.state().measurement();
    let result = if args.dry_run {
        engine::calculate(&measurement)
    } else {
        calculator.dispatch(FormEvent::Calculate)?;
        calculator
            .state()
            .result
            .clone()
            .unwrap_or_else(|| engine::calculate(&measurement))
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        display_result(&measurement, &result);
        if args.dry_run {
            println!("\n[Dry run - not recorded]");
        } else {
            println!("\n✓ Saved to history ({} entries)", calculator.history().len());
        }
    }

    Ok(())
}

fn cmd_history(history: &HistoryStore<FileStore>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(history.list())?);
        return Ok(());
    }

    if history.is_empty() {
        println!("No history yet.");
        return Ok(());
    }

    println!("History ({} entries, newest first)", history.len());
    println!("─────────────────────────────────────────");
    for record in history.list() {
        println!(
            "  {}  {:>5.1}  {:<11}  {:>6}  {}",
            record.local_date(),
            record.bmi,
            record.category,
            record.weight_display(),
            record.height_display()
        );
    }

    Ok(())
}

fn cmd_clear(history: HistoryStore<FileStore>) -> Result<()> {
    let count = history.len();
    let mut calculator = Calculator::new(FormState::default(), history);
    calculator.dispatch(FormEvent::ClearHistory)?;
    println!("✓ History cleared ({} entries removed)", count);
    Ok(())
}

fn cmd_export(history: &HistoryStore<FileStore>, path: &std::path::Path) -> Result<()> {
    let count = export_csv(history.list(), path)?;
    println!("✓ Exported {} entries to {}", count, path.display());
    Ok(())
}

fn cmd_init_config(config: &Config, path: Option<&std::path::Path>, force: bool) -> Result<()> {
    let target = path
        .map(|p| p.to_path_buf())
        .unwrap_or_else(Config::default_config_path);

    if target.exists() && !force {
        println!("Config already exists at {} (use --force to overwrite)", target.display());
        return Ok(());
    }

    match path {
        Some(path) => config.save_to(path)?,
        None => config.save()?,
    }
    println!("✓ Wrote config to {}", target.display());
    Ok(())
}

fn display_result(measurement: &Measurement, result: &BmiResult) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  YOUR BODY MASS INDEX");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  BMI: {:.1}", result.score);
    println!("  Category: {} ({})", result.category, result.color);
    println!("  Healthy range: {}", BmiCategory::Normal.range_label());
    println!("  Your range: {}", result.range);
    println!();

    match *measurement {
        Measurement::Metric {
            weight_kg,
            height_cm,
        } => println!("  Input: {}kg, {}cm", weight_kg, height_cm),
        Measurement::Imperial {
            weight_lb,
            height_ft,
            height_in,
        } => println!("  Input: {}lb, {}ft {}in", weight_lb, height_ft, height_in),
    }
}
