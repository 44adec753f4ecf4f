use crate::Balancer::balancer_api::{BalanceError, EquationBalancer};
use crate::Utils::load_from_file::{NumberedEquation, load_equations_from_file};
use crate::settings::{BalancerConfig, ConfigError, DEFAULT_CONFIG_FILE};
use clap::Parser;
use log::{LevelFilter, debug, error};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::io::{self, Write};
use std::path::PathBuf;

pub const SUCCESS: i32 = 0;
pub const FILE_ERR: i32 = 1;
pub const EVAL_ERR: i32 = 3;

/// Balances chemical equations like "Fe + O2 = Fe2O3"
#[derive(Parser, Debug)]
#[command(name = "chem_balancer", version, about)]
pub struct CliArgs {
    /// Equations to balance
    pub equations: Vec<String>,

    /// File with one equation per line ('#' starts a comment line)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the stoichiometric matrix of every balanced equation
    #[arg(long, default_value_t = false)]
    pub matrix: bool,

    /// Debug logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

fn init_logger(level: LevelFilter) {
    if let Err(e) = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("logger is not initialized: {}", e);
    }
}

fn load_config(args: &CliArgs) -> Result<BalancerConfig, ConfigError> {
    match &args.config {
        Some(path) => BalancerConfig::load_required(path),
        None => BalancerConfig::load(DEFAULT_CONFIG_FILE),
    }
}

/// equations from the command line first, then the ones from the file; numbering continues
fn collect_equations(args: &CliArgs) -> Result<Vec<NumberedEquation>, ConfigError> {
    let mut equations: Vec<NumberedEquation> = args
        .equations
        .iter()
        .enumerate()
        .map(|(i, eq)| (i + 1, eq.clone()))
        .collect();
    if let Some(file) = &args.file {
        let offset = equations.len();
        equations.extend(
            load_equations_from_file(file)?
                .into_iter()
                .map(|(line, eq)| (line + offset, eq)),
        );
    }
    Ok(equations)
}

/// Balances every equation, stops at the first failure.
/// Balanced equations go to `out`, the failure goes to `err` as "line : message".
pub fn balance_all(
    balancer: &EquationBalancer,
    equations: &[NumberedEquation],
    show_matrix: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> io::Result<Result<(), BalanceError>> {
    for (line, equation) in equations {
        match balancer.balance_detailed(equation) {
            Ok(balanced) => {
                writeln!(out, "{}", balanced.text)?;
                if show_matrix {
                    if let Some(matrix) = &balanced.matrix {
                        write!(out, "{}", matrix.to_table(&balanced.compounds()))?;
                    }
                }
            }
            Err(e) => {
                writeln!(err, "{} : {}", line, e)?;
                return Ok(Err(e));
            }
        }
    }
    Ok(Ok(()))
}

/// Runs the command line tool and returns the process exit code
pub fn run() -> i32 {
    let args = CliArgs::parse();
    run_with_args(args)
}

pub fn run_with_args(args: CliArgs) -> i32 {
    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return FILE_ERR;
        }
    };
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        config.level_filter().unwrap_or(LevelFilter::Info)
    };
    init_logger(level);
    debug!("configuration: {:?}", config);

    let equations = match collect_equations(&args) {
        Ok(equations) => equations,
        Err(e) => {
            error!("{}", e);
            eprintln!("The file was not found.");
            return FILE_ERR;
        }
    };

    let balancer = EquationBalancer::with_config(&config);
    let stdout = io::stdout();
    let stderr = io::stderr();
    match balance_all(
        &balancer,
        &equations,
        args.matrix,
        &mut stdout.lock(),
        &mut stderr.lock(),
    ) {
        Ok(Ok(())) => SUCCESS,
        Ok(Err(_)) => EVAL_ERR,
        Err(e) => {
            error!("cannot write output: {}", e);
            EVAL_ERR
        }
    }
}
