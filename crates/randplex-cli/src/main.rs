mod demo;

use clap::{Parser, Subcommand, ValueEnum};
use randplex_solver::{Problem, SolveError, Solution, SolutionStatus, Solver};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "randplex")]
#[command(about = "Solve canonical-form linear programs with randomized simplex pivoting", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a problem stored as JSON and print the result
    Solve {
        /// The file containing c, a and b
        file: PathBuf,
        #[command(flatten)]
        options: SolveOptions,
    },
    /// Solve the built-in least-cost diet problem
    Demo {
        #[command(flatten)]
        options: SolveOptions,
    },
    /// Check a problem file for shape errors
    Check {
        /// The file to check
        file: PathBuf,
    },
}

#[derive(clap::Args)]
struct SolveOptions {
    /// Seed for the random basis search and pivot choices
    #[arg(short, long)]
    seed: Option<u64>,
    /// Random subsets tried when searching for a starting basis
    #[arg(long, default_value_t = randplex_solver::DEFAULT_MAX_ATTEMPTS)]
    max_attempts: usize,
    /// Stop after this many pivots
    #[arg(long)]
    max_iterations: Option<usize>,
    /// Tolerance for floating point comparisons
    #[arg(long, default_value_t = 1e-9)]
    tolerance: f64,
    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Pretty)]
    format: Format,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Pretty,
    Json,
}

/// On-disk problem layout
#[derive(Deserialize)]
struct ProblemFile {
    description: Option<String>,
    c: Vec<f64>,
    a: Vec<Vec<f64>>,
    b: Vec<f64>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Solve { file, options } => {
            let problem = load_problem(&file).unwrap_or_else(|e| exit_with(&e));
            run(&problem, &options);
        }
        Commands::Demo { options } => {
            let problem = demo::diet_problem().unwrap_or_else(|e| exit_with(&e.to_string()));
            let options = SolveOptions {
                seed: options.seed.or(Some(demo::DEFAULT_SEED)),
                ..options
            };
            demo::print_header(&problem);
            run(&problem, &options);
        }
        Commands::Check { file } => match load_problem(&file) {
            Ok(problem) => {
                println!("✓ {} is valid", file.display());
                if let Some(desc) = problem.description() {
                    println!("  {}", desc);
                }
                println!("  {} variables", problem.num_variables());
                println!("  {} constraints", problem.num_constraints());
            }
            Err(e) => {
                eprintln!("✗ {} has errors:", file.display());
                eprintln!("  {}", e);
                std::process::exit(1);
            }
        },
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

fn exit_with(message: &str) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

fn load_problem(path: &Path) -> Result<Problem, String> {
    let source = std::fs::read_to_string(path).map_err(|e| format!("Error reading file: {}", e))?;
    let file: ProblemFile = serde_json::from_str(&source).map_err(|e| format!("Parse error: {}", e))?;

    let problem = Problem::new(file.c, file.a, file.b).map_err(|e| e.to_string())?;
    Ok(match file.description {
        Some(desc) => problem.with_description(desc),
        None => problem,
    })
}

fn run(problem: &Problem, options: &SolveOptions) {
    let solver = Solver::new()
        .with_max_attempts(options.max_attempts)
        .with_max_iterations(options.max_iterations)
        .with_tolerance(options.tolerance);

    let result = match options.seed {
        Some(seed) => solver.solve_seeded(problem, seed),
        None => solver.solve(problem, &mut rand::rng()),
    };

    let solution = match result {
        Ok(solution) => solution,
        Err(SolveError::BasisNotFound { attempts }) => {
            eprintln!("No nonsingular basis found after {} attempts", attempts);
            Solution::basis_not_found(attempts, problem.description().map(str::to_string))
        }
        Err(e) => exit_with(&e.to_string()),
    };

    match options.format {
        Format::Json => match render_json(&solution) {
            Ok(json) => println!("{}", json),
            Err(e) => exit_with(&e.to_string()),
        },
        Format::Pretty => print_solution(problem, &solution),
    }

    if solution.status != SolutionStatus::Optimal {
        std::process::exit(1);
    }
}

fn render_json(solution: &Solution) -> serde_json::Result<String> {
    serde_json::to_string_pretty(solution)
}

fn print_solution(problem: &Problem, solution: &Solution) {
    if let Some(ref desc) = solution.description {
        println!("Description: {}", desc);
    }
    println!("Status: {}", solution.status);

    match solution.status {
        SolutionStatus::Optimal | SolutionStatus::IterationLimit => {
            if let Some(objective) = solution.objective_value {
                println!("Objective: {:.6}", objective);
            }
            println!("Iterations: {}", solution.iterations);
            println!();
            println!("Values:");
            for (j, value) in solution.values.iter().enumerate() {
                println!("  x{:<4} {:14.6}", j + 1, value);
            }
            println!();
            println!("Residual |Ax - b|: {:e}", problem.residual(&solution.values));
            if !solution.feasible_start {
                println!("Warning: the random starting basis was infeasible (negative basic values)");
            }
        }
        SolutionStatus::Unbounded => {
            println!("Objective: -inf");
            println!("The problem has no finite optimal solution.");
            if let Some(ref ray) = solution.ray {
                println!("Improving ray: {:?}", ray);
            }
        }
        SolutionStatus::BasisNotFound => {
            match solution.attempts {
                Some(attempts) => println!("No nonsingular starting basis was found in {} attempts.", attempts),
                None => println!("No nonsingular starting basis was found."),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbounded_json_keeps_negative_infinity() {
        // Minimize: -x subject to -x + y = 1
        let problem = Problem::new(vec![-1.0, 0.0], vec![vec![-1.0, 1.0]], vec![1.0]).unwrap();
        let solution = Solver::new().solve_seeded(&problem, 0).unwrap();
        assert_eq!(solution.status, SolutionStatus::Unbounded);

        let json: serde_json::Value = serde_json::from_str(&render_json(&solution).unwrap()).unwrap();
        assert_eq!(json["status"], "Unbounded");
        assert_eq!(json["objective_value"], "-inf");
        assert!(json["attempts"].is_null());
    }

    #[test]
    fn test_basis_not_found_json_has_no_objective() {
        let solution = Solution::basis_not_found(7, Some("rank one".to_string()));

        let json: serde_json::Value = serde_json::from_str(&render_json(&solution).unwrap()).unwrap();
        assert_eq!(json["status"], "BasisNotFound");
        assert!(json["objective_value"].is_null());
        assert_eq!(json["attempts"], 7);
        assert_eq!(json["description"], "rank one");
        assert_eq!(json["values"], serde_json::json!([]));
    }

    #[test]
    fn test_optimal_json_is_a_number() {
        let problem = Problem::new(vec![-1.0, -1.0, 0.0], vec![vec![1.0, 1.0, 1.0]], vec![4.0]).unwrap();
        let solution = Solver::new().solve_seeded(&problem, 3).unwrap();

        let json: serde_json::Value = serde_json::from_str(&render_json(&solution).unwrap()).unwrap();
        assert_eq!(json["status"], "Optimal");
        let objective = json["objective_value"].as_f64().unwrap();
        assert!((objective + 4.0).abs() < 1e-6);
    }
}
