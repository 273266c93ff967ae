//! Least-cost diet: nine foods, three macronutrient targets.

use randplex_solver::{Problem, SolveResult};

pub const DEFAULT_SEED: u64 = 42;

const FOODS: [&str; 9] = [
    "Chicken breast",
    "Eggs",
    "Red meat",
    "Rice",
    "Potato",
    "Wholegrain bread",
    "Avocado",
    "Brazil nuts",
    "Olive oil",
];

const COSTS: [f64; 9] = [20.0, 10.0, 25.0, 8.0, 10.0, 7.0, 12.0, 15.0, 5.0];
const PROTEIN: [f64; 9] = [18.0, 6.0, 22.0, 7.0, 2.0, 8.0, 2.0, 4.0, 0.0];
const CARBOHYDRATE: [f64; 9] = [2.0, 1.0, 5.0, 73.0, 20.0, 50.0, 8.0, 4.0, 0.0];
const FAT: [f64; 9] = [3.0, 5.0, 10.0, 0.6, 0.5, 1.5, 15.0, 18.0, 14.0];
const TARGETS: [f64; 3] = [150.0, 300.0, 50.0];

pub fn diet_problem() -> SolveResult<Problem> {
    let problem = Problem::new(
        COSTS.to_vec(),
        vec![PROTEIN.to_vec(), CARBOHYDRATE.to_vec(), FAT.to_vec()],
        TARGETS.to_vec(),
    )?;
    Ok(problem.with_description("Min 20x1 + 10x2 + 25x3 + 8x4 + 10x5 + 7x6 + 12x7 + 15x8 + 5x9"))
}

pub fn print_header(problem: &Problem) {
    println!("Objective: Min {:?}", problem.costs());
    println!("Macronutrients per food:");
    for (label, (row, target)) in ["Protein", "Carbohydrate", "Fat"]
        .iter()
        .zip(problem.matrix().iter().zip(problem.rhs()))
    {
        println!("  {:13} {:?} = {}", label, row, target);
    }
    println!("Foods:");
    for (j, food) in FOODS.iter().enumerate() {
        println!("  x{:<4} {}", j + 1, food);
    }
    println!();
}
