mod cli;
mod commands;
mod render;

use plan_risk::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
